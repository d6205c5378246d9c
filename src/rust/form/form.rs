use std::sync::Arc;

use log::{debug, error, warn};
use tokio::sync::Mutex;

use super::error::FormError;
use super::field::Field;
use super::render::render_outcome;
use super::state::{Action, Effect, FormState, Resolution};
use crate::client::{PredictionClient, Predictor};
use crate::config::ClientConfig;
use crate::prediction::PredictionResult;

/// The prediction request form: field state, the latest outcome and a way to
/// reach the prediction service.
///
/// Cloning is cheap and every clone drives the same form, so field updates and
/// submissions can come from different tasks. The state lock is never held
/// across the network call. When submissions overlap, only the response to
/// the most recent one is shown.
///
/// ```no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use bikestatus::{Field, PredictionForm};
///
/// let form = PredictionForm::new_default()?;
/// form.update_field(Field::PrimaryOffence, "THEFT UNDER").await;
/// // ... the other nine fields ...
/// match form.submit().await {
///     Ok(result) => println!("{}", result),
///     Err(e) => println!("{}", e.user_message()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PredictionForm<P = PredictionClient> {
    state: Arc<Mutex<FormState>>,
    predictor: Arc<P>,
}

impl<P> Clone for PredictionForm<P> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            predictor: Arc::clone(&self.predictor),
        }
    }
}

impl PredictionForm<PredictionClient> {
    /// A form talking to the default endpoint
    pub fn new_default() -> Result<Self, FormError> {
        Ok(Self::new(PredictionClient::new_default()?))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, FormError> {
        Ok(Self::new(PredictionClient::new(config)?))
    }
}

impl<P: Predictor> PredictionForm<P> {
    pub fn new(predictor: P) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState::new())),
            predictor: Arc::new(predictor),
        }
    }

    async fn transition<T>(&self, step: impl FnOnce(FormState) -> (FormState, T)) -> T {
        let mut guard = self.state.lock().await;
        let current = std::mem::take(&mut *guard);
        let (next, output) = step(current);
        *guard = next;
        output
    }

    async fn dispatch(&self, action: Action) -> Effect {
        self.transition(|state| state.reduce(action)).await
    }

    /// Sets one field; nothing else changes.
    pub async fn update_field(&self, field: Field, value: impl Into<String>) {
        self.dispatch(Action::FieldChanged {
            field,
            value: value.into(),
        })
        .await;
    }

    /// Sets one field by its wire name, e.g. `"BIKE_COST"`.
    pub async fn update_field_by_name(&self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field: Field = name.parse()?;
        self.update_field(field, value).await;
        Ok(())
    }

    /// Validates the form and, if it passes, asks the service for a prediction.
    ///
    /// The returned value is this submission's own outcome. The displayed state
    /// only takes it if no newer submission was started in the meantime.
    ///
    /// # Returns
    /// * `Err(FormError::MissingFields)` if a field is empty; nothing is displayed or sent
    /// * `Err(FormError::ValidationError)` if a numeric field does not parse; nothing is sent
    /// * `Err(FormError::RequestError)` if the exchange with the service failed
    pub async fn submit(&self) -> Result<PredictionResult, FormError> {
        let request = match self.transition(FormState::begin_submit).await {
            Ok(request) => request,
            Err(err @ FormError::MissingFields(_)) => {
                warn!("Submission blocked: {}", err);
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        let seq = request.seq;
        let outcome = self.predictor.predict(&request.record).await;
        let resolution = match &outcome {
            Ok(result) => Resolution::Success(result.clone()),
            Err(e) => {
                error!("Submission {} failed: {}", seq, e);
                Resolution::Failure
            }
        };

        if let Effect::Stale { latest, .. } = self.dispatch(Action::Resolved { seq, resolution }).await {
            debug!("Submission {} superseded by {}, display left unchanged", seq, latest);
        }
        outcome.map_err(FormError::from)
    }

    /// A copy of the current state
    pub async fn snapshot(&self) -> FormState {
        self.state.lock().await.clone()
    }

    /// What the user currently sees below the form
    pub async fn render(&self) -> String {
        render_outcome(&*self.state.lock().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::error::{RequestFailure, NUMERIC_FIELDS_MESSAGE, REQUEST_FAILED_MESSAGE};
    use crate::form::record::InputRecord;
    use crate::form::state::Phase;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Answers the n-th call with `replies[n]` after `delays[n]`.
    struct ScriptedPredictor {
        calls: AtomicUsize,
        delays: Vec<Duration>,
        replies: Vec<Option<PredictionResult>>,
    }

    impl ScriptedPredictor {
        fn new(script: Vec<(u64, Option<PredictionResult>)>) -> Self {
            let (delays, replies) = script
                .into_iter()
                .map(|(ms, reply)| (Duration::from_millis(ms), reply))
                .unzip();
            Self {
                calls: AtomicUsize::new(0),
                delays,
                replies,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Predictor for ScriptedPredictor {
        async fn predict(&self, _record: &InputRecord) -> Result<PredictionResult, RequestFailure> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delays[n]).await;
            match &self.replies[n] {
                Some(result) => Ok(result.clone()),
                None => Err(RequestFailure::Status {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    body: "boom".into(),
                }),
            }
        }
    }

    async fn fill(form: &PredictionForm<ScriptedPredictor>) {
        let values = [
            "THEFT UNDER",
            "Wednesday",
            "Friday",
            "168",
            "GIANT",
            "RG",
            "GRN",
            "4500",
            "Commercial Places",
            "Outside",
        ];
        for (field, value) in Field::ALL.into_iter().zip(values) {
            form.update_field(field, value).await;
        }
    }

    fn result(class: &str) -> Option<PredictionResult> {
        Some(PredictionResult::new(class, 0.82, 0.18))
    }

    #[tokio::test]
    async fn test_empty_form_never_calls_predictor() {
        let form = PredictionForm::new(ScriptedPredictor::new(vec![]));
        let err = form.submit().await.unwrap_err();

        assert!(matches!(err, FormError::MissingFields(ref names) if names.len() == Field::COUNT));
        assert_eq!(form.predictor.calls(), 0);
        assert_eq!(form.render().await, "");
    }

    #[tokio::test]
    async fn test_validation_error_never_calls_predictor() {
        let form = PredictionForm::new(ScriptedPredictor::new(vec![]));
        fill(&form).await;
        form.update_field_by_name("BIKE_COST", "abc").await.unwrap();

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, FormError::ValidationError(_)));
        assert_eq!(form.predictor.calls(), 0);
        assert_eq!(form.render().await, NUMERIC_FIELDS_MESSAGE);
    }

    #[tokio::test]
    async fn test_success_then_failure() {
        let form = PredictionForm::new(ScriptedPredictor::new(vec![(0, result("STOLEN")), (0, None)]));
        fill(&form).await;

        let first = form.submit().await.unwrap();
        assert_eq!(first.predicted_class, "STOLEN");
        let state = form.snapshot().await;
        assert_eq!(state.result(), Some(&first));
        assert_eq!(state.error(), None);

        let err = form.submit().await.unwrap_err();
        assert_eq!(err.user_message(), REQUEST_FAILED_MESSAGE);
        let state = form.snapshot().await;
        assert_eq!(state.result(), None);
        assert_eq!(state.error(), Some(REQUEST_FAILED_MESSAGE));
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_earlier_response_does_not_overwrite_newer() {
        let form = PredictionForm::new(ScriptedPredictor::new(vec![
            (100, result("FIRST")),
            (10, result("SECOND")),
        ]));
        fill(&form).await;

        let (first, second) = tokio::join!(form.submit(), form.submit());

        assert_eq!(first.unwrap().predicted_class, "FIRST");
        assert_eq!(second.unwrap().predicted_class, "SECOND");
        let state = form.snapshot().await;
        assert_eq!(state.result().map(|r| r.predicted_class.as_str()), Some("SECOND"));
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(form.predictor.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fields_editable_while_request_pending() {
        let form = PredictionForm::new(ScriptedPredictor::new(vec![(50, result("STOLEN"))]));
        fill(&form).await;

        let pending = tokio::spawn({
            let form = form.clone();
            async move { form.submit().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(matches!(form.snapshot().await.phase(), Phase::Submitting { .. }));

        form.update_field(Field::BikeColour, "BLK").await;
        pending.await.unwrap().unwrap();

        let state = form.snapshot().await;
        assert_eq!(state.record().get(Field::BikeColour), "BLK");
        assert!(state.result().is_some());
    }
}

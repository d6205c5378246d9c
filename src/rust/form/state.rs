use log::{debug, info};

use super::error::{FormError, REQUEST_FAILED_MESSAGE};
use super::field::Field;
use super::record::InputRecord;
use crate::prediction::PredictionResult;

/// Sequence number tagging one submission. Numbers are issued in increasing
/// order per form; zero means nothing has been issued yet.
pub type Seq = u64;

/// Where the form is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ready for input and the next submission
    Idle,
    /// Waiting on the response for submission `seq`
    Submitting { seq: Seq },
}

/// How the most recent completed submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    ValidationFailed,
    Succeeded,
    Failed,
}

/// How a request to the prediction service resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Success(PredictionResult),
    Failure,
}

/// Everything that can happen to the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The user changed one field
    FieldChanged { field: Field, value: String },
    /// The user pressed submit
    Submit,
    /// The request tagged `seq` finished
    Resolved { seq: Seq, resolution: Resolution },
}

/// A request the caller must now send to the prediction service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub seq: Seq,
    pub record: InputRecord,
}

/// What the caller has to do after a transition.
#[derive(Debug)]
pub enum Effect {
    /// Nothing further
    None,
    /// Submission blocked by empty required fields; state is unchanged
    Blocked(FormError),
    /// Validation failed; the message is now in the error state
    Rejected(FormError),
    /// Send this request and feed its resolution back as [`Action::Resolved`]
    Send(PendingRequest),
    /// The resolution belonged to a superseded submission and was dropped
    Stale { seq: Seq, latest: Seq },
}

/// The complete state of one prediction form.
///
/// State is replaced, never patched in place: every change goes through
/// [`FormState::reduce`], which consumes the old state and returns the next one
/// together with the [`Effect`] the caller must carry out.
///
/// `result` and `error` are never both set.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    record: InputRecord,
    result: Option<PredictionResult>,
    error: Option<String>,
    phase: Phase,
    last_outcome: Option<Outcome>,
    latest_seq: Seq,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// A freshly mounted form: empty record, nothing displayed
    pub fn new() -> Self {
        Self {
            record: InputRecord::new(),
            result: None,
            error: None,
            phase: Phase::Idle,
            last_outcome: None,
            latest_seq: 0,
        }
    }

    pub fn record(&self) -> &InputRecord {
        &self.record
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// The most recently issued sequence number
    pub fn latest_seq(&self) -> Seq {
        self.latest_seq
    }

    /// Applies one action and returns the next state.
    ///
    /// Transitions:
    /// * `FieldChanged` updates exactly one field and nothing else.
    /// * `Submit` with an empty field returns `Effect::Blocked` and leaves the
    ///   state as it was. Otherwise it issues a new sequence number and clears
    ///   both result and error. A numeric validation failure then lands in
    ///   `Idle` with the error set; a valid record moves to `Submitting` and
    ///   returns `Effect::Send`.
    /// * `Resolved` for the latest sequence number sets exactly one of result
    ///   or error and returns to `Idle`. Older sequence numbers are ignored.
    pub fn reduce(self, action: Action) -> (FormState, Effect) {
        match action {
            Action::FieldChanged { field, value } => {
                let mut next = self;
                next.record.set(field, value);
                (next, Effect::None)
            }
            Action::Submit => self.submit(),
            Action::Resolved { seq, resolution } => self.resolve(seq, resolution),
        }
    }

    fn submit(self) -> (FormState, Effect) {
        let (next, outcome) = self.begin_submit();
        let effect = match outcome {
            Ok(request) => Effect::Send(request),
            Err(err @ FormError::MissingFields(_)) => Effect::Blocked(err),
            Err(err) => Effect::Rejected(err),
        };
        (next, effect)
    }

    /// The `Submit` transition with a typed outcome.
    ///
    /// Same state changes as `reduce(Action::Submit)`, but returns the request
    /// to send directly, or the error that stopped the submission.
    pub fn begin_submit(self) -> (FormState, Result<PendingRequest, FormError>) {
        let missing = self.record.missing_fields();
        if !missing.is_empty() {
            return (self, Err(FormError::MissingFields(missing)));
        }

        let mut next = self;
        next.latest_seq += 1;
        next.result = None;
        next.error = None;

        match next.record.validate() {
            Ok(()) => {
                let seq = next.latest_seq;
                next.phase = Phase::Submitting { seq };
                debug!("Submission {} validated, sending", seq);
                let request = PendingRequest {
                    seq,
                    record: next.record.clone(),
                };
                (next, Ok(request))
            }
            Err(err) => {
                info!("Submission {} failed validation: {}", next.latest_seq, err);
                next.error = Some(err.user_message());
                next.phase = Phase::Idle;
                next.last_outcome = Some(Outcome::ValidationFailed);
                (next, Err(err))
            }
        }
    }

    fn resolve(self, seq: Seq, resolution: Resolution) -> (FormState, Effect) {
        if seq != self.latest_seq {
            debug!("Dropping response for submission {} (latest is {})", seq, self.latest_seq);
            let latest = self.latest_seq;
            return (self, Effect::Stale { seq, latest });
        }
        if !matches!(self.phase, Phase::Submitting { .. }) {
            // Same sequence resolved twice, or a seq that never reached the network
            debug!("Ignoring resolution for submission {} outside Submitting", seq);
            let latest = self.latest_seq;
            return (self, Effect::Stale { seq, latest });
        }

        let mut next = self;
        next.phase = Phase::Idle;
        match resolution {
            Resolution::Success(result) => {
                info!("Submission {} resolved: {}", seq, result);
                next.result = Some(result);
                next.error = None;
                next.last_outcome = Some(Outcome::Succeeded);
            }
            Resolution::Failure => {
                next.result = None;
                next.error = Some(REQUEST_FAILED_MESSAGE.to_string());
                next.last_outcome = Some(Outcome::Failed);
            }
        }
        (next, Effect::None)
    }
}

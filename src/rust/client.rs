use std::future::Future;

use log::{debug, error, info};
use reqwest::multipart::Form;
use reqwest::{Client, Url};

use crate::config::ClientConfig;
use crate::form::error::RequestFailure;
use crate::form::record::InputRecord;
use crate::prediction::PredictionResult;

/// Anything that can turn an input record into a prediction.
///
/// [`PredictionClient`] is the HTTP implementation; tests substitute their own.
pub trait Predictor: Send + Sync {
    fn predict(
        &self,
        record: &InputRecord,
    ) -> impl Future<Output = Result<PredictionResult, RequestFailure>> + Send;
}

/// HTTP client for the prediction service.
///
/// Each call sends one `POST` with a `multipart/form-data` body holding one
/// text part per field. No retries are made.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: Client,
    endpoint: Url,
}

impl PredictionClient {
    /// Creates a client for the default endpoint with no timeout
    pub fn new_default() -> Result<Self, RequestFailure> {
        Self::new(ClientConfig::default())
    }

    pub fn new(config: ClientConfig) -> Result<Self, RequestFailure> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends `record` to the service and parses the verdict.
    ///
    /// # Returns
    /// * `Ok(PredictionResult)` for a 2xx response with a well-formed body
    /// * `Err(RequestFailure::Transport)` when the request could not complete
    /// * `Err(RequestFailure::Status)` for any non-2xx response
    /// * `Err(RequestFailure::MalformedBody)` when the body is not a prediction
    pub async fn request_prediction(
        &self,
        record: &InputRecord,
    ) -> Result<PredictionResult, RequestFailure> {
        info!("Requesting prediction from {}", self.endpoint);
        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(encode_form(record))
            .send()
            .await
            .map_err(|e| {
                error!("Prediction request to {} failed: {}", self.endpoint, e);
                RequestFailure::Transport(e)
            })?;

        let status = response.status();
        debug!("Prediction response status: {}", status);
        let body = response.text().await?;
        debug!("Received {} bytes", body.len());

        if !status.is_success() {
            error!("Prediction service answered {}: {}", status, body);
            return Err(RequestFailure::Status { status, body });
        }

        let result: PredictionResult = serde_json::from_str(&body).map_err(|e| {
            error!("Could not parse prediction response: {}", e);
            RequestFailure::MalformedBody(e)
        })?;
        Ok(result)
    }
}

impl Predictor for PredictionClient {
    async fn predict(&self, record: &InputRecord) -> Result<PredictionResult, RequestFailure> {
        self.request_prediction(record).await
    }
}

/// Encodes the record as a multipart form: one text part per field, in form
/// order, named by the field's wire name and holding its literal value.
///
/// reqwest sets `Content-Type: multipart/form-data; boundary=...` from this.
pub fn encode_form(record: &InputRecord) -> Form {
    record.iter().fold(Form::new(), |form, (field, value)| {
        form.text(field.name(), value.to_string())
    })
}

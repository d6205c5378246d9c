/// Message shown when either numeric field fails to parse.
pub const NUMERIC_FIELDS_MESSAGE: &str = "HOOD_158 and BIKE_COST must be numeric values.";

/// Message shown for every failed exchange with the prediction service.
pub const REQUEST_FAILED_MESSAGE: &str = "Error fetching prediction. Please check the input values.";

/// Errors that can occur while filling in or submitting the prediction form.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// A numeric field did not parse; raised before any network I/O
    #[error("{0}")]
    ValidationError(String),
    /// Submission blocked because required fields are empty
    #[error("Please fill out the required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    /// A field name that is not one of the ten form fields
    #[error("Unknown form field: {0}")]
    UnknownField(String),
    /// Any failure of the exchange with the prediction service
    #[error("Prediction request failed: {0}")]
    RequestError(#[from] RequestFailure),
}

impl FormError {
    /// The message a user sees for this error.
    ///
    /// Request failures all collapse to the same generic message; the cause is
    /// only available through `Display`/`source` for logging.
    pub fn user_message(&self) -> String {
        match self {
            Self::ValidationError(msg) => msg.clone(),
            Self::RequestError(_) => REQUEST_FAILED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// The underlying cause of a failed prediction request.
#[derive(Debug, thiserror::Error)]
pub enum RequestFailure {
    /// Connection refused, timeout, TLS or other transport problem
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-2xx status
    #[error("unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    /// A 2xx response whose body is not a prediction result
    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

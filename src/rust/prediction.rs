use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Index of the "Stolen" probability in `prediction_probability`
pub const STOLEN_INDEX: usize = 0;
/// Index of the "Recovered" probability in `prediction_probability`
pub const RECOVERED_INDEX: usize = 1;

/// The prediction service's verdict for one case.
///
/// Deserializes from
/// `{"predicted_class": "STOLEN", "prediction_probability": [0.82, 0.18]}`.
/// The class label may also be a JSON number or boolean (`"predicted_class": 1`)
/// and is kept as its text. A probability array of any length other than two
/// is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(deserialize_with = "class_label")]
    pub predicted_class: String,
    pub prediction_probability: [f64; 2],
}

impl PredictionResult {
    pub fn new(predicted_class: impl Into<String>, stolen: f64, recovered: f64) -> Self {
        Self {
            predicted_class: predicted_class.into(),
            prediction_probability: [stolen, recovered],
        }
    }

    /// Probability that the bike stays stolen
    pub fn stolen(&self) -> f64 {
        self.prediction_probability[STOLEN_INDEX]
    }

    /// Probability that the bike is recovered
    pub fn recovered(&self) -> f64 {
        self.prediction_probability[RECOVERED_INDEX]
    }
}

/// Accepts any JSON scalar as a class label.
fn class_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(label) => Ok(label),
        Value::Number(n) if n.is_f64() => Ok(n.as_f64().map(|f| f.to_string()).unwrap_or_default()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a class label, got {}",
            other
        ))),
    }
}

/// Rounds to two decimals with ties away from zero, so 0.125 becomes 0.13.
///
/// `{:.2}` alone rounds exact binary ties to even (0.125 -> "0.12").
pub fn round_two_places(p: f64) -> f64 {
    (p * 100.0).round() / 100.0
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Stolen: {:.2} | Recovered: {:.2})",
            self.predicted_class,
            round_two_places(self.stolen()),
            round_two_places(self.recovered())
        )
    }
}

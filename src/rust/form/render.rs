use std::fmt::Write;

use super::field::Field;
use super::state::FormState;
use crate::prediction::{round_two_places, PredictionResult};

/// Renders what the user should currently see below the form.
///
/// The error message if there is one, otherwise the prediction block, otherwise
/// an empty string. A pending request renders as nothing.
pub fn render_outcome(state: &FormState) -> String {
    if let Some(error) = state.error() {
        return error.to_string();
    }
    match state.result() {
        Some(result) => render_result(result),
        None => String::new(),
    }
}

/// The prediction block, probabilities rounded to two decimals.
pub fn render_result(result: &PredictionResult) -> String {
    format!(
        "Prediction Results:\n\
         Predicted Class: {}\n\
         Prediction Probability:\n\
         Stolen: {:.2} | Recovered: {:.2}",
        result.predicted_class,
        round_two_places(result.stolen()),
        round_two_places(result.recovered())
    )
}

/// One line per field: label, then the value or its placeholder hint.
pub fn render_form(state: &FormState) -> String {
    let width = Field::ALL.iter().map(|f| f.label().len()).max().unwrap_or(0);
    let mut out = String::new();
    for (field, value) in state.record().iter() {
        let shown = if value.is_empty() {
            format!("({})", field.placeholder())
        } else {
            value.to_string()
        };
        let _ = writeln!(out, "{:<width$}  {}", format!("{}:", field.label()), shown, width = width + 1);
    }
    out
}

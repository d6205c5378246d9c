pub mod error;
pub mod field;
mod form;
pub mod record;
pub mod render;
pub mod state;

pub use error::{FormError, RequestFailure};
pub use field::{Field, InputKind};
pub use form::PredictionForm;
pub use record::InputRecord;
pub use state::{Action, Effect, FormState, Outcome, PendingRequest, Phase, Resolution};

//! Client for a bicycle-theft prediction service.
//!
//! A [`PredictionForm`] collects the ten case attributes, checks that every
//! field is filled in and that `HOOD_158` and `BIKE_COST` are numeric, posts
//! them as a `multipart/form-data` body and keeps either the returned
//! [`PredictionResult`] or an error message for display.
//!
//! # Basic Usage
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use bikestatus::{ClientConfig, Field, PredictionForm};
//!
//! let form = PredictionForm::with_config(ClientConfig::from_env()?)?;
//! for (field, value) in [
//!     (Field::PrimaryOffence, "THEFT UNDER"),
//!     (Field::OccDow, "Wednesday"),
//!     (Field::ReportDow, "Friday"),
//!     (Field::Hood158, "168"),
//!     (Field::BikeMake, "GIANT"),
//!     (Field::BikeType, "RG"),
//!     (Field::BikeColour, "GRN"),
//!     (Field::BikeCost, "4500"),
//!     (Field::LocationType, "Commercial Places"),
//!     (Field::PremisesType, "Outside"),
//! ] {
//!     form.update_field(field, value).await;
//! }
//!
//! let _ = form.submit().await;
//! println!("{}", form.render().await);
//! # Ok(())
//! # }
//! ```
//!
//! # State
//!
//! The form's state lives in a [`FormState`] that only changes through
//! [`FormState::reduce`]. It can be driven directly, without any network,
//! when the caller wants to own the I/O:
//!
//! ```
//! use bikestatus::{Action, Effect, Field, FormState};
//!
//! let (state, effect) = FormState::new().reduce(Action::Submit);
//! assert!(matches!(effect, Effect::Blocked(_)));
//! assert_eq!(state.latest_seq(), 0);
//!
//! let (state, _) = state.reduce(Action::FieldChanged {
//!     field: Field::BikeMake,
//!     value: "GIANT".into(),
//! });
//! assert_eq!(state.record().get(Field::BikeMake), "GIANT");
//! ```

pub mod client;
pub mod config;
pub mod form;
pub mod prediction;

pub use client::{encode_form, PredictionClient, Predictor};
pub use config::{ClientConfig, ConfigError};
pub use form::{
    Action, Effect, Field, FormError, FormState, InputKind, InputRecord, Outcome,
    PendingRequest, Phase, PredictionForm, RequestFailure, Resolution,
};
pub use prediction::PredictionResult;

pub fn init_logger() {
    env_logger::init();
}

use log::debug;

use super::error::{FormError, NUMERIC_FIELDS_MESSAGE};
use super::field::{Field, InputKind};

/// The ten-field case record a user fills in before asking for a prediction.
///
/// A fresh record has every field empty. Values are kept exactly as typed,
/// numeric fields included, since they are sent to the service as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRecord {
    values: [String; Field::COUNT],
}

impl InputRecord {
    /// Creates a record with all fields empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(field, value)` pairs; fields not mentioned stay empty.
    ///
    /// # Example
    /// ```
    /// use bikestatus::{Field, InputRecord};
    ///
    /// let record = InputRecord::from_pairs([
    ///     (Field::BikeMake, "GIANT"),
    ///     (Field::BikeCost, "4500"),
    /// ]);
    /// assert_eq!(record.get(Field::BikeMake), "GIANT");
    /// assert_eq!(record.get(Field::OccDow), "");
    /// ```
    pub fn from_pairs<I, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Field, V)>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (field, value) in pairs {
            record.set(field, value);
        }
        record
    }

    /// Replaces the value of exactly one field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Like [`InputRecord::set`], but addresses the field by its wire name.
    pub fn set_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field: Field = name.parse()?;
        self.set(field, value);
        Ok(())
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Iterates `(field, value)` in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.iter().map(move |&field| (field, self.get(field)))
    }

    /// Wire names of the fields that are still empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field.name())
            .collect()
    }

    /// Checks the record is ready to be sent.
    ///
    /// Empty fields block submission first; after that both numeric fields
    /// must parse as numbers.
    ///
    /// # Returns
    /// * `Err(FormError::MissingFields)` if any field is empty
    /// * `Err(FormError::ValidationError)` if `HOOD_158` or `BIKE_COST` is not numeric
    pub fn validate(&self) -> Result<(), FormError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            debug!("Submission blocked, {} required fields empty", missing.len());
            return Err(FormError::MissingFields(missing));
        }

        let bad_numeric = self
            .iter()
            .filter(|(field, _)| field.kind() == InputKind::Number)
            .find(|(_, value)| !is_numeric(value));
        if let Some((field, value)) = bad_numeric {
            debug!("Field {} is not numeric: {:?}", field, value);
            return Err(FormError::ValidationError(NUMERIC_FIELDS_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// Whether `value` reads as a number once surrounding whitespace is dropped.
///
/// NaN is rejected; infinities and exponent notation are accepted.
pub fn is_numeric(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|n| !n.is_nan())
        .unwrap_or(false)
}

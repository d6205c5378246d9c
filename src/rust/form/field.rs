use std::fmt;
use std::str::FromStr;

use super::error::FormError;

/// How a field is entered and checked before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Free text, only required to be non-empty
    Text,
    /// Must parse as a number, but is still sent as its literal text
    Number,
}

/// One of the ten case attributes the prediction service expects.
///
/// The declaration order is the order fields are displayed in and the order
/// of parts in the multipart body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    PrimaryOffence,
    OccDow,
    ReportDow,
    Hood158,
    BikeMake,
    BikeType,
    BikeColour,
    BikeCost,
    LocationType,
    PremisesType,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 10] = [
        Field::PrimaryOffence,
        Field::OccDow,
        Field::ReportDow,
        Field::Hood158,
        Field::BikeMake,
        Field::BikeType,
        Field::BikeColour,
        Field::BikeCost,
        Field::LocationType,
        Field::PremisesType,
    ];

    /// Number of fields in an input record
    pub const COUNT: usize = Self::ALL.len();

    /// The wire name, used as the multipart part name.
    pub fn name(self) -> &'static str {
        match self {
            Field::PrimaryOffence => "PRIMARY_OFFENCE",
            Field::OccDow => "OCC_DOW",
            Field::ReportDow => "REPORT_DOW",
            Field::Hood158 => "HOOD_158",
            Field::BikeMake => "BIKE_MAKE",
            Field::BikeType => "BIKE_TYPE",
            Field::BikeColour => "BIKE_COLOUR",
            Field::BikeCost => "BIKE_COST",
            Field::LocationType => "LOCATION_TYPE",
            Field::PremisesType => "PREMISES_TYPE",
        }
    }

    /// Human-readable label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::PrimaryOffence => "Primary Offence",
            Field::OccDow => "Occurrence Day of Week",
            Field::ReportDow => "Report Day of Week",
            Field::Hood158 => "HOOD_158",
            Field::BikeMake => "Bike Make",
            Field::BikeType => "Bike Type",
            Field::BikeColour => "Bike Colour",
            Field::BikeCost => "Bike Cost",
            Field::LocationType => "Location Type",
            Field::PremisesType => "Premises Type",
        }
    }

    /// An example value, shown as a hint while the field is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            Field::PrimaryOffence => "e.g., THEFT UNDER",
            Field::OccDow => "e.g., Wednesday",
            Field::ReportDow => "e.g., Friday",
            Field::Hood158 => "e.g., 168",
            Field::BikeMake => "e.g., GIANT",
            Field::BikeType => "e.g., RG",
            Field::BikeColour => "e.g., GRN",
            Field::BikeCost => "e.g., 4500",
            Field::LocationType => "e.g., Commercial Places",
            Field::PremisesType => "e.g., Outside",
        }
    }

    pub fn kind(self) -> InputKind {
        match self {
            Field::Hood158 | Field::BikeCost => InputKind::Number,
            _ => InputKind::Text,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = FormError;

    /// Parses a wire name such as `BIKE_COST`. Matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

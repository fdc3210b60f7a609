use serde::{Deserialize, Serialize};
use std::fmt;

/// A metered electricity customer.
///
/// The meter number is the lookup key but is not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub name: String,
    pub meter_number: String,
    pub units_consumed: f64,
}

impl CustomerRecord {
    pub fn new(
        name: impl Into<String>,
        meter_number: impl Into<String>,
        units_consumed: f64,
    ) -> Self {
        Self {
            name: name.into(),
            meter_number: meter_number.into(),
            units_consumed,
        }
    }

    /// Exact, case-sensitive meter comparison.
    pub fn has_meter(&self, meter_number: &str) -> bool {
        self.meter_number == meter_number
    }
}

/// Parse free-form units input.
/// Example: "100" -> 100.0, " 42.5 " -> 42.5, "1e3" -> 1000.0
pub fn parse_units(input: &str) -> Result<f64, ParseUnitsError> {
    let units: f64 = input
        .trim()
        .parse()
        .map_err(|_| ParseUnitsError::InvalidFormat)?;

    if !units.is_finite() {
        return Err(ParseUnitsError::NotFinite);
    }
    if units < 0.0 {
        return Err(ParseUnitsError::Negative);
    }
    // Normalize -0.0
    Ok(units + 0.0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseUnitsError {
    InvalidFormat,
    NotFinite,
    Negative,
}

impl fmt::Display for ParseUnitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseUnitsError::InvalidFormat => write!(f, "not a number"),
            ParseUnitsError::NotFinite => write!(f, "must be a finite number"),
            ParseUnitsError::Negative => write!(f, "must not be negative"),
        }
    }
}

impl std::error::Error for ParseUnitsError {}

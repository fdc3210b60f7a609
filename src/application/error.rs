use thiserror::Error;

use crate::domain::ParseUnitsError;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid units '{input}': {reason}")]
    InvalidUnits {
        input: String,
        #[source]
        reason: ParseUnitsError,
    },

    #[error("Meter number must not be empty")]
    EmptyQuery,

    #[error("Customer not found: {0}")]
    NotFound(String),
}

use thiserror::Error;

use crate::rfc::rrule::parse::FormatError;

/// Recurrence rule construction, expansion and codec errors
#[derive(Error, Debug)]
pub enum RfcError {
    /// A value is outside its accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation does not apply to the builder's current period.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Timezone error: {0}")]
    Timezone(String),

    #[error(transparent)]
    Core(#[from] recur_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;

use thiserror::Error;

/// Application-level errors (CLI layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    RfcError(#[from] recur_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] recur_core::error::CoreError),

    #[error("Invalid hex input: {0}")]
    HexError(#[from] hex::FromHexError),

    #[error("JSON output failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Requested {requested} occurrences, at most {max} are allowed")]
    AmountTooLarge { requested: usize, max: usize },
}

pub type AppResult<T> = std::result::Result<T, AppError>;

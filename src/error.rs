use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuiverError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Not Ready: {missing} of {total} arrows are still unscored")]
    NotReady { missing: usize, total: usize },

    #[error("Unknown Session: '{0}'")]
    UnknownSession(String),

    #[error("Session store lock poisoned")]
    LockPoisoned,
}

impl QuiverError {
    /// True for the routine "finish scoring first" condition, as opposed to bad input.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, QuiverError::NotReady { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, QuiverError::InvalidInput(_))
    }
}

pub type QvResult<T> = Result<T, QuiverError>;

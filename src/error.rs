use crate::persistence::StorageError;
use thiserror::Error;

/// Errors surfaced by core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// User input was rejected; no state was changed
    #[error("{0}")]
    Validation(String),

    /// Reading or writing the data file failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }
}

#[cfg(test)]
impl CoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

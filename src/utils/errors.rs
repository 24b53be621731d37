use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiggingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required input: {}", .path.display())]
    MissingInput { path: PathBuf },

    #[error("Metadata error: {message}")]
    Metadata { message: String },

    #[error("Invalid build plan: {message}")]
    InvalidPlan { message: String },
}

impl RiggingError {
    /// Create a metadata error
    pub fn metadata(message: impl Into<String>) -> Self {
        Self::Metadata {
            message: message.into(),
        }
    }

    /// Create a plan-invariant error
    pub fn invalid_plan(message: impl Into<String>) -> Self {
        Self::InvalidPlan {
            message: message.into(),
        }
    }

    /// Create a missing-input error for a required source file
    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput { path: path.into() }
    }
}

pub type Result<T> = std::result::Result<T, RiggingError>;

impl From<serde_json::Error> for RiggingError {
    fn from(err: serde_json::Error) -> Self {
        RiggingError::metadata(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_display() {
        let err = RiggingError::missing_input("src/index.js");
        assert!(err.to_string().contains("src/index.js"));
    }

    #[test]
    fn test_json_error_converts_to_metadata() {
        let bad: std::result::Result<serde_json::Value, _> = serde_json::from_str("{nope");
        let err: RiggingError = bad.unwrap_err().into();
        assert!(matches!(err, RiggingError::Metadata { .. }));
    }
}

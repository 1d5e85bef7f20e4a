use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CriteriaError {
    /// Out-of-domain value passed to a setter or conversion
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Expression operation name outside the fixed vocabulary
    #[error("Undefined operation: {0}")]
    UndefinedOperation(String),
}

/// Result type for criteria operations
pub type Result<T> = std::result::Result<T, CriteriaError>;

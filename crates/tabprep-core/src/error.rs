use thiserror::Error;

/// Core error type for schema and configuration failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PrepError {
    #[error("invalid attribute '{attribute}': expected {expected}")]
    SchemaError {
        attribute: String,
        expected: &'static str,
    },

    #[error("invalid attribute '{0}': no values")]
    EmptyDomain(String),

    #[error("attribute '{0}' not found in domain")]
    MissingAttribute(String),

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub type PrepResult<T> = Result<T, PrepError>;

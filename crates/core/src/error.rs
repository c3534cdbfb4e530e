use thiserror::Error;

pub type BrewResult<T> = Result<T, BrewError>;

#[derive(Error, Debug)]
pub enum BrewError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl BrewError {
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        BrewError::NotFound { resource, id }
    }

    /// Whether the error was caused by caller input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BrewError::InvalidArgument(_) | BrewError::Validation(_) | BrewError::NotFound { .. }
        )
    }
}

impl From<config::ConfigError> for BrewError {
    fn from(err: config::ConfigError) -> Self {
        BrewError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = BrewError::not_found("customer", 42);
        assert_eq!(err.to_string(), "customer 42 not found");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_internal_is_not_client_error() {
        let err = BrewError::Internal(anyhow::anyhow!("boom"));
        assert!(!err.is_client_error());
    }
}

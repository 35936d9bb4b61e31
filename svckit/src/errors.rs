use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FabricError {
    /// Data-validation failure: the identifier is not one of the known business cases.
    #[error("Validation error: unknown business case '{0}'")]
    UnknownBusinessCase(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Timeout error: operation timed out after {0:?}")]
    TimeoutError(Duration),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Pipeline {run_id} failed: {reason}")]
    PipelineFailed { run_id: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<config::ConfigError> for FabricError {
    fn from(err: config::ConfigError) -> Self {
        FabricError::ConfigError(err.to_string())
    }
}

impl From<anyhow::Error> for FabricError {
    fn from(err: anyhow::Error) -> Self {
        FabricError::Unknown(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_case_message_names_input() {
        let err = FabricError::UnknownBusinessCase("Marketing".to_string());
        assert_eq!(err.to_string(), "Validation error: unknown business case 'Marketing'");
    }

    #[test]
    fn test_pipeline_failed_message() {
        let err = FabricError::PipelineFailed {
            run_id: "run-4242".to_string(),
            reason: "activity copy_sales timed out".to_string(),
        };
        assert_eq!(err.to_string(), "Pipeline run-4242 failed: activity copy_sales timed out");
    }
}

/// Error types for the Mailgate proxy
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailgateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Vendor API error: {0}")]
    Vendor(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl MailgateError {
    /// Whether the error indicates a deployment defect rather than a
    /// caller mistake. Config errors abort the invocation instead of
    /// being folded into the 400 response contract.
    pub fn is_deployment_defect(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// Implement conversions for common error types
impl From<serde_json::Error> for MailgateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Vendor(format!("Invalid vendor response: {}", err))
    }
}

impl From<std::env::VarError> for MailgateError {
    fn from(err: std::env::VarError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MailgateError::Validation("Email is required".to_string());
        assert_eq!(err.to_string(), "Validation error: Email is required");
    }

    #[test]
    fn test_deployment_defects() {
        assert!(MailgateError::Config("missing key".to_string()).is_deployment_defect());
        assert!(!MailgateError::Validation("bad email".to_string()).is_deployment_defect());
        assert!(!MailgateError::Transport("timed out".to_string()).is_deployment_defect());
    }
}

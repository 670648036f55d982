use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConectaError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Email provider rejected message: {message}")]
    SendError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Validation,
    Provider,
    System,
}

impl ConectaError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) => ErrorCategory::Network,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::SendError { .. } => ErrorCategory::Provider,
            Self::IoError(_) | Self::SerializationError(_) | Self::InternalError { .. } => {
                ErrorCategory::System
            }
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) => "Could not reach the email provider".to_string(),
            Self::MissingConfigError { field } => format!("Missing required setting: {}", field),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
            Self::ValidationError { message } => format!("Invalid input: {}", message),
            Self::SendError { message } => format!("Email provider error: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the provider endpoint",
            ErrorCategory::Configuration => {
                "Check the configuration file, command-line flags and environment variables"
            }
            ErrorCategory::Validation => "Fix the input and try again",
            ErrorCategory::Provider => "Verify the API key and the sender domain with the provider",
            ErrorCategory::System => "Check file paths and permissions",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Validation => 2,
            ErrorCategory::Configuration => 3,
            ErrorCategory::Network | ErrorCategory::Provider => 4,
            ErrorCategory::System => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConectaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_and_exit_codes() {
        let err = ConectaError::validation("recipients cannot be empty");
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            err.to_string(),
            "Validation error: recipients cannot be empty"
        );

        let err = ConectaError::MissingConfigError {
            field: "api_key".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.user_friendly_message().contains("api_key"));
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway returned {status}: {message}")]
    Gateway { status: u16, message: String },

    #[error("Gateway returned an empty completion")]
    EmptyCompletion,

    #[error("{service} service returned {status}: {body}")]
    ServiceStatus {
        service: String,
        status: u16,
        body: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Upstream,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AgentError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AgentError::Http(_) | AgentError::ServiceStatus { .. } => ErrorCategory::Network,
            AgentError::Gateway { .. } | AgentError::EmptyCompletion => ErrorCategory::Upstream,
            AgentError::Serialization(_) => ErrorCategory::Data,
            AgentError::ConfigError { .. } | AgentError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            AgentError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Upstream | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AgentError::Http(_) => "Could not reach the remote service".to_string(),
            AgentError::Gateway { status, .. } => {
                format!("The language model provider rejected the request (HTTP {})", status)
            }
            AgentError::EmptyCompletion => "The language model returned no text".to_string(),
            AgentError::ServiceStatus {
                service, status, ..
            } => format!("The {} service failed (HTTP {})", service, status),
            AgentError::Io(e) => format!("File system error: {}", e),
            AgentError::Serialization(_) => "Received data in an unexpected format".to_string(),
            AgentError::ConfigError { message } => format!("Configuration problem: {}", message),
            AgentError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AgentError::Http(_) | AgentError::ServiceStatus { .. } => {
                "Check that both agents are running and the URLs are correct"
            }
            AgentError::Gateway { status: 401, .. } | AgentError::Gateway { status: 403, .. } => {
                "Check OPENAI_API_KEY / GROQ_API_KEY"
            }
            AgentError::Gateway { .. } | AgentError::EmptyCompletion => {
                "Try again later or switch the model in the config file"
            }
            AgentError::Serialization(_) => "Check that client and agents run the same version",
            AgentError::Io(_) => "Check file paths and permissions",
            AgentError::ConfigError { .. } | AgentError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and retry"
            }
        }
    }
}

/// 所有未處理的錯誤都以 500 回傳給呼叫端
impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        tracing::error!("❌ Request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_errors_are_upstream() {
        let err = AgentError::Gateway {
            status: 401,
            message: "invalid api key".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Upstream);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("API_KEY"));
    }

    #[test]
    fn test_service_status_message() {
        let err = AgentError::ServiceStatus {
            service: "review".to_string(),
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.to_string(), "review service returned 500: boom");
        assert_eq!(err.user_friendly_message(), "The review service failed (HTTP 500)");
    }

    #[test]
    fn test_into_response_is_internal_server_error() {
        let response = AgentError::EmptyCompletion.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

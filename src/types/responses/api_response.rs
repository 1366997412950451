use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorDetails {
    pub fn new(code: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            code: code.into(),
            details,
        }
    }
}

/// Envelope for every JSON body the server returns.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            message: message.into(),
            error: None,
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>, error: ErrorDetails) -> Self {
        ApiResponse {
            message: message.into(),
            error: Some(error),
            data: None,
        }
    }
}

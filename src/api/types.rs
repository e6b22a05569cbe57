//! API request and response types

use serde::{Deserialize, Serialize};

/// Response for session creation
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

/// Visitor input; option buttons submit their label here too
#[derive(Debug, Deserialize)]
pub struct InputRequest {
    pub text: String,
}

/// Response for input action
#[derive(Debug, Serialize)]
pub struct InputResponse {
    pub queued: bool,
}

/// Response for lifecycle actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

//! Plain `{ "message": ... }` response body

use serde::{Deserialize, Serialize};

/// Body of the health check and delete confirmations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

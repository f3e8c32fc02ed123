use serde::{Deserialize, Serialize};

// Body of a successful count request
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct CountResponse {
    pub count: u64,
}

// Body of every error response
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

use serde::{Deserialize, Serialize};

// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: Option<String>,
    pub message: Option<String>,
    pub operator_id: Option<String>,
    pub username: Option<String>,
}

impl LoginResponse {
    pub fn success(token: String, operator_id: String, username: String) -> Self {
        Self {
            success: true,
            token: Some(token),
            message: None,
            operator_id: Some(operator_id),
            username: Some(username),
        }
    }
}

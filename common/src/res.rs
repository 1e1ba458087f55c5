// keep in sync with api.rs of backend
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultCode {
    Ok,
    Nok,
}

/// Envelope of every failed request.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct ErrorResponse {
    pub result: ResultCode,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            result: ResultCode::Nok,
            message: message.into(),
        }
    }
}

/// Public view of an account, the password hash never leaves the backend.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct AccountInfo {
    pub id: i32,
    pub username: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct RegisterResponse {
    pub result: ResultCode,
    pub account: AccountInfo,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct LoginResponse {
    pub result: ResultCode,
    pub token: String,
    pub account: AccountInfo,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct InfoResponse {
    pub result: ResultCode,
    pub username: String,
    pub issued_at: i64,  // s
    pub expires_at: i64, // s
}

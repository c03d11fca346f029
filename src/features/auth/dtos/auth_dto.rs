use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for sending a one-time login code
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Request DTO for confirming a one-time login code
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ConfirmRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(equal = 6, message = "Code must be exactly 6 characters"))]
    pub code: String,
}

/// Response DTO after a login code has been sent
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginCodeSentDto {
    pub email: String,
    /// Seconds to wait before requesting another code
    pub cooldown_secs: u64,
}

/// Console session state
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionDto {
    pub authenticated: bool,
}

/// Token payload returned by the auth service on confirm and refresh
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default, rename = "token_type")]
    pub _token_type: Option<String>,
}

use crate::core::error::{AppError, Result};
use crate::core::remote;
use crate::features::auth::clients::AuthenticatedClient;
use crate::features::auth::dtos::{
    ConfirmRequestDto, LoginCodeSentDto, LoginRequestDto, SessionDto, TokenResponse,
};
use crate::shared::constants::{AUTH_CONFIRM_PATH, AUTH_LOGIN_PATH, LOGIN_COOLDOWN_SECS};
use reqwest::{Method, StatusCode};
use serde_json::json;
use std::sync::Arc;

/// Service for the operator's one-time-code sign-in
pub struct AuthService {
    client: Arc<AuthenticatedClient>,
}

impl AuthService {
    pub fn new(client: Arc<AuthenticatedClient>) -> Self {
        Self { client }
    }

    /// Ask the auth service to e-mail a one-time code
    pub async fn request_code(&self, dto: LoginRequestDto) -> Result<LoginCodeSentDto> {
        let email = dto.email.trim().to_string();

        tracing::debug!("Requesting login code for {}", email);

        let response = self
            .client
            .send_json(Method::POST, AUTH_LOGIN_PATH, &json!({ "email": email }))
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::RateLimitExceeded(format!(
                "Too many code requests, try again in {} seconds",
                LOGIN_COOLDOWN_SECS
            )));
        }

        remote::expect_success(response).await?;

        tracing::info!("Login code sent to {}", email);

        Ok(LoginCodeSentDto {
            email,
            cooldown_secs: LOGIN_COOLDOWN_SECS,
        })
    }

    /// Exchange a one-time code for an access token and open the session
    pub async fn confirm(&self, dto: ConfirmRequestDto) -> Result<SessionDto> {
        let email = dto.email.trim().to_string();

        let response = self
            .client
            .send_json(
                Method::POST,
                AUTH_CONFIRM_PATH,
                &json!({ "email": email, "code": dto.code.trim() }),
            )
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::RateLimitExceeded(
                "Too many attempts, try again later".to_string(),
            ));
        }
        if !status.is_success() {
            tracing::debug!("Login code rejected for {}: HTTP {}", email, status);
            return Err(AppError::Unauthorized(
                "Invalid or expired code".to_string(),
            ));
        }

        let token: TokenResponse = remote::expect_json(response).await?;
        let access_token = token.access_token.filter(|t| !t.is_empty()).ok_or_else(|| {
            AppError::MalformedResponse("confirm response has no access_token".to_string())
        })?;

        self.client.session().set_token(access_token).await;
        tracing::info!("Console session opened for {}", email);

        Ok(SessionDto {
            authenticated: true,
        })
    }

    pub async fn logout(&self) -> SessionDto {
        self.client.session().clear().await;
        tracing::info!("Console session closed");
        SessionDto {
            authenticated: false,
        }
    }

    pub async fn session(&self) -> SessionDto {
        SessionDto {
            authenticated: self.client.session().is_authenticated().await,
        }
    }
}

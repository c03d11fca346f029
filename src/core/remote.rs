//! Turning catalog/auth service responses into typed results.
//!
//! Non-2xx answers surface the body's `detail` field verbatim when the
//! service provides one, otherwise a generic `HTTP <status>` message.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::core::error::{AppError, Result};

/// Human-readable failure message for a non-2xx body
pub fn detail_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail").cloned());

    match detail {
        Some(serde_json::Value::String(text)) if !text.is_empty() => text,
        Some(serde_json::Value::String(_)) | Some(serde_json::Value::Null) | None => {
            format!("HTTP {}", status.as_u16())
        }
        Some(other) => other.to_string(),
    }
}

/// Convert a failed response into `AppError::Remote`
pub async fn failure(response: Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = detail_message(status, &body);

    tracing::error!("Remote API error: HTTP {} - {}", status, message);

    AppError::Remote {
        status: status.as_u16(),
        message,
    }
}

/// Require a 2xx answer and decode its JSON body
pub async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    if !response.status().is_success() {
        return Err(failure(response).await);
    }

    let body = response.bytes().await?;
    serde_json::from_slice::<T>(&body).map_err(|e| {
        tracing::error!("Failed to parse remote response: {}", e);
        AppError::MalformedResponse(e.to_string())
    })
}

/// Require a 2xx answer and ignore its body (e.g. 204 after DELETE)
pub async fn expect_success(response: Response) -> Result<()> {
    if !response.status().is_success() {
        return Err(failure(response).await);
    }
    Ok(())
}

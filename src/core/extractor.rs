use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// Header an operator client sets to confirm a destructive action
pub const CONFIRM_HEADER: &str = "x-confirm-delete";

/// Custom JSON extractor that provides consistent error responses
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(AppJsonRejection)
    }
}

pub struct AppJsonRejection(JsonRejection);

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            JsonRejection::JsonDataError(err) => format!("Invalid form data: {}", err),
            JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err),
            JsonRejection::MissingJsonContentType(err) => {
                format!("Missing JSON content type: {}", err)
            }
            _ => "Failed to parse JSON body".to_string(),
        };

        AppError::BadRequest(message).into_response()
    }
}

/// Operator confirmation for destructive actions.
///
/// Confirmed when the query string carries `confirm=true` or the
/// `X-Confirm-Delete: true` header is present. Never rejects: handlers
/// pass the flag on and the service decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation(pub bool);

impl<S> FromRequestParts<S> for Confirmation
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let by_header = parts
            .headers
            .get(CONFIRM_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(is_truthy)
            .unwrap_or(false);

        let by_query = parts
            .uri
            .query()
            .map(|q| {
                q.split('&')
                    .filter_map(|pair| pair.split_once('='))
                    .any(|(key, value)| key == "confirm" && is_truthy(value))
            })
            .unwrap_or(false);

        Ok(Confirmation(by_header || by_query))
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    async fn confirmation_for(request: HttpRequest<()>) -> bool {
        let (mut parts, _) = request.into_parts();
        Confirmation::from_request_parts(&mut parts, &())
            .await
            .map(|c| c.0)
            .unwrap_or(false)
    }

    #[tokio::test]
    async fn test_confirmation_from_query() {
        let request = HttpRequest::builder()
            .uri("/api/categories/3?confirm=true")
            .body(())
            .unwrap();
        assert!(confirmation_for(request).await);
    }

    #[tokio::test]
    async fn test_confirmation_from_header() {
        let request = HttpRequest::builder()
            .uri("/api/categories/3")
            .header(CONFIRM_HEADER, "yes")
            .body(())
            .unwrap();
        assert!(confirmation_for(request).await);
    }

    #[tokio::test]
    async fn test_missing_confirmation_is_false() {
        let request = HttpRequest::builder()
            .uri("/api/categories/3?confirm=false")
            .body(())
            .unwrap();
        assert!(!confirmation_for(request).await);
    }
}

use crate::core::config::RemoteApiConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::TokenResponse;
use crate::features::auth::session::SessionStore;
use crate::shared::constants::{
    AUTH_CONFIRM_PATH, AUTH_LOGIN_PATH, AUTH_PATH_PREFIX, AUTH_REFRESH_PATH,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

/// Paths that never carry the bearer token
fn is_public(path: &str) -> bool {
    path.starts_with(AUTH_LOGIN_PATH)
        || path.starts_with(AUTH_CONFIRM_PATH)
        || path.starts_with(AUTH_REFRESH_PATH)
}

/// HTTP client for the catalog and auth services.
///
/// Attaches the session's bearer token, and on a 401 refreshes the token
/// once (the refresh cookie lives in the cookie store) and repeats the
/// request. If the refresh fails the session is cleared and the original
/// 401 response is handed back to the caller.
pub struct AuthenticatedClient {
    http: reqwest::Client,
    config: RemoteApiConfig,
    session: Arc<SessionStore>,
}

impl AuthenticatedClient {
    pub fn new(config: RemoteApiConfig, session: Arc<SessionStore>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Auth endpoints go to the auth service, everything else to the catalog
    fn base_url_for(&self, path: &str) -> &str {
        if path.starts_with(AUTH_PATH_PREFIX) {
            &self.config.auth_base_url
        } else {
            &self.config.catalog_base_url
        }
    }

    /// Send a request without a body
    pub async fn send(&self, method: Method, path: &str) -> Result<Response> {
        self.execute(method, path, None).await
    }

    /// Send a request with a JSON body
    pub async fn send_json<B>(&self, method: Method, path: &str, body: &B) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| AppError::Internal(format!("Failed to encode request body: {}", e)))?;
        self.execute(method, path, Some(bytes)).await
    }

    async fn execute(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Response> {
        let public = is_public(path);
        let url = format!("{}{}", self.base_url_for(path), path);
        let token = if public {
            None
        } else {
            self.session.token().await
        };

        tracing::debug!("{} {}", method, url);

        let response = self
            .dispatch(&method, &url, body.clone(), token.as_deref())
            .await?;

        if public || response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::debug!("Received 401 for {}, refreshing access token", path);

        match self.refresh_access_token().await {
            Some(fresh) => {
                self.session.set_token(fresh.clone()).await;
                self.dispatch(&method, &url, body, Some(&fresh)).await
            }
            None => {
                tracing::warn!("Access token refresh failed, clearing console session");
                self.session.clear().await;
                Ok(response)
            }
        }
    }

    async fn dispatch(
        &self,
        method: &Method,
        url: &str,
        body: Option<Vec<u8>>,
        token: Option<&str>,
    ) -> Result<Response> {
        let mut request = self.http.request(method.clone(), url);
        if let Some(bytes) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(bytes);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        request.send().await.map_err(|e| {
            tracing::error!("Failed to send {} {}: {}", method, url, e);
            AppError::Transport(format!("{} {}: {}", method, url, e))
        })
    }

    /// Exchange the refresh cookie for a new access token
    async fn refresh_access_token(&self) -> Option<String> {
        let url = format!("{}{}", self.config.auth_base_url, AUTH_REFRESH_PATH);

        let response = match self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Token refresh request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Token refresh rejected: HTTP {}", response.status());
            return None;
        }

        let token = response.json::<TokenResponse>().await.ok()?;
        token.access_token.filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{spawn_server, RequestLog};
    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    fn bearer(headers: &HeaderMap) -> Option<String> {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(String::from)
    }

    /// Catalog that only accepts `fresh-token`, plus an auth service whose
    /// refresh endpoint either issues it or refuses.
    async fn fake_services(refresh_ok: bool) -> (RemoteApiConfig, RequestLog) {
        let log = RequestLog::default();

        let router = Router::new()
            .route(
                "/api/v1/categories/",
                get(
                    |State(log): State<RequestLog>, headers: HeaderMap| async move {
                        let token = bearer(&headers).unwrap_or_default();
                        log.push(format!("GET categories {}", token));
                        if token == "fresh-token" {
                            (AxumStatus::OK, Json(json!([])))
                        } else {
                            (
                                AxumStatus::UNAUTHORIZED,
                                Json(json!({"detail": "Token expired"})),
                            )
                        }
                    },
                ),
            )
            .route(
                "/api/v1/auth/refresh/",
                post(move |State(log): State<RequestLog>| async move {
                    log.push("POST refresh".to_string());
                    if refresh_ok {
                        (AxumStatus::OK, Json(json!({"access_token": "fresh-token"})))
                    } else {
                        (AxumStatus::UNAUTHORIZED, Json(json!({"detail": "no cookie"})))
                    }
                }),
            )
            .route(
                "/api/v1/auth/login/",
                post(
                    |State(log): State<RequestLog>, headers: HeaderMap, Json(body): Json<Value>| async move {
                        log.push(format!(
                            "POST login {} auth={}",
                            body["email"].as_str().unwrap_or_default(),
                            bearer(&headers).is_some()
                        ));
                        AxumStatus::OK
                    },
                ),
            )
            .with_state(log.clone());

        let base = spawn_server(router).await;
        (RemoteApiConfig::new(base.clone(), base), log)
    }

    #[tokio::test]
    async fn test_expired_token_is_refreshed_and_retried_once() {
        let (config, log) = fake_services(true).await;
        let session = Arc::new(SessionStore::new());
        session.set_token("stale-token".to_string()).await;
        let client = AuthenticatedClient::new(config, Arc::clone(&session)).unwrap();

        let response = client.send(Method::GET, "/api/v1/categories/").await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            log.entries(),
            vec![
                "GET categories stale-token",
                "POST refresh",
                "GET categories fresh-token",
            ]
        );
        assert_eq!(session.token().await.as_deref(), Some("fresh-token"));
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_session_and_returns_original_401() {
        let (config, log) = fake_services(false).await;
        let session = Arc::new(SessionStore::new());
        session.set_token("stale-token".to_string()).await;
        let client = AuthenticatedClient::new(config, Arc::clone(&session)).unwrap();

        let response = client.send(Method::GET, "/api/v1/categories/").await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(log.entries().len(), 2);
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_public_paths_never_carry_token() {
        let (config, log) = fake_services(true).await;
        let session = Arc::new(SessionStore::new());
        session.set_token("stale-token".to_string()).await;
        let client = AuthenticatedClient::new(config, session).unwrap();

        let response = client
            .send_json(
                Method::POST,
                AUTH_LOGIN_PATH,
                &json!({"email": "ops@example.com"}),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(log.entries(), vec!["POST login ops@example.com auth=false"]);
    }

    #[test]
    fn test_public_path_detection() {
        assert!(is_public("/api/v1/auth/login/"));
        assert!(is_public("/api/v1/auth/refresh/"));
        assert!(!is_public("/api/v1/categories/"));
    }
}

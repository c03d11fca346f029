use std::sync::Arc;

use reqwest::Method;

use crate::core::error::{AppError, Result};
use crate::core::remote;
use crate::features::auth::clients::AuthenticatedClient;
use crate::features::users::dtos::SaveUserDto;
use crate::features::users::models::{User, UserId, UserPayload};
use crate::shared::constants::{item_path, USERS_PATH};
use crate::shared::validation::normalized_name;

/// Console user management. Every mutation is followed by a full re-fetch.
pub struct UserService {
    client: Arc<AuthenticatedClient>,
}

impl UserService {
    pub fn new(client: Arc<AuthenticatedClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        tracing::debug!("Fetching user list");
        let response = self.client.send(Method::GET, USERS_PATH).await?;
        remote::expect_json(response).await
    }

    /// Create (`editing` is `None`) or edit a user, then re-fetch
    pub async fn save(&self, editing: Option<UserId>, dto: SaveUserDto) -> Result<Vec<User>> {
        let payload = UserPayload {
            name: normalized_name(&dto.name, "Name")?,
            email: dto.email.trim().to_string(),
            role: dto.role,
            is_active: dto.is_active,
        };

        let response = match editing {
            Some(id) => {
                tracing::debug!("Patching user {}", id);
                self.client
                    .send_json(Method::PATCH, &item_path(USERS_PATH, id), &payload)
                    .await?
            }
            None => {
                tracing::debug!("Creating user {}", payload.email);
                self.client
                    .send_json(Method::POST, USERS_PATH, &payload)
                    .await?
            }
        };
        remote::expect_success(response).await?;
        tracing::info!("Saved user {}", payload.email);

        self.list().await
    }

    pub async fn delete(&self, id: UserId, confirmed: bool) -> Result<Vec<User>> {
        if !confirmed {
            return Err(AppError::ConfirmationRequired(format!(
                "Deleting user {} must be confirmed",
                id
            )));
        }

        tracing::debug!("Deleting user {}", id);
        let response = self
            .client
            .send(Method::DELETE, &item_path(USERS_PATH, id))
            .await?;
        remote::expect_success(response).await?;
        tracing::info!("Deleted user {}", id);

        self.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RemoteApiConfig;
    use crate::features::auth::session::SessionStore;
    use crate::features::users::models::UserRole;
    use crate::shared::test_helpers::{spawn_server, RequestLog};
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
        routing::{delete, get},
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn service() -> (UserService, RequestLog) {
        let log = RequestLog::default();
        let router = Router::new()
            .route(
                "/api/v1/users/",
                get(|State(log): State<RequestLog>| async move {
                    log.push("GET".to_string());
                    Json(json!([
                        {"id": 1, "name": "Ирина", "email": "ira@example.com", "role": "manager", "is_active": true}
                    ]))
                })
                .post(|State(log): State<RequestLog>, Json(body): Json<Value>| async move {
                    log.push(format!("POST {} {}", body["email"], body["role"]));
                    (StatusCode::CREATED, Json(body))
                }),
            )
            .route(
                "/api/v1/users/{id}",
                delete(|State(log): State<RequestLog>, Path(id): Path<i64>| async move {
                    log.push(format!("DELETE {}", id));
                    if id == 404 {
                        return (StatusCode::NOT_FOUND, Json(json!({"detail": "User not found"})))
                            .into_response();
                    }
                    StatusCode::NO_CONTENT.into_response()
                }),
            )
            .with_state(log.clone());

        let base = spawn_server(router).await;
        let client = AuthenticatedClient::new(
            RemoteApiConfig::new(base.clone(), base),
            Arc::new(SessionStore::new()),
        )
        .unwrap();
        (UserService::new(Arc::new(client)), log)
    }

    #[tokio::test]
    async fn test_list_decodes_roles() {
        let (service, _) = service().await;
        let users = service.list().await.unwrap();
        assert_eq!(users[0].role, UserRole::Manager);
    }

    #[tokio::test]
    async fn test_create_trims_and_refetches() {
        let (service, log) = service().await;

        let users = service
            .save(
                None,
                SaveUserDto {
                    name: "  Пётр ".to_string(),
                    email: " petr@example.com ".to_string(),
                    role: UserRole::Viewer,
                    is_active: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(
            log.entries(),
            vec![r#"POST "petr@example.com" "viewer""#, "GET"]
        );
    }

    #[tokio::test]
    async fn test_short_name_never_reaches_service() {
        let (service, log) = service().await;

        let err = service
            .save(
                Some(1),
                SaveUserDto {
                    name: "П".to_string(),
                    email: "p@example.com".to_string(),
                    role: UserRole::Admin,
                    is_active: false,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(log.entries().is_empty());
    }

    #[tokio::test]
    async fn test_delete_confirmation_and_remote_detail() {
        let (service, log) = service().await;

        assert!(matches!(
            service.delete(1, false).await,
            Err(AppError::ConfirmationRequired(_))
        ));

        service.delete(1, true).await.unwrap();
        assert_eq!(log.entries(), vec!["DELETE 1", "GET"]);

        let err = service.delete(404, true).await.unwrap_err();
        assert_eq!(err.user_message(), "User not found");
    }
}

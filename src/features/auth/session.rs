use tokio::sync::RwLock;

/// In-memory access token for the operator's console session.
///
/// Lives for the lifetime of the process and is never persisted. The
/// refresh token stays in the HTTP client's cookie jar.
#[derive(Debug, Default)]
pub struct SessionStore {
    access_token: RwLock<Option<String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn token(&self) -> Option<String> {
        self.access_token.read().await.clone()
    }

    pub async fn set_token(&self, token: String) {
        *self.access_token.write().await = Some(token);
    }

    pub async fn clear(&self) {
        *self.access_token.write().await = None;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.access_token.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let session = SessionStore::new();
        assert!(!session.is_authenticated().await);

        session.set_token("abc".to_string()).await;
        assert_eq!(session.token().await.as_deref(), Some("abc"));

        session.clear().await;
        assert!(session.token().await.is_none());
    }
}

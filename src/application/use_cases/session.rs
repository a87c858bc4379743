use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::error::Result;
use crate::infrastructure::api::AuthApi;
use crate::infrastructure::security::TokenStore;

/// Login state for the whole process.
///
/// `is_authenticated` only checks that a token is stored. A stale token reads
/// as authenticated until the backend rejects it.
pub struct SessionUseCase {
    api: Arc<dyn AuthApi>,
    tokens: Arc<dyn TokenStore>,
}

impl SessionUseCase {
    pub fn new(api: Arc<dyn AuthApi>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let response = self.api.get_token(username, password).await?;
        self.tokens.save(&response.token)?;
        info!(username, "Logged in");
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.tokens.clear()?;
        info!("Logged out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        match self.tokens.load() {
            Ok(token) => token.is_some(),
            Err(err) => {
                warn!(error = %err, "Could not read the session token");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::fake_api::FakeConsoleApi;
    use crate::domain::error::AppError;
    use crate::infrastructure::security::MemoryTokenStore;

    #[tokio::test]
    async fn test_login_then_logout() {
        let api = Arc::new(FakeConsoleApi::new());
        let tokens = Arc::new(MemoryTokenStore::new());
        let session = SessionUseCase::new(api.clone(), tokens.clone());

        assert!(!session.is_authenticated());
        session.login("admin", "secret").await.unwrap();
        assert!(session.is_authenticated());
        assert_eq!(tokens.load().unwrap().as_deref(), Some("token-admin"));

        let calls_after_login = api.calls().len();
        session.logout().unwrap();
        assert!(!session.is_authenticated());
        // neither query touched the backend
        assert_eq!(api.calls().len(), calls_after_login);
    }

    #[tokio::test]
    async fn test_rejected_login_keeps_session_empty() {
        let api = Arc::new(FakeConsoleApi::new());
        api.fail_login();
        let session = SessionUseCase::new(api, Arc::new(MemoryTokenStore::new()));

        let err = session.login("admin", "wrong").await.unwrap_err();
        assert!(matches!(err, AppError::Http { status: 400, .. }));
        assert!(!session.is_authenticated());
    }
}

use keyring::Entry;
use tracing::debug;

use super::token_store::TokenStore;
use crate::domain::error::{AppError, Result};

const TOKEN_ACCOUNT: &str = "session-token";

/// Session token kept in the OS credential store under `service`.
pub struct KeyringTokenStore {
    service: String,
}

impl KeyringTokenStore {
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service, TOKEN_ACCOUNT).map_err(|e| {
            AppError::SecurityError(format!("Cannot open credential for {}: {}", self.service, e))
        })
    }
}

impl TokenStore for KeyringTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) if token.trim().is_empty() => Ok(None),
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AppError::SecurityError(format!(
                "Failed to read session token: {}",
                e
            ))),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        self.entry()?
            .set_password(token)
            .map_err(|e| AppError::SecurityError(format!("Failed to store session token: {}", e)))?;
        debug!(service = %self.service, "Session token stored in keyring");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(AppError::SecurityError(format!(
                "Failed to remove session token: {}",
                e
            ))),
        }
    }
}

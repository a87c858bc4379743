use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenStoreKind {
    Keyring,
    File,
    Memory,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub token_store: TokenStoreKind,
    pub keyring_service: String,
    pub data_dir: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api".to_string(),
            request_timeout_secs: 30,
            token_store: TokenStoreKind::Keyring,
            keyring_service: "endpoint-console".to_string(),
            data_dir: None,
            log_filter: "info".to_string(),
        }
    }
}

impl ConsoleConfig {
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

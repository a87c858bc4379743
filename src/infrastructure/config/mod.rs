use std::path::{Path, PathBuf};
use std::sync::Arc;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use tracing::{debug, info};

use crate::domain::console_config::{ConsoleConfig, TokenStoreKind};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::security::{
    FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore,
};
use crate::infrastructure::storage::{resolve_data_dir, token_file_path};

const DEFAULT_CONFIG_FILE: &str = "console.toml";
const ENV_PREFIX: &str = "CONSOLE_";

/// Values given on the command line; they win over every other layer.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub api_url: Option<String>,
    pub ephemeral: bool,
}

pub struct ConfigService {
    config: ConsoleConfig,
}

impl ConfigService {
    /// Defaults, then `console.toml` (or `--config`), then `CONSOLE_*`
    /// environment variables, then command line overrides.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let config_file = overrides
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if overrides.config_file.is_some() && !config_file.exists() {
            return Err(AppError::ConfigError(format!(
                "Config file {} does not exist",
                config_file.display()
            )));
        }

        let config = Self::figment(&config_file).extract::<ConsoleConfig>()?;
        let config = Self::apply_overrides(config, overrides);
        Self::validate(&config)?;

        debug!(
            api_url = %config.api_url,
            token_store = ?config.token_store,
            "Configuration loaded"
        );
        Ok(Self { config })
    }

    pub fn from_config(config: ConsoleConfig) -> Result<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    fn figment(config_file: &Path) -> Figment {
        Figment::from(Serialized::defaults(ConsoleConfig::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    fn apply_overrides(mut config: ConsoleConfig, overrides: &ConfigOverrides) -> ConsoleConfig {
        if let Some(api_url) = &overrides.api_url {
            config.api_url = api_url.clone();
        }
        if overrides.ephemeral {
            config.token_store = TokenStoreKind::Memory;
        }
        config
    }

    fn validate(config: &ConsoleConfig) -> Result<()> {
        let parsed = url::Url::parse(&config.api_url).map_err(|e| {
            AppError::ConfigError(format!("Invalid api_url '{}': {}", config.api_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::ConfigError(format!(
                "api_url must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if config.request_timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn token_store(&self) -> Result<Arc<dyn TokenStore>> {
        let store: Arc<dyn TokenStore> = match self.config.token_store {
            TokenStoreKind::Keyring => {
                Arc::new(KeyringTokenStore::new(&self.config.keyring_service))
            }
            TokenStoreKind::File => {
                let data_dir = resolve_data_dir(&self.config)?;
                let path = token_file_path(&data_dir);
                info!(path = %path.display(), "Using file token store");
                Arc::new(FileTokenStore::new(path))
            }
            TokenStoreKind::Memory => Arc::new(MemoryTokenStore::new()),
        };
        Ok(store)
    }
}

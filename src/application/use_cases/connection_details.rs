use std::sync::Arc;

use tracing::debug;

use crate::domain::endpoint::{AccountDetail, Endpoint};
use crate::domain::error::Result;
use crate::infrastructure::api::EndpointsApi;

pub const TRANSLATE_METHOD: &str = "POST";
pub const AUTH_HEADER: &str = "Authorization";
const MISSING_KEY: &str = "<no api key>";

/// How an external caller reaches an endpoint's public translate URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionDetails {
    pub url: String,
    pub method: &'static str,
    pub header: &'static str,
    pub api_key: Option<String>,
    pub account_name: String,
}

impl ConnectionDetails {
    pub fn build(api_base: &str, endpoint: &Endpoint, account: &AccountDetail) -> Self {
        Self {
            url: format!("{}/translate/{}", api_base.trim_end_matches('/'), endpoint.key),
            method: TRANSLATE_METHOD,
            header: AUTH_HEADER,
            api_key: account.api_keys.first().cloned(),
            account_name: account.name.clone(),
        }
    }

    pub fn api_key_display(&self) -> &str {
        self.api_key.as_deref().unwrap_or(MISSING_KEY)
    }

    pub fn curl_example(&self) -> String {
        format!(
            "curl -X {} '{}' \\\n  -H '{}: {}' \\\n  -H 'Content-Type: application/json' \\\n  --data '{{\"text\": \"Hello, world!\"}}'",
            self.method,
            self.url,
            self.header,
            self.api_key_display()
        )
    }
}

pub struct ConnectionDetailsUseCase {
    api: Arc<dyn EndpointsApi>,
    api_base: String,
}

impl ConnectionDetailsUseCase {
    pub fn new(api: Arc<dyn EndpointsApi>, api_base: impl Into<String>) -> Self {
        Self {
            api,
            api_base: api_base.into(),
        }
    }

    pub async fn execute(&self, endpoint_id: &str) -> Result<ConnectionDetails> {
        let endpoint = self.api.get_endpoint(endpoint_id).await?;
        let account = self.api.get_account(endpoint_id).await?;
        debug!(endpoint_id, keys = account.api_keys.len(), "Loaded account details");
        Ok(ConnectionDetails::build(&self.api_base, &endpoint, &account))
    }
}

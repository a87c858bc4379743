//! Thin JSON transport over `reqwest`.
//!
//! Every request except token issuance carries the stored session token.
//! A 401 answer becomes [`AppError::Unauthorized`]; routing to the login page
//! is left to the caller. No retries, no caching, no request de-duplication.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::console_config::ConsoleConfig;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::security::TokenStore;

pub const TOKEN_PATH: &str = "/token";

pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl HttpClient {
    pub fn new(config: &ConsoleConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.api_base().to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let mut builder = self.client.request(method, self.url(path));
        if !path.starts_with(TOKEN_PATH) {
            if let Some(token) = self.tokens.load()? {
                builder = builder.header(AUTHORIZATION, format!("Token {}", token));
            }
        }
        Ok(builder)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<reqwest::Response> {
        debug!(method = %method, path, "Sending request");
        let response = builder.send().await.map_err(|e| {
            warn!(method = %method, path, error = %e, "Request failed before a response");
            AppError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!(method = %method, path, "Session token rejected");
            return Err(AppError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(method = %method, path, status = status.as_u16(), "Request rejected");
            return Err(AppError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            AppError::ParseError(format!("Failed to parse response of {}: {}", path, e))
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.request(Method::GET, path)?;
        let response = self.send(Method::GET, path, builder).await?;
        Self::read_json(path, response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path)?.json(body);
        let response = self.send(Method::POST, path, builder).await?;
        Self::read_json(path, response).await
    }

    /// POST without a request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.request(Method::POST, path)?;
        let response = self.send(Method::POST, path, builder).await?;
        Self::read_json(path, response).await
    }

    /// POST without a request body, ignoring whatever the backend answers.
    pub async fn post_action(&self, path: &str) -> Result<()> {
        let builder = self.request(Method::POST, path)?;
        self.send(Method::POST, path, builder).await?;
        Ok(())
    }

    /// POST where the body is sent verbatim rather than JSON-encoded.
    pub async fn post_raw<T: DeserializeOwned>(
        &self,
        path: &str,
        body: String,
        content_type: &str,
    ) -> Result<T> {
        let builder = self
            .request(Method::POST, path)?
            .header(CONTENT_TYPE, content_type)
            .body(body);
        let response = self.send(Method::POST, path, builder).await?;
        Self::read_json(path, response).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path)?.json(body);
        let response = self.send(Method::PUT, path, builder).await?;
        Self::read_json(path, response).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, path)?;
        self.send(Method::DELETE, path, builder).await?;
        Ok(())
    }
}

use async_trait::async_trait;

use super::{AuthApi, HttpConsoleApi};
use crate::domain::error::Result;
use crate::domain::translation::{TokenRequest, TokenResponse};
use crate::infrastructure::http::TOKEN_PATH;

#[async_trait]
impl AuthApi for HttpConsoleApi {
    async fn get_token(&self, username: &str, password: &str) -> Result<TokenResponse> {
        let body = TokenRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.http.post(TOKEN_PATH, &body).await
    }
}

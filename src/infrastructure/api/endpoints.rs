use async_trait::async_trait;
use tracing::warn;

use super::{EndpointsApi, HttpConsoleApi};
use crate::domain::endpoint::{AccountDetail, Endpoint, NewEndpoint, UpdateEndpoint};
use crate::domain::error::{AppError, Result};
use crate::domain::translation::{TranslationRequest, TranslationResponse};

#[async_trait]
impl EndpointsApi for HttpConsoleApi {
    async fn list_endpoints(&self) -> Result<Vec<Endpoint>> {
        self.http.get("/endpoints").await
    }

    async fn get_endpoint(&self, endpoint_id: &str) -> Result<Endpoint> {
        self.http.get(&format!("/endpoints/{}", endpoint_id)).await
    }

    async fn create_endpoint(&self, endpoint: &NewEndpoint) -> Result<Endpoint> {
        self.http.post("/endpoints/", endpoint).await
    }

    async fn update_endpoint(&self, endpoint_id: &str, endpoint: &UpdateEndpoint) -> Result<Endpoint> {
        self.http
            .put(&format!("/endpoints/{}/", endpoint_id), endpoint)
            .await
    }

    async fn get_account(&self, endpoint_id: &str) -> Result<AccountDetail> {
        self.http
            .get(&format!("/endpoints/{}/account", endpoint_id))
            .await
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse> {
        let path = format!("/translate/{}", request.endpoint_key);
        let outcome = self
            .http
            .post_raw::<TranslationResponse>(
                &path,
                request.payload.clone(),
                &request.content_type,
            )
            .await;

        match outcome {
            Ok(response) => Ok(response),
            Err(AppError::Unauthorized) => Err(AppError::Unauthorized),
            // The backend reports failed translations with an error status and
            // the regular response body.
            Err(AppError::Http { status, body }) => {
                match serde_json::from_str::<TranslationResponse>(&body) {
                    Ok(response) => Ok(response),
                    Err(_) => {
                        warn!(status, "Translation failed without a readable body");
                        Ok(TranslationResponse::unknown_failure(AppError::Http {
                            status,
                            body,
                        }))
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, "Translation request failed");
                Ok(TranslationResponse::unknown_failure(err))
            }
        }
    }
}

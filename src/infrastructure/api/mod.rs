//! One function per backend operation, grouped the way the backend groups
//! its resources. Every method is a direct pass-through to a single HTTP
//! call; the only exception is [`EndpointsApi::translate`], which folds
//! transport failures into a failed [`TranslationResponse`].

pub mod auth;
pub mod endpoints;
pub mod specs;
pub mod test_cases;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::artifact::{Artifact, GenerateArtifactResponse};
use crate::domain::endpoint::{AccountDetail, Endpoint, NewEndpoint, UpdateEndpoint};
use crate::domain::error::Result;
use crate::domain::spec::{NewSpec, Spec, UpdateSpec};
use crate::domain::test_case::{NewTestCase, RunTestCasesResponse, TestCase, TestCaseSummary};
use crate::domain::translation::{TokenResponse, TranslationRequest, TranslationResponse};
use crate::infrastructure::http::HttpClient;

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn get_token(&self, username: &str, password: &str) -> Result<TokenResponse>;
}

#[async_trait]
pub trait EndpointsApi: Send + Sync {
    async fn list_endpoints(&self) -> Result<Vec<Endpoint>>;
    async fn get_endpoint(&self, endpoint_id: &str) -> Result<Endpoint>;
    async fn create_endpoint(&self, endpoint: &NewEndpoint) -> Result<Endpoint>;
    async fn update_endpoint(&self, endpoint_id: &str, endpoint: &UpdateEndpoint) -> Result<Endpoint>;
    async fn get_account(&self, endpoint_id: &str) -> Result<AccountDetail>;
    /// Never fails on transport errors; only `Unauthorized` is returned as `Err`.
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse>;
}

#[async_trait]
pub trait SpecsApi: Send + Sync {
    async fn list_specs(&self, endpoint_id: &str) -> Result<Vec<Spec>>;
    async fn get_spec(&self, endpoint_id: &str, spec_id: &str) -> Result<Spec>;
    async fn create_spec(&self, endpoint_id: &str, spec: &NewSpec) -> Result<Spec>;
    async fn update_spec(&self, endpoint_id: &str, spec_id: &str, spec: &UpdateSpec) -> Result<Spec>;
    async fn activate_spec(&self, spec_id: &str) -> Result<()>;
    async fn generate_artifact(&self, spec_id: &str) -> Result<GenerateArtifactResponse>;
    /// The current artifact, if one was ever generated.
    async fn get_artifact(&self, spec_id: &str) -> Result<Option<Artifact>>;
}

#[async_trait]
pub trait TestCasesApi: Send + Sync {
    async fn list_test_cases(&self, spec_id: &str) -> Result<Vec<TestCaseSummary>>;
    async fn get_test_case(&self, spec_id: &str, test_case_id: &str) -> Result<TestCase>;
    async fn create_test_case(&self, spec_id: &str, test_case: &NewTestCase) -> Result<TestCase>;
    async fn update_test_case(
        &self,
        spec_id: &str,
        test_case_id: &str,
        test_case: &TestCase,
    ) -> Result<TestCase>;
    async fn delete_test_case(&self, spec_id: &str, test_case_id: &str) -> Result<()>;
    async fn run_test_cases(&self, spec_id: &str) -> Result<RunTestCasesResponse>;
}

/// Backend surface behind the spec page container.
pub trait SpecDetailApi: SpecsApi + TestCasesApi {}

impl<T: SpecsApi + TestCasesApi + ?Sized> SpecDetailApi for T {}

/// Every backend operation, backed by the HTTP transport.
pub struct HttpConsoleApi {
    http: Arc<HttpClient>,
}

impl HttpConsoleApi {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

use async_trait::async_trait;

use super::{HttpConsoleApi, SpecsApi};
use crate::domain::artifact::{Artifact, GenerateArtifactResponse};
use crate::domain::error::Result;
use crate::domain::spec::{NewSpec, Spec, UpdateSpec};

#[async_trait]
impl SpecsApi for HttpConsoleApi {
    async fn list_specs(&self, endpoint_id: &str) -> Result<Vec<Spec>> {
        self.http
            .get(&format!("/endpoints/{}/specs/", endpoint_id))
            .await
    }

    async fn get_spec(&self, endpoint_id: &str, spec_id: &str) -> Result<Spec> {
        self.http
            .get(&format!("/endpoints/{}/specs/{}/", endpoint_id, spec_id))
            .await
    }

    async fn create_spec(&self, endpoint_id: &str, spec: &NewSpec) -> Result<Spec> {
        self.http
            .post(&format!("/endpoints/{}/specs/", endpoint_id), spec)
            .await
    }

    async fn update_spec(&self, endpoint_id: &str, spec_id: &str, spec: &UpdateSpec) -> Result<Spec> {
        self.http
            .put(&format!("/endpoints/{}/specs/{}/", endpoint_id, spec_id), spec)
            .await
    }

    async fn activate_spec(&self, spec_id: &str) -> Result<()> {
        self.http
            .post_action(&format!("/specs/{}/activate", spec_id))
            .await
    }

    async fn generate_artifact(&self, spec_id: &str) -> Result<GenerateArtifactResponse> {
        self.http
            .post_empty(&format!("/specs/{}/generate_artifact", spec_id))
            .await
    }

    async fn get_artifact(&self, spec_id: &str) -> Result<Option<Artifact>> {
        let artifacts: Vec<Artifact> = self
            .http
            .get(&format!("/specs/{}/artifacts/", spec_id))
            .await?;
        Ok(artifacts.into_iter().next())
    }
}

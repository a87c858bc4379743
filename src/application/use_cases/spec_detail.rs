//! Shared state for one spec's detail page.
//!
//! The page and every drawer opened from it hold the same
//! `Arc<SpecDetailStore>`, so one fetch serves all of them. Operations are not
//! serialized against each other: callers disable their trigger while the
//! matching in-flight flag is set. After [`SpecDetailStore::detach`] results
//! that arrive late are dropped instead of applied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use crate::domain::artifact::{Artifact, GenerateArtifactResponse};
use crate::domain::error::{AppError, Result};
use crate::domain::spec::Spec;
use crate::domain::test_case::TestCaseSummary;
use crate::infrastructure::api::SpecDetailApi;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecDetailState {
    pub endpoint_id: Option<String>,
    pub spec_id: Option<String>,
    pub spec: Option<Spec>,
    /// `None` until fetched, `Some(None)` when a spec has no artifact.
    pub artifact: Option<Option<Artifact>>,
    pub test_cases: Option<Vec<TestCaseSummary>>,
    pub artifact_generation: Option<GenerateArtifactResponse>,
    pub is_generating_artifact: bool,
    pub is_running_test_cases: bool,
}

impl SpecDetailState {
    pub fn current_artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref().and_then(|artifact| artifact.as_ref())
    }

    pub fn test_case_count(&self) -> usize {
        self.test_cases.as_ref().map(|cases| cases.len()).unwrap_or(0)
    }

    /// Artifact generation is only offered once a spec has test cases.
    pub fn can_generate_artifact(&self) -> bool {
        self.test_case_count() > 0 && !self.is_generating_artifact
    }
}

pub struct SpecDetailStore {
    api: Arc<dyn SpecDetailApi>,
    state: Mutex<SpecDetailState>,
    attached: AtomicBool,
}

impl SpecDetailStore {
    pub fn new(api: Arc<dyn SpecDetailApi>) -> Self {
        Self {
            api,
            state: Mutex::new(SpecDetailState::default()),
            attached: AtomicBool::new(true),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SpecDetailState> {
        // A panic while holding the guard leaves plain data behind; keep using it.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn apply(&self, update: impl FnOnce(&mut SpecDetailState)) {
        if self.attached.load(Ordering::SeqCst) {
            update(&mut self.lock());
        }
    }

    pub fn snapshot(&self) -> SpecDetailState {
        self.lock().clone()
    }

    pub fn spec_id(&self) -> Option<String> {
        self.lock().spec_id.clone()
    }

    /// Stop applying results; in-flight calls still complete.
    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    pub async fn set_endpoint_id(&self, endpoint_id: &str) -> Result<()> {
        let changed = {
            let mut state = self.lock();
            if state.endpoint_id.as_deref() == Some(endpoint_id) {
                false
            } else {
                state.endpoint_id = Some(endpoint_id.to_string());
                true
            }
        };
        if changed {
            self.reload_spec().await?;
        }
        Ok(())
    }

    pub async fn set_spec_id(&self, spec_id: &str) -> Result<()> {
        let changed = {
            let mut state = self.lock();
            if state.spec_id.as_deref() == Some(spec_id) {
                false
            } else {
                state.spec_id = Some(spec_id.to_string());
                state.spec = None;
                state.artifact = None;
                state.test_cases = None;
                state.artifact_generation = None;
                true
            }
        };
        if !changed {
            return Ok(());
        }
        let spec = self.reload_spec().await;
        let test_cases = self.reload_test_cases().await;
        spec.and(test_cases)
    }

    /// Points the store at a spec and loads it with its test cases and
    /// artifact.
    pub async fn open(&self, endpoint_id: &str, spec_id: &str) -> Result<()> {
        self.set_endpoint_id(endpoint_id).await?;
        self.set_spec_id(spec_id).await?;
        self.reload_artifact().await
    }

    pub async fn reload_spec(&self) -> Result<()> {
        let (endpoint_id, spec_id) = {
            let state = self.lock();
            (state.endpoint_id.clone(), state.spec_id.clone())
        };
        let (Some(endpoint_id), Some(spec_id)) = (endpoint_id, spec_id) else {
            return Ok(());
        };
        let spec = self.api.get_spec(&endpoint_id, &spec_id).await?;
        self.apply(|state| state.spec = Some(spec));
        Ok(())
    }

    pub async fn reload_test_cases(&self) -> Result<()> {
        let Some(spec_id) = self.spec_id() else {
            return Ok(());
        };
        let test_cases = self.api.list_test_cases(&spec_id).await?;
        self.apply(|state| state.test_cases = Some(test_cases));
        Ok(())
    }

    pub async fn reload_artifact(&self) -> Result<()> {
        let Some(spec_id) = self.spec_id() else {
            return Ok(());
        };
        let artifact = self.api.get_artifact(&spec_id).await?;
        self.apply(|state| state.artifact = Some(artifact));
        Ok(())
    }

    /// Replaces the cached spec after the page saved it.
    pub fn set_spec(&self, spec: Spec) {
        self.apply(|state| state.spec = Some(spec));
    }

    /// Reloads after a generate or run call, whatever that call returned.
    /// Reload failures are only logged.
    async fn refresh_after(&self, operation: &str, include_artifact: bool) {
        if include_artifact {
            if let Err(err) = self.reload_artifact().await {
                warn!(operation, error = %err, "Artifact reload failed");
            }
        }
        if let Err(err) = self.reload_test_cases().await {
            warn!(operation, error = %err, "Test case reload failed");
        }
    }

    /// Returns `Ok(None)` when no spec is selected.
    pub async fn generate_artifact(&self) -> Result<Option<GenerateArtifactResponse>> {
        let Some(spec_id) = self.spec_id() else {
            return Ok(None);
        };

        self.lock().is_generating_artifact = true;
        info!(spec_id = %spec_id, "Generating artifact");
        let outcome = self.api.generate_artifact(&spec_id).await;
        if let Ok(response) = &outcome {
            let response = response.clone();
            self.apply(|state| state.artifact_generation = Some(response));
        }

        self.refresh_after("generate artifact", true).await;
        self.lock().is_generating_artifact = false;

        match outcome {
            Ok(response) => {
                info!(spec_id = %spec_id, outcome = ?response.outcome(), "Artifact generation finished");
                Ok(Some(response))
            }
            Err(AppError::Unauthorized) => Err(AppError::Unauthorized),
            Err(err) => Err(AppError::operation("generate artifact", err)),
        }
    }

    /// Fails when the backend reports that any test case failed.
    pub async fn run_test_cases(&self) -> Result<()> {
        let Some(spec_id) = self.spec_id() else {
            return Ok(());
        };

        self.lock().is_running_test_cases = true;
        info!(spec_id = %spec_id, "Running test cases");
        let outcome = match self.api.run_test_cases(&spec_id).await {
            Ok(response) if response.success => Ok(()),
            Ok(response) => Err(AppError::operation(
                "run test cases",
                response
                    .error
                    .unwrap_or_else(|| "One or more test cases failed".to_string()),
            )),
            Err(AppError::Unauthorized) => Err(AppError::Unauthorized),
            Err(err) => Err(AppError::operation("run test cases", err)),
        };

        self.refresh_after("run test cases", false).await;
        self.lock().is_running_test_cases = false;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::fake_api::{
        sample_spec, sample_test_case, FakeConsoleApi,
    };
    use crate::domain::artifact::ArtifactOutcome;
    use crate::domain::test_case::TestCaseStatus;

    fn store_with_spec() -> (Arc<FakeConsoleApi>, SpecDetailStore) {
        let api = Arc::new(FakeConsoleApi::new());
        api.add_spec("ep-1", sample_spec("spec-1", "Orders", "1"));
        api.add_test_case("spec-1", sample_test_case("tc-1", "happy path"));
        let store = SpecDetailStore::new(api.clone());
        (api, store)
    }

    #[tokio::test]
    async fn test_open_loads_spec_test_cases_and_artifact() {
        let (api, store) = store_with_spec();
        store.open("ep-1", "spec-1").await.unwrap();

        let state = store.snapshot();
        assert_eq!(state.spec.as_ref().unwrap().name, "Orders");
        assert_eq!(state.test_case_count(), 1);
        assert_eq!(state.artifact, Some(None));
        assert_eq!(api.count_calls("get_spec"), 1);
    }

    #[tokio::test]
    async fn test_spec_is_fetched_even_when_test_cases_fail() {
        let (api, store) = store_with_spec();
        api.fail_test_case_listing(AppError::Transport("connection reset".to_string()));

        store.set_endpoint_id("ep-1").await.unwrap();
        let err = store.set_spec_id("spec-1").await.unwrap_err();

        assert_eq!(err, AppError::Transport("connection reset".to_string()));
        assert_eq!(store.snapshot().spec.map(|spec| spec.name).as_deref(), Some("Orders"));
        assert_eq!(api.count_calls("get_spec"), 1);
    }

    #[tokio::test]
    async fn test_same_spec_id_does_not_refetch() {
        let (api, store) = store_with_spec();
        store.open("ep-1", "spec-1").await.unwrap();
        store.set_spec_id("spec-1").await.unwrap();
        store.set_endpoint_id("ep-1").await.unwrap();
        assert_eq!(api.count_calls("get_spec"), 1);
    }

    #[tokio::test]
    async fn test_generate_reloads_artifact_and_test_cases() {
        let (api, store) = store_with_spec();
        store.open("ep-1", "spec-1").await.unwrap();
        let before_artifact = api.count_calls("get_artifact");
        let before_cases = api.count_calls("list_test_cases");

        let response = store.generate_artifact().await.unwrap().unwrap();
        assert_eq!(response.outcome(), ArtifactOutcome::Generated);

        let state = store.snapshot();
        assert!(!state.is_generating_artifact);
        assert!(state.current_artifact().is_some());
        assert_eq!(state.artifact_generation, Some(response));
        assert_eq!(api.count_calls("get_artifact"), before_artifact + 1);
        assert_eq!(api.count_calls("list_test_cases"), before_cases + 1);
    }

    #[tokio::test]
    async fn test_generate_failure_still_reloads() {
        let (api, store) = store_with_spec();
        store.open("ep-1", "spec-1").await.unwrap();
        api.fail_generate(AppError::Http {
            status: 500,
            body: "boom".to_string(),
        });
        let before_artifact = api.count_calls("get_artifact");
        let before_cases = api.count_calls("list_test_cases");

        let err = store.generate_artifact().await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to generate artifact"));

        let state = store.snapshot();
        assert!(!state.is_generating_artifact);
        assert_eq!(api.count_calls("get_artifact"), before_artifact + 1);
        assert_eq!(api.count_calls("list_test_cases"), before_cases + 1);
    }

    #[tokio::test]
    async fn test_run_with_failures_raises_and_reloads() {
        let (api, store) = store_with_spec();
        store.open("ep-1", "spec-1").await.unwrap();
        api.run_reports_failures();

        let err = store.run_test_cases().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to run test cases: One or more test cases failed"
        );

        let state = store.snapshot();
        assert!(!state.is_running_test_cases);
        assert_eq!(
            state.test_cases.unwrap()[0].status,
            TestCaseStatus::Failure
        );
    }

    #[tokio::test]
    async fn test_run_success_updates_statuses() {
        let (_api, store) = store_with_spec();
        store.open("ep-1", "spec-1").await.unwrap();
        assert_eq!(
            store.snapshot().test_cases.unwrap()[0].status,
            TestCaseStatus::NotExecuted
        );

        store.run_test_cases().await.unwrap();
        assert_eq!(
            store.snapshot().test_cases.unwrap()[0].status,
            TestCaseStatus::Success
        );
    }

    #[tokio::test]
    async fn test_detached_store_ignores_late_results() {
        let (_api, store) = store_with_spec();
        store.open("ep-1", "spec-1").await.unwrap();
        store.detach();

        store.run_test_cases().await.unwrap();
        assert_eq!(
            store.snapshot().test_cases.unwrap()[0].status,
            TestCaseStatus::NotExecuted
        );
    }

    #[tokio::test]
    async fn test_generation_gate_needs_test_cases() {
        let api = Arc::new(FakeConsoleApi::new());
        api.add_spec("ep-1", sample_spec("spec-2", "Empty", "1"));
        let store = SpecDetailStore::new(api);
        store.open("ep-1", "spec-2").await.unwrap();
        assert!(!store.snapshot().can_generate_artifact());
    }

    #[tokio::test]
    async fn test_without_spec_id_operations_are_noops() {
        let api = Arc::new(FakeConsoleApi::new());
        let store = SpecDetailStore::new(api.clone());
        assert!(store.generate_artifact().await.unwrap().is_none());
        store.run_test_cases().await.unwrap();
        store.reload_test_cases().await.unwrap();
        assert!(api.calls().is_empty());
    }
}

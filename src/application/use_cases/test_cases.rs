use std::sync::Arc;

use tracing::{info, warn};

use super::spec_detail::SpecDetailStore;
use crate::domain::error::{AppError, Result};
use crate::domain::test_case::TestCase;
use crate::infrastructure::api::TestCasesApi;

pub const TEST_CASE_FIELDS: &[&str] = &[
    "name",
    "input.body",
    "input.content_type",
    "expectation.body",
    "expectation.content_type",
    "expectation.result",
];

pub fn test_case_field(test_case: &TestCase, name: &str) -> Option<String> {
    let definition = &test_case.definition;
    match name {
        "name" => Some(test_case.name.clone()),
        "input.body" => Some(definition.input.body.clone()),
        "input.content_type" => Some(definition.input.content_type.clone()),
        "expectation.body" => Some(definition.expectation.body.clone()),
        "expectation.content_type" => Some(definition.expectation.content_type.clone()),
        "expectation.result" => Some(
            definition
                .expectation
                .result
                .map(|result| result.as_str().to_string())
                .unwrap_or_default(),
        ),
        _ => None,
    }
}

pub fn set_test_case_field(test_case: &mut TestCase, name: &str, value: &str) -> Result<()> {
    let definition = &mut test_case.definition;
    match name {
        "name" => test_case.name = value.to_string(),
        "input.body" => definition.input.body = value.to_string(),
        "input.content_type" => definition.input.content_type = value.to_string(),
        "expectation.body" => definition.expectation.body = value.to_string(),
        "expectation.content_type" => definition.expectation.content_type = value.to_string(),
        "expectation.result" => definition.expectation.result = Some(value.parse()?),
        other => {
            return Err(AppError::ValidationError(format!(
                "Unknown test case field '{}' (expected one of: {})",
                other,
                TEST_CASE_FIELDS.join(", ")
            )))
        }
    }
    Ok(())
}

/// Test-case drawer actions. Every mutation reloads the shared test-case
/// list of whichever spec the store points at.
pub struct TestCaseUseCase {
    api: Arc<dyn TestCasesApi>,
    store: Arc<SpecDetailStore>,
}

impl TestCaseUseCase {
    pub fn new(api: Arc<dyn TestCasesApi>, store: Arc<SpecDetailStore>) -> Self {
        Self { api, store }
    }

    fn spec_id(&self) -> Result<String> {
        self.store
            .spec_id()
            .ok_or_else(|| AppError::ValidationError("No spec selected".to_string()))
    }

    async fn reload(&self) {
        if let Err(err) = self.store.reload_test_cases().await {
            warn!(error = %err, "Test case reload failed");
        }
    }

    pub async fn get(&self, test_case_id: &str) -> Result<TestCase> {
        let spec_id = self.spec_id()?;
        self.api.get_test_case(&spec_id, test_case_id).await
    }

    pub async fn create(&self, test_case: &TestCase) -> Result<TestCase> {
        let spec_id = self.spec_id()?;
        let created = self
            .api
            .create_test_case(&spec_id, &test_case.to_new())
            .await
            .map_err(|e| wrap("create test case", e))?;
        info!(spec_id = %spec_id, name = %created.name, "Test case created");
        self.reload().await;
        Ok(created)
    }

    pub async fn update(&self, test_case_id: &str, test_case: &TestCase) -> Result<TestCase> {
        let spec_id = self.spec_id()?;
        let updated = self
            .api
            .update_test_case(&spec_id, test_case_id, test_case)
            .await
            .map_err(|e| wrap("update test case", e))?;
        info!(spec_id = %spec_id, test_case_id, "Test case updated");
        self.reload().await;
        Ok(updated)
    }

    pub async fn delete(&self, test_case_id: &str) -> Result<()> {
        let spec_id = self.spec_id()?;
        self.api
            .delete_test_case(&spec_id, test_case_id)
            .await
            .map_err(|e| wrap("delete test case", e))?;
        info!(spec_id = %spec_id, test_case_id, "Test case deleted");
        self.reload().await;
        Ok(())
    }
}

fn wrap(operation: &str, err: AppError) -> AppError {
    match err {
        AppError::Unauthorized => AppError::Unauthorized,
        other => AppError::operation(operation, other),
    }
}

//! In-memory backend used by unit tests across the crate.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::artifact::{Artifact, ArtifactRef, GenerateArtifactResponse};
use crate::domain::endpoint::{
    empty_definition, AccountDetail, Endpoint, NewEndpoint, UpdateEndpoint,
};
use crate::domain::error::{AppError, Result};
use crate::domain::spec::{Engine, NewSpec, Rule, Spec, SpecDefinition, UpdateSpec};
use crate::domain::test_case::{
    LastExecution, NewTestCase, RunTestCasesResponse, TestCase, TestCaseDefinition,
    TestCaseStatus, TestCaseSummary,
};
use crate::domain::translation::{TokenResponse, TranslationRequest, TranslationResponse};
use crate::infrastructure::api::{AuthApi, EndpointsApi, SpecsApi, TestCasesApi};

#[derive(Default)]
struct FakeState {
    calls: Vec<String>,
    next_id: u32,
    endpoints: Vec<Endpoint>,
    specs: Vec<(String, Spec)>,
    test_cases: HashMap<String, Vec<TestCase>>,
    artifacts: HashMap<String, Artifact>,
    account: Option<AccountDetail>,
    login_fails: bool,
    update_error: Option<AppError>,
    generate_error: Option<AppError>,
    generate_response: Option<GenerateArtifactResponse>,
    run_error: Option<AppError>,
    run_fails_tests: bool,
    list_test_cases_error: Option<AppError>,
    translate_response: Option<TranslationResponse>,
}

pub struct FakeConsoleApi {
    state: Mutex<FakeState>,
}

pub fn sample_endpoint(id: &str, key: &str, name: &str) -> Endpoint {
    Endpoint {
        id: id.to_string(),
        key: key.to_string(),
        name: name.to_string(),
        is_active: true,
        owner: None,
        definition: empty_definition(),
        created_at: "2025-02-01T00:23:31Z".to_string(),
        updated_at: "2025-02-01T00:23:31Z".to_string(),
        total_success: 0,
        total_failure: 0,
        traffic: Default::default(),
    }
}

pub fn sample_spec(id: &str, name: &str, version: &str) -> Spec {
    Spec {
        id: id.to_string(),
        name: name.to_string(),
        version: version.to_string(),
        is_active: false,
        definition: SpecDefinition {
            engine: Some(Engine::CompiledArtifact),
            input_rule: Some(Rule {
                content_type: "application/xml".to_string(),
                schema: "<xs:schema/>".to_string(),
            }),
            output_rule: Some(Rule {
                content_type: "application/json".to_string(),
                schema: "{}".to_string(),
            }),
            extra_context: Some("dates are ISO-8601".to_string()),
            extra: Default::default(),
        },
        created_at: "2025-02-01T00:23:31Z".to_string(),
        updated_at: "2025-02-02T10:00:00Z".to_string(),
    }
}

pub fn sample_test_case(id: &str, name: &str) -> TestCase {
    TestCase {
        id: Some(id.to_string()),
        name: name.to_string(),
        status: TestCaseStatus::NotExecuted,
        definition: TestCaseDefinition::default(),
        last_execution: None,
    }
}

fn not_found(what: &str) -> AppError {
    AppError::Http {
        status: 404,
        body: format!("{} not found", what),
    }
}

impl FakeConsoleApi {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState::default()),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    fn record(&self, call: String) {
        self.with_state(|state| state.calls.push(call));
    }

    pub fn calls(&self) -> Vec<String> {
        self.with_state(|state| state.calls.clone())
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.with_state(|state| state.calls.iter().filter(|c| c.starts_with(prefix)).count())
    }

    pub fn add_endpoint(&self, endpoint: Endpoint) {
        self.with_state(|state| state.endpoints.push(endpoint));
    }

    pub fn add_spec(&self, endpoint_id: &str, spec: Spec) {
        self.with_state(|state| state.specs.push((endpoint_id.to_string(), spec)));
    }

    pub fn add_test_case(&self, spec_id: &str, test_case: TestCase) {
        self.with_state(|state| {
            state
                .test_cases
                .entry(spec_id.to_string())
                .or_default()
                .push(test_case)
        });
    }

    pub fn add_artifact(&self, spec_id: &str, artifact: Artifact) {
        self.with_state(|state| {
            state.artifacts.insert(spec_id.to_string(), artifact);
        });
    }

    pub fn set_account(&self, account: AccountDetail) {
        self.with_state(|state| state.account = Some(account));
    }

    pub fn fail_login(&self) {
        self.with_state(|state| state.login_fails = true);
    }

    pub fn fail_updates(&self, err: AppError) {
        self.with_state(|state| state.update_error = Some(err));
    }

    pub fn fail_generate(&self, err: AppError) {
        self.with_state(|state| state.generate_error = Some(err));
    }

    pub fn set_generate_response(&self, response: GenerateArtifactResponse) {
        self.with_state(|state| state.generate_response = Some(response));
    }

    pub fn fail_test_case_listing(&self, err: AppError) {
        self.with_state(|state| state.list_test_cases_error = Some(err));
    }

    pub fn fail_run(&self, err: AppError) {
        self.with_state(|state| state.run_error = Some(err));
    }

    pub fn run_reports_failures(&self) {
        self.with_state(|state| state.run_fails_tests = true);
    }

    pub fn set_translate_response(&self, response: TranslationResponse) {
        self.with_state(|state| state.translate_response = Some(response));
    }

    pub fn spec(&self, spec_id: &str) -> Option<Spec> {
        self.with_state(|state| {
            state
                .specs
                .iter()
                .find(|(_, spec)| spec.id == spec_id)
                .map(|(_, spec)| spec.clone())
        })
    }

    pub fn stored_test_cases(&self, spec_id: &str) -> Vec<TestCase> {
        self.with_state(|state| state.test_cases.get(spec_id).cloned().unwrap_or_default())
    }

    fn next_id(&self, prefix: &str) -> String {
        self.with_state(|state| {
            state.next_id += 1;
            format!("{}-{}", prefix, state.next_id)
        })
    }
}

#[async_trait]
impl AuthApi for FakeConsoleApi {
    async fn get_token(&self, username: &str, _password: &str) -> Result<TokenResponse> {
        self.record(format!("get_token:{}", username));
        if self.with_state(|state| state.login_fails) {
            return Err(AppError::Http {
                status: 400,
                body: "Unable to log in with provided credentials.".to_string(),
            });
        }
        Ok(TokenResponse {
            token: format!("token-{}", username),
        })
    }
}

#[async_trait]
impl EndpointsApi for FakeConsoleApi {
    async fn list_endpoints(&self) -> Result<Vec<Endpoint>> {
        self.record("list_endpoints".to_string());
        Ok(self.with_state(|state| state.endpoints.clone()))
    }

    async fn get_endpoint(&self, endpoint_id: &str) -> Result<Endpoint> {
        self.record(format!("get_endpoint:{}", endpoint_id));
        self.with_state(|state| {
            state
                .endpoints
                .iter()
                .find(|endpoint| endpoint.id == endpoint_id)
                .cloned()
                .ok_or_else(|| not_found("endpoint"))
        })
    }

    async fn create_endpoint(&self, endpoint: &NewEndpoint) -> Result<Endpoint> {
        self.record(format!("create_endpoint:{}", endpoint.key));
        let id = self.next_id("ep");
        let mut created = sample_endpoint(&id, &endpoint.key, &endpoint.name);
        created.definition = endpoint.definition.clone();
        self.add_endpoint(created.clone());
        Ok(created)
    }

    async fn update_endpoint(&self, endpoint_id: &str, endpoint: &UpdateEndpoint) -> Result<Endpoint> {
        self.record(format!("update_endpoint:{}", endpoint_id));
        self.with_state(|state| {
            if let Some(err) = state.update_error.clone() {
                return Err(err);
            }
            let stored = state
                .endpoints
                .iter_mut()
                .find(|stored| stored.id == endpoint_id)
                .ok_or_else(|| not_found("endpoint"))?;
            stored.name = endpoint.name.clone();
            stored.key = endpoint.key.clone();
            stored.is_active = endpoint.is_active;
            stored.definition = endpoint.definition.clone();
            Ok(stored.clone())
        })
    }

    async fn get_account(&self, endpoint_id: &str) -> Result<AccountDetail> {
        self.record(format!("get_account:{}", endpoint_id));
        self.with_state(|state| state.account.clone().ok_or_else(|| not_found("account")))
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse> {
        self.record(format!("translate:{}", request.endpoint_key));
        Ok(self.with_state(|state| {
            state.translate_response.clone().unwrap_or_else(|| TranslationResponse {
                success: true,
                message: "ok".to_string(),
                duration: 0.01,
                content_type: "text/plain".to_string(),
                body: request.payload.to_uppercase(),
            })
        }))
    }
}

#[async_trait]
impl SpecsApi for FakeConsoleApi {
    async fn list_specs(&self, endpoint_id: &str) -> Result<Vec<Spec>> {
        self.record(format!("list_specs:{}", endpoint_id));
        Ok(self.with_state(|state| {
            state
                .specs
                .iter()
                .filter(|(owner, _)| owner == endpoint_id)
                .map(|(_, spec)| spec.clone())
                .collect()
        }))
    }

    async fn get_spec(&self, endpoint_id: &str, spec_id: &str) -> Result<Spec> {
        self.record(format!("get_spec:{}:{}", endpoint_id, spec_id));
        self.with_state(|state| {
            state
                .specs
                .iter()
                .find(|(owner, spec)| owner == endpoint_id && spec.id == spec_id)
                .map(|(_, spec)| spec.clone())
                .ok_or_else(|| not_found("spec"))
        })
    }

    async fn create_spec(&self, endpoint_id: &str, spec: &NewSpec) -> Result<Spec> {
        self.record(format!("create_spec:{}", endpoint_id));
        let id = self.next_id("spec");
        let mut created = sample_spec(&id, &spec.name, &spec.version);
        created.definition = spec.definition.clone();
        self.add_spec(endpoint_id, created.clone());
        Ok(created)
    }

    async fn update_spec(&self, endpoint_id: &str, spec_id: &str, spec: &UpdateSpec) -> Result<Spec> {
        self.record(format!("update_spec:{}:{}", endpoint_id, spec_id));
        self.with_state(|state| {
            if let Some(err) = state.update_error.clone() {
                return Err(err);
            }
            let (_, stored) = state
                .specs
                .iter_mut()
                .find(|(owner, stored)| owner == endpoint_id && stored.id == spec_id)
                .ok_or_else(|| not_found("spec"))?;
            stored.name = spec.name.clone();
            stored.version = spec.version.clone();
            stored.is_active = spec.is_active;
            stored.definition = spec.definition.clone();
            Ok(stored.clone())
        })
    }

    async fn activate_spec(&self, spec_id: &str) -> Result<()> {
        self.record(format!("activate_spec:{}", spec_id));
        self.with_state(|state| {
            let owner = state
                .specs
                .iter()
                .find(|(_, spec)| spec.id == spec_id)
                .map(|(owner, _)| owner.clone())
                .ok_or_else(|| not_found("spec"))?;
            for (spec_owner, spec) in state.specs.iter_mut() {
                if *spec_owner == owner {
                    spec.is_active = spec.id == spec_id;
                }
            }
            Ok(())
        })
    }

    async fn generate_artifact(&self, spec_id: &str) -> Result<GenerateArtifactResponse> {
        self.record(format!("generate_artifact:{}", spec_id));
        self.with_state(|state| {
            if let Some(err) = state.generate_error.clone() {
                return Err(err);
            }
            let response = state.generate_response.clone().unwrap_or(GenerateArtifactResponse {
                success: true,
                error: None,
                artifact: Some(ArtifactRef {
                    id: format!("artifact-{}", spec_id),
                }),
                it_generated_artifact: true,
                it_passed_all_tests: true,
                failed_test_cases: None,
            });
            if let Some(artifact) = &response.artifact {
                state.artifacts.insert(
                    spec_id.to_string(),
                    Artifact {
                        id: artifact.id.clone(),
                        implementation_str: "def translate(payload):\n    return payload\n"
                            .to_string(),
                    },
                );
            }
            Ok(response)
        })
    }

    async fn get_artifact(&self, spec_id: &str) -> Result<Option<Artifact>> {
        self.record(format!("get_artifact:{}", spec_id));
        Ok(self.with_state(|state| state.artifacts.get(spec_id).cloned()))
    }
}

#[async_trait]
impl TestCasesApi for FakeConsoleApi {
    async fn list_test_cases(&self, spec_id: &str) -> Result<Vec<TestCaseSummary>> {
        self.record(format!("list_test_cases:{}", spec_id));
        if let Some(err) = self.with_state(|state| state.list_test_cases_error.clone()) {
            return Err(err);
        }
        Ok(self.with_state(|state| {
            state
                .test_cases
                .get(spec_id)
                .map(|cases| {
                    cases
                        .iter()
                        .map(|case| TestCaseSummary {
                            id: case.id.clone().unwrap_or_default(),
                            name: case.name.clone(),
                            status: case.status,
                        })
                        .collect()
                })
                .unwrap_or_default()
        }))
    }

    async fn get_test_case(&self, spec_id: &str, test_case_id: &str) -> Result<TestCase> {
        self.record(format!("get_test_case:{}:{}", spec_id, test_case_id));
        self.with_state(|state| {
            state
                .test_cases
                .get(spec_id)
                .and_then(|cases| {
                    cases
                        .iter()
                        .find(|case| case.id.as_deref() == Some(test_case_id))
                        .cloned()
                })
                .ok_or_else(|| not_found("test case"))
        })
    }

    async fn create_test_case(&self, spec_id: &str, test_case: &NewTestCase) -> Result<TestCase> {
        self.record(format!("create_test_case:{}", spec_id));
        let id = self.next_id("tc");
        let created = TestCase {
            id: Some(id),
            name: test_case.name.clone(),
            status: TestCaseStatus::NotExecuted,
            definition: test_case.definition.clone(),
            last_execution: None,
        };
        self.add_test_case(spec_id, created.clone());
        Ok(created)
    }

    async fn update_test_case(
        &self,
        spec_id: &str,
        test_case_id: &str,
        test_case: &TestCase,
    ) -> Result<TestCase> {
        self.record(format!("update_test_case:{}:{}", spec_id, test_case_id));
        self.with_state(|state| {
            let stored = state
                .test_cases
                .get_mut(spec_id)
                .and_then(|cases| {
                    cases
                        .iter_mut()
                        .find(|case| case.id.as_deref() == Some(test_case_id))
                })
                .ok_or_else(|| not_found("test case"))?;
            stored.name = test_case.name.clone();
            stored.definition = test_case.definition.clone();
            Ok(stored.clone())
        })
    }

    async fn delete_test_case(&self, spec_id: &str, test_case_id: &str) -> Result<()> {
        self.record(format!("delete_test_case:{}:{}", spec_id, test_case_id));
        self.with_state(|state| {
            if let Some(cases) = state.test_cases.get_mut(spec_id) {
                cases.retain(|case| case.id.as_deref() != Some(test_case_id));
            }
        });
        Ok(())
    }

    async fn run_test_cases(&self, spec_id: &str) -> Result<RunTestCasesResponse> {
        self.record(format!("run_test_cases:{}", spec_id));
        self.with_state(|state| {
            if let Some(err) = state.run_error.clone() {
                return Err(err);
            }
            let status = if state.run_fails_tests {
                TestCaseStatus::Failure
            } else {
                TestCaseStatus::Success
            };
            if let Some(cases) = state.test_cases.get_mut(spec_id) {
                for case in cases.iter_mut() {
                    case.status = status;
                    case.last_execution = Some(LastExecution {
                        executed_at: Some("2025-02-03T08:00:00Z".to_string()),
                        status,
                        result: Some(json!({"expected": case.definition.expectation.body})),
                    });
                }
            }
            Ok(RunTestCasesResponse {
                success: !state.run_fails_tests,
                error: state
                    .run_fails_tests
                    .then(|| "One or more test cases failed".to_string()),
            })
        })
    }
}

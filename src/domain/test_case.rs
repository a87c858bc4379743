use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestCaseStatus {
    #[serde(rename = "success", alias = "SUCCESS")]
    Success,
    #[serde(rename = "failure", alias = "FAILURE")]
    Failure,
    #[serde(rename = "not_executed", alias = "NOT_EXECUTED")]
    NotExecuted,
}

impl TestCaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestCaseStatus::Success => "success",
            TestCaseStatus::Failure => "failure",
            TestCaseStatus::NotExecuted => "not_executed",
        }
    }
}

impl Default for TestCaseStatus {
    fn default() -> Self {
        TestCaseStatus::NotExecuted
    }
}

impl fmt::Display for TestCaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedResult {
    Success,
    Failure,
}

impl ExpectedResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpectedResult::Success => "success",
            ExpectedResult::Failure => "failure",
        }
    }
}

impl FromStr for ExpectedResult {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(ExpectedResult::Success),
            "failure" => Ok(ExpectedResult::Failure),
            other => Err(AppError::ValidationError(format!(
                "Unknown expected result '{}' (expected success or failure)",
                other
            ))),
        }
    }
}

/// Members this console does not edit ride along in `extra` on every
/// definition level, so an update sends back what it loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ExpectedResult>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestCaseDefinition {
    #[serde(default)]
    pub input: Payload,
    #[serde(default)]
    pub expectation: Expectation,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastExecution {
    #[serde(default)]
    pub executed_at: Option<String>,
    #[serde(default)]
    pub status: TestCaseStatus,
    #[serde(default)]
    pub result: Option<JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseSummary {
    #[serde(rename = "uuid", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: TestCaseStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(rename = "uuid", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub status: TestCaseStatus,
    #[serde(default)]
    pub definition: TestCaseDefinition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_execution: Option<LastExecution>,
}

impl TestCase {
    /// An unsaved test case as the drawer opens it for creation.
    pub fn blank() -> Self {
        Self {
            id: None,
            name: String::new(),
            status: TestCaseStatus::NotExecuted,
            definition: TestCaseDefinition {
                input: Payload::default(),
                expectation: Expectation {
                    result: Some(ExpectedResult::Success),
                    ..Expectation::default()
                },
                extra: Map::new(),
            },
            last_execution: None,
        }
    }

    /// Only the members the create endpoint accepts.
    pub fn to_new(&self) -> NewTestCase {
        NewTestCase {
            name: self.name.clone(),
            definition: self.definition.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTestCase {
    pub name: String,
    pub definition: TestCaseDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunTestCasesResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_accepts_upper_case() {
        let summary: TestCaseSummary = serde_json::from_value(json!({
            "uuid": "tc-1",
            "name": "happy path",
            "status": "NOT_EXECUTED"
        }))
        .unwrap();
        assert_eq!(summary.status, TestCaseStatus::NotExecuted);
    }

    #[test]
    fn test_blank_expects_success() {
        let blank = TestCase::blank();
        assert_eq!(
            blank.definition.expectation.result,
            Some(ExpectedResult::Success)
        );
        let body = serde_json::to_value(blank.to_new()).unwrap();
        assert_eq!(body["definition"]["expectation"]["result"], json!("success"));
        assert!(body.get("status").is_none());
    }

    #[test]
    fn test_unmodelled_definition_members_survive_a_round_trip() {
        let definition: TestCaseDefinition = serde_json::from_value(json!({
            "input": {"body": "<a/>", "content_type": "application/xml", "encoding": "utf-8"},
            "expectation": {"body": "{}", "content_type": "application/json", "result": "failure", "tolerance": 2},
            "tags": ["regression"]
        }))
        .unwrap();
        assert_eq!(definition.expectation.result, Some(ExpectedResult::Failure));

        let back = serde_json::to_value(&definition).unwrap();
        assert_eq!(back["input"]["encoding"], json!("utf-8"));
        assert_eq!(back["expectation"]["tolerance"], json!(2));
        assert_eq!(back["tags"], json!(["regression"]));
    }
}

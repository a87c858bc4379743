use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(rename = "uuid", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub implementation_str: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRef {
    #[serde(rename = "uuid", alias = "id")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateArtifactResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub artifact: Option<ArtifactRef>,
    #[serde(default)]
    pub it_generated_artifact: bool,
    #[serde(default)]
    pub it_passed_all_tests: bool,
    #[serde(default)]
    pub failed_test_cases: Option<Vec<JsonValue>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactOutcome {
    /// Artifact produced and every test case passed.
    Generated,
    /// Artifact produced but at least one test case failed against it.
    GeneratedWithFailingTests,
    Failed,
}

impl GenerateArtifactResponse {
    pub fn outcome(&self) -> ArtifactOutcome {
        if self.success && self.it_passed_all_tests {
            ArtifactOutcome::Generated
        } else if self.artifact.is_some() {
            ArtifactOutcome::GeneratedWithFailingTests
        } else {
            ArtifactOutcome::Failed
        }
    }
}

impl ArtifactOutcome {
    pub fn headline(&self) -> &'static str {
        match self {
            ArtifactOutcome::Generated => "Artifact has been generated successfully!",
            _ => "Artifact generation failed!",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ArtifactOutcome::Generated => {
                "Artifact has been generated successfully and all tests have passed"
            }
            ArtifactOutcome::GeneratedWithFailingTests => {
                "Artifact has been generated but one or more tests have failed"
            }
            ArtifactOutcome::Failed => "Artifact generation failed",
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::domain::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    Dynamic,
    CompiledArtifact,
}

impl Engine {
    pub const ALL: [Engine; 2] = [Engine::Dynamic, Engine::CompiledArtifact];

    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Dynamic => "dynamic",
            Engine::CompiledArtifact => "compiled_artifact",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Engine::Dynamic => "Dynamic",
            Engine::CompiledArtifact => "Artifact",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Engine::Dynamic => "Translation will be executed on demand (slower translation)",
            Engine::CompiledArtifact => {
                "Translation will be executed using a pre-compiled artifact (faster translation)"
            }
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dynamic" => Ok(Engine::Dynamic),
            "compiled_artifact" | "artifact" => Ok(Engine::CompiledArtifact),
            other => Err(AppError::ValidationError(format!(
                "Unknown engine '{}' (expected dynamic or compiled_artifact)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub content_type: String,
    #[serde(rename = "schema_", alias = "schema", default)]
    pub schema: String,
}

/// Every member is optional on the wire. Unknown members are carried in
/// `extra` so a round trip through an edit never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<Engine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_rule: Option<Rule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_rule: Option<Rule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_context: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl SpecDefinition {
    pub fn input_content_type(&self) -> &str {
        self.input_rule
            .as_ref()
            .map(|rule| rule.content_type.as_str())
            .unwrap_or("")
    }

    pub fn output_content_type(&self) -> &str {
        self.output_rule
            .as_ref()
            .map(|rule| rule.content_type.as_str())
            .unwrap_or("")
    }

    pub fn is_compiled_artifact(&self) -> bool {
        self.engine == Some(Engine::CompiledArtifact)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    #[serde(rename = "uuid", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub definition: SpecDefinition,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewSpec {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Version is required"))]
    pub version: String,
    pub definition: SpecDefinition,
}

impl NewSpec {
    /// The shape the create form starts from: empty rules and context.
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            version: String::new(),
            definition: SpecDefinition {
                engine: None,
                input_rule: Some(Rule::default()),
                output_rule: Some(Rule::default()),
                extra_context: Some(String::new()),
                extra: Map::new(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSpec {
    #[serde(rename = "uuid")]
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub version: String,
    pub definition: SpecDefinition,
}

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use validator::Validate;

use super::draft_editor::{field_error_messages, Draft, DraftSaver};
use crate::domain::error::{AppError, Result};
use crate::domain::spec::{Engine, NewSpec, Rule, Spec, SpecDefinition, UpdateSpec};
use crate::infrastructure::api::SpecsApi;

/// Editable part of a spec. Definition members are edited one at a time and
/// merged into the existing definition, leaving the others untouched.
/// `is_active` is carried as loaded; switching specs goes through activation.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SpecDraft {
    pub id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Version is required"))]
    pub version: String,
    pub is_active: bool,
    pub definition: SpecDefinition,
}

const FIELDS: &[&str] = &[
    "name",
    "version",
    "engine",
    "input.content_type",
    "input.schema",
    "output.content_type",
    "output.schema",
    "extra_context",
];

fn rule_field(rule: &Option<Rule>, pick: fn(&Rule) -> &String) -> String {
    rule.as_ref().map(|rule| pick(rule).clone()).unwrap_or_default()
}

impl SpecDraft {
    pub fn from_spec(spec: &Spec) -> Self {
        Self {
            id: spec.id.clone(),
            name: spec.name.clone(),
            version: spec.version.clone(),
            is_active: spec.is_active,
            definition: spec.definition.clone(),
        }
    }

    pub fn to_update(&self) -> UpdateSpec {
        UpdateSpec {
            id: self.id.clone(),
            name: self.name.clone(),
            is_active: self.is_active,
            version: self.version.clone(),
            definition: self.definition.clone(),
        }
    }
}

/// Applies one definition member by its dotted field name.
pub(crate) fn set_definition_field(
    definition: &mut SpecDefinition,
    name: &str,
    value: &str,
) -> Result<bool> {
    match name {
        "engine" => {
            definition.engine = if value.trim().is_empty() {
                None
            } else {
                Some(value.parse::<Engine>()?)
            }
        }
        "input.content_type" => {
            definition.input_rule.get_or_insert_with(Rule::default).content_type = value.to_string()
        }
        "input.schema" => {
            definition.input_rule.get_or_insert_with(Rule::default).schema = value.to_string()
        }
        "output.content_type" => {
            definition.output_rule.get_or_insert_with(Rule::default).content_type =
                value.to_string()
        }
        "output.schema" => {
            definition.output_rule.get_or_insert_with(Rule::default).schema = value.to_string()
        }
        "extra_context" => definition.extra_context = Some(value.to_string()),
        _ => return Ok(false),
    }
    Ok(true)
}

impl Draft for SpecDraft {
    fn field_names() -> &'static [&'static str] {
        FIELDS
    }

    fn field(&self, name: &str) -> Option<String> {
        let definition = &self.definition;
        match name {
            "name" => Some(self.name.clone()),
            "version" => Some(self.version.clone()),
            "engine" => Some(
                definition
                    .engine
                    .map(|engine| engine.as_str().to_string())
                    .unwrap_or_default(),
            ),
            "input.content_type" => Some(rule_field(&definition.input_rule, |r| &r.content_type)),
            "input.schema" => Some(rule_field(&definition.input_rule, |r| &r.schema)),
            "output.content_type" => Some(rule_field(&definition.output_rule, |r| &r.content_type)),
            "output.schema" => Some(rule_field(&definition.output_rule, |r| &r.schema)),
            "extra_context" => Some(definition.extra_context.clone().unwrap_or_default()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "name" => self.name = value.to_string(),
            "version" => self.version = value.to_string(),
            other => {
                if !set_definition_field(&mut self.definition, other, value)? {
                    return Err(AppError::ValidationError(format!(
                        "Unknown spec field '{}' (expected one of: {})",
                        other,
                        FIELDS.join(", ")
                    )));
                }
            }
        }
        Ok(())
    }
}

pub struct SpecSaver {
    api: Arc<dyn SpecsApi>,
    endpoint_id: String,
}

impl SpecSaver {
    pub fn new(api: Arc<dyn SpecsApi>, endpoint_id: impl Into<String>) -> Self {
        Self {
            api,
            endpoint_id: endpoint_id.into(),
        }
    }
}

#[async_trait]
impl DraftSaver<SpecDraft> for SpecSaver {
    async fn save(&self, draft: &SpecDraft) -> Result<SpecDraft> {
        let saved = self
            .api
            .update_spec(&self.endpoint_id, &draft.id, &draft.to_update())
            .await?;
        info!(spec_id = %saved.id, version = %saved.version, "Spec updated");
        Ok(SpecDraft::from_spec(&saved))
    }
}

/// Create form submission; name and version are checked before any request.
pub async fn create_spec(api: &dyn SpecsApi, endpoint_id: &str, spec: &NewSpec) -> Result<Spec> {
    if let Err(errors) = spec.validate() {
        let messages = field_error_messages(&errors);
        return Err(AppError::ValidationError(
            messages.into_values().collect::<Vec<_>>().join(", "),
        ));
    }
    let created = api.create_spec(endpoint_id, spec).await?;
    info!(endpoint_id, spec_id = %created.id, "Spec created");
    Ok(created)
}

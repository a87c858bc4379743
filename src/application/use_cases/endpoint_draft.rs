use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::info;
use validator::Validate;

use super::draft_editor::{field_error_messages, Draft, DraftSaver};
use crate::domain::endpoint::{Endpoint, NewEndpoint, UpdateEndpoint};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::api::EndpointsApi;

/// Editable part of an endpoint.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct EndpointDraft {
    #[validate(length(min = 1, message = "Key is required"))]
    pub key: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub is_active: bool,
    pub definition: JsonValue,
}

impl EndpointDraft {
    pub fn from_endpoint(endpoint: &Endpoint) -> Self {
        Self {
            key: endpoint.key.clone(),
            name: endpoint.name.clone(),
            is_active: endpoint.is_active,
            definition: endpoint.definition.clone(),
        }
    }

    pub fn to_update(&self) -> UpdateEndpoint {
        UpdateEndpoint {
            name: self.name.clone(),
            key: self.key.clone(),
            is_active: self.is_active,
            definition: self.definition.clone(),
        }
    }
}

pub(crate) fn parse_flag(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(AppError::ValidationError(format!(
            "{} must be true or false, got '{}'",
            field, other
        ))),
    }
}

pub(crate) fn parse_definition(value: &str) -> Result<JsonValue> {
    if value.trim().is_empty() {
        return Ok(crate::domain::endpoint::empty_definition());
    }
    serde_json::from_str(value)
        .map_err(|e| AppError::ValidationError(format!("Definition is not valid JSON: {}", e)))
}

impl Draft for EndpointDraft {
    fn field_names() -> &'static [&'static str] {
        &["key", "name", "is_active", "definition"]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "key" => Some(self.key.clone()),
            "name" => Some(self.name.clone()),
            "is_active" => Some(self.is_active.to_string()),
            "definition" => Some(self.definition.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "key" => self.key = value.to_string(),
            "name" => self.name = value.to_string(),
            "is_active" => self.is_active = parse_flag(name, value)?,
            "definition" => self.definition = parse_definition(value)?,
            other => {
                return Err(AppError::ValidationError(format!(
                    "Unknown endpoint field '{}' (expected one of: {})",
                    other,
                    Self::field_names().join(", ")
                )))
            }
        }
        Ok(())
    }
}

pub struct EndpointSaver {
    api: Arc<dyn EndpointsApi>,
    endpoint_id: String,
}

impl EndpointSaver {
    pub fn new(api: Arc<dyn EndpointsApi>, endpoint_id: impl Into<String>) -> Self {
        Self {
            api,
            endpoint_id: endpoint_id.into(),
        }
    }
}

#[async_trait]
impl DraftSaver<EndpointDraft> for EndpointSaver {
    async fn save(&self, draft: &EndpointDraft) -> Result<EndpointDraft> {
        let updated = self
            .api
            .update_endpoint(&self.endpoint_id, &draft.to_update())
            .await?;
        info!(endpoint_id = %self.endpoint_id, "Endpoint updated");
        Ok(EndpointDraft::from_endpoint(&updated))
    }
}

/// Create form submission; required fields are checked before any request.
pub async fn create_endpoint(api: &dyn EndpointsApi, endpoint: &NewEndpoint) -> Result<Endpoint> {
    if let Err(errors) = endpoint.validate() {
        let messages = field_error_messages(&errors);
        return Err(AppError::ValidationError(
            messages.into_values().collect::<Vec<_>>().join(", "),
        ));
    }
    let created = api.create_endpoint(endpoint).await?;
    info!(endpoint_id = %created.id, key = %created.key, "Endpoint created");
    Ok(created)
}

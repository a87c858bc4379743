use std::sync::Arc;

use regex::Regex;
use tracing::{info, warn};

use crate::domain::error::{AppError, Result};
use crate::domain::translation::{TranslationRequest, TranslationResponse};
use crate::infrastructure::api::EndpointsApi;

/// Known content types and the syntax label their payloads render with.
const SYNTAX_LABELS: [(&str, &str); 6] = [
    ("application/json", "json"),
    ("application/xml", "html"),
    ("text/html", "html"),
    ("text/css", "css"),
    ("text/csv", "csv"),
    ("text/javascript", "javascript"),
];

/// Syntax label for a response content type.
///
/// The content type is treated as a pattern searched in each known type; the
/// last known type it matches wins. A pattern that does not compile is
/// matched literally.
pub fn language_for_content_type(content_type: &str) -> &'static str {
    let content_type = content_type.trim();
    if content_type.is_empty() {
        return "auto";
    }
    let pattern = Regex::new(content_type)
        .or_else(|_| Regex::new(&regex::escape(content_type)));
    let Ok(pattern) = pattern else {
        return "auto";
    };

    SYNTAX_LABELS
        .iter()
        .filter(|(known, _)| pattern.is_match(known))
        .map(|(_, label)| *label)
        .last()
        .unwrap_or("auto")
}

pub struct TranslationUseCase {
    api: Arc<dyn EndpointsApi>,
}

impl TranslationUseCase {
    pub fn new(api: Arc<dyn EndpointsApi>) -> Self {
        Self { api }
    }

    /// Transport failures come back as a failed response, not as `Err`.
    pub async fn translate(
        &self,
        endpoint_key: &str,
        payload: &str,
        content_type: &str,
    ) -> Result<TranslationResponse> {
        if payload.is_empty() {
            return Err(AppError::ValidationError(
                "Paste a payload to translate".to_string(),
            ));
        }
        let request = TranslationRequest {
            endpoint_key: endpoint_key.to_string(),
            payload: payload.to_string(),
            content_type: content_type.to_string(),
        };
        let response = self.api.translate(&request).await?;
        if response.success {
            info!(endpoint_key, duration = response.duration, "Translation succeeded");
        } else {
            warn!(endpoint_key, message = %response.message, "Translation failed");
        }
        Ok(response)
    }
}

use std::io::Write;

use tracing::warn;

use super::{endpoint_detail, navigate, report_failure};
use crate::application::use_cases::endpoint_draft::{create_endpoint, parse_definition};
use crate::domain::endpoint::{empty_definition, NewEndpoint};
use crate::domain::error::{AppError, Result};
use crate::interfaces::cli::resolve_value;
use crate::interfaces::cli::router::Route;
use crate::interfaces::cli::state::ConsoleState;

const SOURCE: &str = "new endpoint";

pub async fn create(
    state: &ConsoleState,
    key: String,
    name: String,
    definition: Option<String>,
    out: &mut dyn Write,
) -> Result<()> {
    let definition = match definition {
        Some(raw) => match resolve_value(&raw).and_then(|raw| parse_definition(&raw)) {
            Ok(definition) => definition,
            Err(err) => return report_failure(state, SOURCE, "Failed to create endpoint", err),
        },
        None => empty_definition(),
    };
    let request = NewEndpoint {
        key,
        name,
        definition,
    };

    match create_endpoint(state.endpoints.as_ref(), &request).await {
        Ok(created) => {
            state.toasts.success(SOURCE, "Endpoint created successfully");
            navigate(
                out,
                &Route::Endpoint {
                    endpoint_id: created.id.clone(),
                },
            )?;
            endpoint_detail::show(state, &created.id, out).await
        }
        Err(err @ (AppError::Unauthorized | AppError::ValidationError(_))) => {
            report_failure(state, SOURCE, "Failed to create endpoint", err)
        }
        Err(err) => {
            warn!(error = %err, "Endpoint creation failed");
            state.toasts.error(SOURCE, "Failed to create endpoint");
            Ok(())
        }
    }
}

use std::io::Write;

use super::{navigate, report_failure, spec_detail};
use crate::application::use_cases::spec_draft::{create_spec, set_definition_field};
use crate::domain::error::{AppError, Result};
use crate::domain::spec::NewSpec;
use crate::interfaces::cli::router::Route;
use crate::interfaces::cli::state::ConsoleState;

const SOURCE: &str = "new spec";

fn build_request(
    name: String,
    version: String,
    assignments: &[(&'static str, String)],
) -> Result<NewSpec> {
    let mut spec = NewSpec::blank();
    spec.name = name;
    spec.version = version;
    for (field, value) in assignments {
        if !set_definition_field(&mut spec.definition, field, value)? {
            return Err(AppError::ValidationError(format!(
                "Unknown spec field '{}'",
                field
            )));
        }
    }
    Ok(spec)
}

pub async fn create(
    state: &ConsoleState,
    endpoint_id: &str,
    name: String,
    version: String,
    assignments: Vec<(&'static str, String)>,
    out: &mut dyn Write,
) -> Result<()> {
    if endpoint_id.trim().is_empty() {
        state.toasts.error(SOURCE, "Invalid endpoint id");
        return Ok(());
    }
    let request = match build_request(name, version, &assignments) {
        Ok(request) => request,
        Err(err) => return report_failure(state, SOURCE, "Failed to create spec", err),
    };

    match create_spec(state.specs.as_ref(), endpoint_id, &request).await {
        Ok(created) => {
            state.toasts.success(SOURCE, "Spec created successfully");
            navigate(
                out,
                &Route::Spec {
                    endpoint_id: endpoint_id.to_string(),
                    spec_id: created.id.clone(),
                },
            )?;
            spec_detail::show(state, endpoint_id, &created.id, out).await
        }
        Err(err) => report_failure(state, SOURCE, "Failed to create spec", err),
    }
}

use std::io::{BufRead, Write};

use super::report_failure;
use crate::application::use_cases::connection_details::ConnectionDetailsUseCase;
use crate::application::use_cases::draft_editor::DraftEditor;
use crate::application::use_cases::endpoint_draft::{EndpointDraft, EndpointSaver};
use crate::application::use_cases::traffic::format_number;
use crate::domain::endpoint::Endpoint;
use crate::domain::error::Result;
use crate::domain::spec::Spec;
use crate::interfaces::cli::components::chart::TrafficChart;
use crate::interfaces::cli::components::{
    badge, code_block, field, format_timestamp, page_header, section,
};
use crate::interfaces::cli::edit_session::{render_draft, run_edit_session, EditSessionOutcome};
use crate::interfaces::cli::router::Route;
use crate::interfaces::cli::state::ConsoleState;

const SOURCE: &str = "endpoint";

/// The active spec first, then the others in backend order.
pub fn pinned_specs(specs: &[Spec]) -> Vec<&Spec> {
    specs
        .iter()
        .filter(|spec| spec.is_active)
        .chain(specs.iter().filter(|spec| !spec.is_active))
        .collect()
}

fn render(out: &mut dyn Write, endpoint: &Endpoint, specs: &[Spec]) -> Result<()> {
    page_header(out, &[&endpoint.id], &endpoint.name)?;
    field(out, "Key", &endpoint.key)?;
    field(out, "Created At", &format_timestamp(&endpoint.created_at))?;
    field(out, "Updated At", &format_timestamp(&endpoint.updated_at))?;
    field(out, "Status", badge(endpoint.is_active))?;

    section(out, "Traffic")?;
    TrafficChart::new(&endpoint.traffic).render(out)?;
    field(out, "Failed", &format_number(endpoint.total_failure))?;
    field(out, "Success", &format_number(endpoint.total_success))?;

    section(out, "Specifications")?;
    if specs.is_empty() {
        writeln!(
            out,
            "  No specs yet. Create one with: spec new {} --name NAME --version VERSION",
            endpoint.id
        )?;
    }
    for spec in pinned_specs(specs) {
        let route = Route::Spec {
            endpoint_id: endpoint.id.clone(),
            spec_id: spec.id.clone(),
        };
        writeln!(
            out,
            "  {:<28} Version: {:<6} {:<10} {}",
            spec.name,
            spec.version,
            badge(spec.is_active),
            route
        )?;
    }
    Ok(())
}

pub async fn show(state: &ConsoleState, endpoint_id: &str, out: &mut dyn Write) -> Result<()> {
    let endpoint = state.endpoints.get_endpoint(endpoint_id).await?;
    let specs = state.specs.list_specs(endpoint_id).await?;
    render(out, &endpoint, &specs)
}

/// Field assignments are applied and saved at once; without any the edit
/// session reads commands from `input`.
pub async fn edit(
    state: &ConsoleState,
    endpoint_id: &str,
    assignments: Vec<(&'static str, String)>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let endpoint = state.endpoints.get_endpoint(endpoint_id).await?;
    let mut editor = DraftEditor::new(EndpointDraft::from_endpoint(&endpoint));
    let saver = EndpointSaver::new(state.endpoints.clone(), endpoint_id);

    if assignments.is_empty() {
        if run_edit_session(&mut editor, &saver, input, out).await? != EditSessionOutcome::Saved {
            return Ok(());
        }
    } else {
        editor.edit();
        for (name, value) in &assignments {
            if let Err(err) = editor.change(name, value) {
                return report_failure(state, SOURCE, "Failed to update endpoint", err);
            }
        }
        editor.blur_all();
        if let Err(err) = editor.save(&saver).await {
            render_draft(out, &editor)?;
            return report_failure(state, SOURCE, "Failed to update endpoint", err);
        }
    }

    state.toasts.success(SOURCE, "Endpoint updated successfully");
    show(state, endpoint_id, out).await
}

pub async fn connection(state: &ConsoleState, endpoint_id: &str, out: &mut dyn Write) -> Result<()> {
    let details = ConnectionDetailsUseCase::new(state.endpoints.clone(), state.api_base.clone())
        .execute(endpoint_id)
        .await?;

    page_header(out, &[endpoint_id, "API"], "HTTP API connection")?;
    field(out, "URL", &details.url)?;
    field(out, "Method", details.method)?;
    field(out, "Header", details.header)?;
    field(out, "API key", details.api_key_display())?;
    field(out, "Account", &details.account_name)?;
    section(out, "Example")?;
    code_block(out, "bash", &details.curl_example())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::fake_api::{sample_endpoint, sample_spec};
    use crate::domain::endpoint::AccountDetail;
    use crate::domain::error::AppError;
    use crate::interfaces::cli::notify::ToastLevel;
    use crate::interfaces::cli::pages::testing::{logged_in, text, toasts};
    use std::io::Cursor;

    #[test]
    fn test_active_spec_is_pinned_first() {
        let mut active = sample_spec("spec-2", "Second", "2");
        active.is_active = true;
        let specs = vec![
            sample_spec("spec-1", "First", "1"),
            active,
            sample_spec("spec-3", "Third", "3"),
        ];
        let ids: Vec<&str> = pinned_specs(&specs).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["spec-2", "spec-1", "spec-3"]);
    }

    #[tokio::test]
    async fn test_show_lists_totals_and_specs() {
        let (api, state) = logged_in();
        let mut endpoint = sample_endpoint("ep-1", "orders", "Orders");
        endpoint.total_success = 2_500_000;
        endpoint.total_failure = 12;
        api.add_endpoint(endpoint);
        api.add_spec("ep-1", sample_spec("spec-1", "Default Spec", "0"));

        let mut out = Vec::new();
        show(&state, "ep-1", &mut out).await.unwrap();
        let text = text(out);

        assert!(text.starts_with("My Account / Endpoints / ep-1\n"));
        assert!(text.contains("2025-02-01 00:23:31"));
        assert!(text.contains("2.5M"));
        assert!(text.contains("12"));
        assert!(text.contains("Default Spec"));
        assert!(text.contains("/endpoints/ep-1/specs/spec-1"));
    }

    #[tokio::test]
    async fn test_flag_edit_saves_and_toasts() {
        let (api, state) = logged_in();
        api.add_endpoint(sample_endpoint("ep-1", "orders", "Orders"));
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();

        edit(
            &state,
            "ep-1",
            vec![("name", "Orders v2".to_string()), ("is_active", "false".to_string())],
            &mut input,
            &mut out,
        )
        .await
        .unwrap();

        assert!(text(out).contains("\nOrders v2\n"));
        assert_eq!(
            toasts(&state),
            vec![(ToastLevel::Success, "Endpoint updated successfully".to_string())]
        );
        assert_eq!(api.count_calls("update_endpoint:ep-1"), 1);
    }

    #[tokio::test]
    async fn test_flag_edit_with_blank_key_never_saves() {
        let (api, state) = logged_in();
        api.add_endpoint(sample_endpoint("ep-1", "orders", "Orders"));
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();

        edit(&state, "ep-1", vec![("key", String::new())], &mut input, &mut out)
            .await
            .unwrap();

        assert!(text(out).contains("! Key is required"));
        assert_eq!(toasts(&state)[0].0, ToastLevel::Warning);
        assert_eq!(api.count_calls("update_endpoint"), 0);
    }

    #[tokio::test]
    async fn test_rejected_update_propagates_unauthorized() {
        let (api, state) = logged_in();
        api.add_endpoint(sample_endpoint("ep-1", "orders", "Orders"));
        api.fail_updates(AppError::Unauthorized);
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();

        let err = edit(&state, "ep-1", vec![("name", "x".to_string())], &mut input, &mut out)
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Unauthorized);
    }

    #[tokio::test]
    async fn test_connection_page() {
        let (api, state) = logged_in();
        api.add_endpoint(sample_endpoint("ep-1", "orders", "Orders"));
        api.set_account(AccountDetail {
            name: "acme".to_string(),
            api_keys: vec!["key-123".to_string()],
            is_active: true,
        });

        let mut out = Vec::new();
        connection(&state, "ep-1", &mut out).await.unwrap();
        let text = text(out);

        assert!(text.contains("http://localhost:8000/api/translate/orders"));
        assert!(text.contains("key-123"));
        assert!(text.contains("```bash"));
    }
}

use std::io::{BufRead, Write};
use std::sync::Arc;

use tracing::debug;

use super::report_failure;
use crate::application::use_cases::draft_editor::DraftEditor;
use crate::application::use_cases::spec_detail::{SpecDetailState, SpecDetailStore};
use crate::application::use_cases::spec_draft::{SpecDraft, SpecSaver};
use crate::application::use_cases::translation::language_for_content_type;
use crate::domain::error::{AppError, Result};
use crate::domain::spec::Rule;
use crate::interfaces::cli::components::artifact::{render_artifact, render_generation_banner};
use crate::interfaces::cli::components::test_cases::render_test_case_list;
use crate::interfaces::cli::components::{
    badge, code_block, field, format_timestamp, page_header, section,
};
use crate::interfaces::cli::edit_session::{render_draft, run_edit_session, EditSessionOutcome};
use crate::interfaces::cli::state::ConsoleState;

const SOURCE: &str = "spec";
const GENERATION_GATE: &str = "Add test cases to generate artifact";

async fn open_store(
    state: &ConsoleState,
    endpoint_id: &str,
    spec_id: &str,
) -> Result<Arc<SpecDetailStore>> {
    let store = state.spec_detail_store();
    store.open(endpoint_id, spec_id).await?;
    Ok(store)
}

fn render_rule(out: &mut dyn Write, title: &str, rule: Option<&Rule>) -> Result<()> {
    section(out, title)?;
    let Some(rule) = rule else {
        writeln!(out, "  Not set")?;
        return Ok(());
    };
    field(out, "Content type", &rule.content_type)?;
    if !rule.schema.is_empty() {
        code_block(out, language_for_content_type(&rule.content_type), &rule.schema)?;
    }
    Ok(())
}

fn render_artifact_status(
    out: &mut dyn Write,
    detail: &SpecDetailState,
    endpoint_id: &str,
    spec_id: &str,
) -> Result<()> {
    section(out, "Artifact")?;
    if let Some(generation) = &detail.artifact_generation {
        render_generation_banner(out, generation)?;
    }
    match &detail.artifact {
        None => writeln!(out, "  Loading artifact...")?,
        Some(None) => writeln!(out, "  No artifact has been generated")?,
        Some(Some(artifact)) => field(out, "Current artifact", &artifact.id)?,
    }
    if detail.is_generating_artifact {
        writeln!(out, "  Generating...")?;
    } else if detail.can_generate_artifact() {
        writeln!(out, "  Generate with: spec generate {} {}", endpoint_id, spec_id)?;
    } else {
        writeln!(out, "  {}", GENERATION_GATE)?;
    }
    Ok(())
}

fn render(out: &mut dyn Write, endpoint_id: &str, detail: &SpecDetailState) -> Result<()> {
    let Some(spec) = &detail.spec else {
        writeln!(out, "Loading spec...")?;
        return Ok(());
    };
    let definition = &spec.definition;

    page_header(
        out,
        &[endpoint_id, "Specs", &spec.name],
        &format!("{} (version {})", spec.name, spec.version),
    )?;
    field(out, "Status", badge(spec.is_active))?;
    field(out, "Created At", &format_timestamp(&spec.created_at))?;
    field(out, "Updated At", &format_timestamp(&spec.updated_at))?;

    section(out, "Engine")?;
    match definition.engine {
        Some(engine) => {
            writeln!(out, "  {}", engine.label())?;
            writeln!(out, "  {}", engine.description())?;
        }
        None => writeln!(out, "  Not set")?,
    }

    render_rule(out, "Input", definition.input_rule.as_ref())?;
    render_rule(out, "Output", definition.output_rule.as_ref())?;

    section(out, "Extra context")?;
    match definition.extra_context.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(context) => {
            for line in context.lines() {
                writeln!(out, "  {}", line)?;
            }
        }
        None => writeln!(out, "  (none)")?,
    }

    section(out, &format!("Test cases ({})", detail.test_case_count()))?;
    render_test_case_list(out, detail.test_cases.as_deref())?;

    render_artifact_status(out, detail, endpoint_id, &spec.id)
}

pub async fn show(
    state: &ConsoleState,
    endpoint_id: &str,
    spec_id: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let store = open_store(state, endpoint_id, spec_id).await?;
    render(out, endpoint_id, &store.snapshot())?;
    store.detach();
    Ok(())
}

pub async fn edit(
    state: &ConsoleState,
    endpoint_id: &str,
    spec_id: &str,
    assignments: Vec<(&'static str, String)>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let store = open_store(state, endpoint_id, spec_id).await?;
    let Some(spec) = store.snapshot().spec else {
        return Err(AppError::NotFound(format!("Spec {}", spec_id)));
    };
    let mut editor = DraftEditor::new(SpecDraft::from_spec(&spec));
    let saver = SpecSaver::new(state.specs.clone(), endpoint_id);

    if assignments.is_empty() {
        if run_edit_session(&mut editor, &saver, input, out).await? != EditSessionOutcome::Saved {
            store.detach();
            return Ok(());
        }
    } else {
        editor.edit();
        for (name, value) in &assignments {
            if let Err(err) = editor.change(name, value) {
                store.detach();
                return report_failure(state, SOURCE, "Failed to update spec", err);
            }
        }
        editor.blur_all();
        if let Err(err) = editor.save(&saver).await {
            render_draft(out, &editor)?;
            store.detach();
            return report_failure(state, SOURCE, "Failed to update spec", err);
        }
    }

    state.toasts.success(SOURCE, "Spec updated successfully");
    store.reload_spec().await?;
    render(out, endpoint_id, &store.snapshot())?;
    store.detach();
    Ok(())
}

pub async fn activate(
    state: &ConsoleState,
    endpoint_id: &str,
    spec_id: &str,
    out: &mut dyn Write,
) -> Result<()> {
    if let Err(err) = state.specs.activate_spec(spec_id).await {
        return report_failure(state, SOURCE, "Failed to activate spec", err);
    }
    state.toasts.success(SOURCE, "Spec activated successfully");
    show(state, endpoint_id, spec_id, out).await
}

/// Runs generation when the gate allows it; returns whether it ran.
async fn generate_on(
    state: &ConsoleState,
    store: &SpecDetailStore,
    out: &mut dyn Write,
) -> Result<bool> {
    if !store.snapshot().can_generate_artifact() {
        state.toasts.warning(SOURCE, GENERATION_GATE);
        return Ok(false);
    }
    match store.generate_artifact().await {
        Ok(Some(response)) => {
            render_generation_banner(out, &response)?;
            Ok(true)
        }
        Ok(None) => Ok(false),
        Err(AppError::Unauthorized) => Err(AppError::Unauthorized),
        Err(err) => {
            debug!(error = %err, "Artifact generation error");
            state.toasts.error(SOURCE, "Failed to generate artifact");
            Ok(true)
        }
    }
}

pub async fn generate(
    state: &ConsoleState,
    endpoint_id: &str,
    spec_id: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let store = open_store(state, endpoint_id, spec_id).await?;
    let outcome = generate_on(state, &store, out).await;
    store.detach();
    if outcome? {
        let detail = store.snapshot();
        section(out, &format!("Test cases ({})", detail.test_case_count()))?;
        render_test_case_list(out, detail.test_cases.as_deref())?;
    }
    Ok(())
}

pub async fn run_tests(
    state: &ConsoleState,
    endpoint_id: &str,
    spec_id: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let store = open_store(state, endpoint_id, spec_id).await?;
    let outcome = store.run_test_cases().await;
    store.detach();
    match outcome {
        Ok(()) => state.toasts.success(SOURCE, "Tests ran successfully"),
        Err(err) => report_failure(state, SOURCE, "Failed to run test cases", err)?,
    }

    let detail = store.snapshot();
    section(out, &format!("Test cases ({})", detail.test_case_count()))?;
    render_test_case_list(out, detail.test_cases.as_deref())?;
    Ok(())
}

/// Artifact viewer. `regenerate` forces a fresh generation first.
pub async fn artifact(
    state: &ConsoleState,
    endpoint_id: &str,
    spec_id: &str,
    regenerate: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let store = open_store(state, endpoint_id, spec_id).await?;
    if regenerate {
        if let Err(err) = generate_on(state, &store, out).await {
            store.detach();
            return Err(err);
        }
    }
    store.detach();

    match store.snapshot().current_artifact() {
        Some(artifact) => render_artifact(out, artifact)?,
        None => state.toasts.error(SOURCE, "No artifact has been generated"),
    }
    Ok(())
}

use std::io::Write;
use std::sync::Arc;

use tracing::warn;

use super::report_failure;
use crate::application::use_cases::spec_detail::SpecDetailStore;
use crate::application::use_cases::test_cases::{set_test_case_field, TestCaseUseCase};
use crate::application::use_cases::translation::language_for_content_type;
use crate::domain::error::{AppError, Result};
use crate::domain::test_case::TestCase;
use crate::interfaces::cli::components::test_cases::{render_execution, render_test_case_list};
use crate::interfaces::cli::components::{code_block, field, page_header, section};
use crate::interfaces::cli::state::ConsoleState;

const SOURCE: &str = "test case";

async fn open(
    state: &ConsoleState,
    endpoint_id: &str,
    spec_id: &str,
) -> Result<(Arc<SpecDetailStore>, TestCaseUseCase)> {
    let store = state.spec_detail_store();
    store.set_endpoint_id(endpoint_id).await?;
    store.set_spec_id(spec_id).await?;
    let use_case = TestCaseUseCase::new(state.test_cases.clone(), store.clone());
    Ok((store, use_case))
}

fn apply(test_case: &mut TestCase, assignments: &[(&'static str, String)]) -> Result<()> {
    for (name, value) in assignments {
        set_test_case_field(test_case, name, value)?;
    }
    Ok(())
}

fn render_payload(out: &mut dyn Write, title: &str, body: &str, content_type: &str) -> Result<()> {
    section(out, title)?;
    field(out, "Content type", content_type)?;
    if body.is_empty() {
        writeln!(out, "  (empty)")?;
    } else {
        code_block(out, language_for_content_type(content_type), body)?;
    }
    Ok(())
}

fn render(out: &mut dyn Write, endpoint_id: &str, spec_id: &str, test_case: &TestCase) -> Result<()> {
    let definition = &test_case.definition;
    page_header(
        out,
        &[endpoint_id, "Specs", spec_id, "Test cases"],
        &test_case.name,
    )?;
    field(out, "Id", test_case.id.as_deref().unwrap_or("-"))?;
    field(out, "Status", test_case.status.as_str())?;
    field(
        out,
        "Expected result",
        definition
            .expectation
            .result
            .map(|result| result.as_str())
            .unwrap_or("-"),
    )?;
    render_payload(out, "Input", &definition.input.body, &definition.input.content_type)?;
    render_payload(
        out,
        "Expected output",
        &definition.expectation.body,
        &definition.expectation.content_type,
    )?;
    section(out, "Last execution")?;
    render_execution(out, test_case.last_execution.as_ref())?;
    Ok(())
}

fn render_list(out: &mut dyn Write, store: &SpecDetailStore) -> Result<()> {
    let detail = store.snapshot();
    section(out, &format!("Test cases ({})", detail.test_case_count()))?;
    render_test_case_list(out, detail.test_cases.as_deref())?;
    Ok(())
}

/// Toasts the drawer's fixed failure text; the reason only goes to the log.
fn report_mutation_failure(state: &ConsoleState, message: &str, err: AppError) -> Result<()> {
    match err {
        AppError::Unauthorized => Err(AppError::Unauthorized),
        other => {
            warn!(error = %other, "{}", message);
            state.toasts.error(SOURCE, message);
            Ok(())
        }
    }
}

pub async fn show(
    state: &ConsoleState,
    endpoint_id: &str,
    spec_id: &str,
    test_case_id: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let (store, use_case) = open(state, endpoint_id, spec_id).await?;
    let test_case = use_case.get(test_case_id).await;
    store.detach();
    render(out, endpoint_id, spec_id, &test_case?)
}

pub async fn create(
    state: &ConsoleState,
    endpoint_id: &str,
    spec_id: &str,
    assignments: Vec<(&'static str, String)>,
    out: &mut dyn Write,
) -> Result<()> {
    let mut draft = TestCase::blank();
    if let Err(err) = apply(&mut draft, &assignments) {
        return report_failure(state, SOURCE, "Failed to create test case", err);
    }

    let (store, use_case) = open(state, endpoint_id, spec_id).await?;
    let outcome = use_case.create(&draft).await;
    store.detach();
    match outcome {
        Ok(created) => {
            state.toasts.success(SOURCE, "Test case created successfully");
            writeln!(out, "Created test case {}", created.id.as_deref().unwrap_or("-"))?;
            render_list(out, &store)
        }
        Err(err) => report_mutation_failure(state, "Failed to create test case", err),
    }
}

pub async fn update(
    state: &ConsoleState,
    endpoint_id: &str,
    spec_id: &str,
    test_case_id: &str,
    assignments: Vec<(&'static str, String)>,
    out: &mut dyn Write,
) -> Result<()> {
    let (store, use_case) = open(state, endpoint_id, spec_id).await?;
    let mut test_case = match use_case.get(test_case_id).await {
        Ok(test_case) => test_case,
        Err(err) => {
            store.detach();
            return Err(err);
        }
    };
    if let Err(err) = apply(&mut test_case, &assignments) {
        store.detach();
        return report_failure(state, SOURCE, "Failed to update test case", err);
    }

    let outcome = use_case.update(test_case_id, &test_case).await;
    store.detach();
    match outcome {
        Ok(updated) => {
            state.toasts.success(SOURCE, "Test case updated successfully");
            render(out, endpoint_id, spec_id, &updated)
        }
        Err(err) => report_mutation_failure(state, "Failed to update test case", err),
    }
}

pub async fn delete(
    state: &ConsoleState,
    endpoint_id: &str,
    spec_id: &str,
    test_case_id: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let (store, use_case) = open(state, endpoint_id, spec_id).await?;
    let outcome = use_case.delete(test_case_id).await;
    store.detach();
    match outcome {
        Ok(()) => {
            state.toasts.success(SOURCE, "Test case deleted successfully");
            render_list(out, &store)
        }
        Err(err) => report_mutation_failure(state, "Failed to delete test case", err),
    }
}

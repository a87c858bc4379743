use std::io::Write;

use crate::application::use_cases::translation::{language_for_content_type, TranslationUseCase};
use crate::domain::error::{AppError, Result};
use crate::domain::translation::TranslationResponse;
use crate::interfaces::cli::components::{code_block, field, page_header, section};
use crate::interfaces::cli::state::ConsoleState;

const SOURCE: &str = "translate";

fn render_result(out: &mut dyn Write, response: Option<&TranslationResponse>) -> Result<()> {
    section(out, "Result")?;
    let Some(response) = response else {
        writeln!(out, "  Translation result will appear here")?;
        return Ok(());
    };
    let alert = if response.success { "[success]" } else { "[failure]" };
    writeln!(out, "  {} {}", alert, response.message)?;
    field(out, "Duration", &format!("{:.3}s", response.duration))?;
    if !response.content_type.is_empty() {
        field(out, "Content type", &response.content_type)?;
    }
    if response.body.is_empty() {
        writeln!(out, "  Translation result will appear here")?;
    } else {
        code_block(out, language_for_content_type(&response.content_type), &response.body)?;
    }
    Ok(())
}

pub async fn translate(
    state: &ConsoleState,
    endpoint_key: &str,
    payload: &str,
    content_type: &str,
    out: &mut dyn Write,
) -> Result<()> {
    page_header(out, &[endpoint_key, "Translate"], "Translate payload")?;
    field(out, "Content type", content_type)?;

    let use_case = TranslationUseCase::new(state.endpoints.clone());
    match use_case.translate(endpoint_key, payload, content_type).await {
        Ok(response) => {
            if !response.success {
                state.toasts.error(SOURCE, "Failed to translate payload");
            }
            render_result(out, Some(&response))
        }
        Err(AppError::ValidationError(message)) => {
            state.toasts.warning(SOURCE, &message);
            render_result(out, None)
        }
        Err(err) => Err(err),
    }
}

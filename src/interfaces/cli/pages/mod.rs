//! One module per console page. A page loads what it shows, renders it to
//! the writer it is given and reports action outcomes as toasts. Only
//! `Unauthorized` and load failures come back as `Err`.

pub mod dashboard;
pub mod endpoint_detail;
pub mod login;
pub mod new_endpoint;
pub mod new_spec;
pub mod spec_detail;
pub mod test_case_drawer;
pub mod translation_drawer;

use std::io::Write;

use crate::domain::error::{AppError, Result};
use crate::interfaces::cli::router::Route;
use crate::interfaces::cli::state::ConsoleState;

/// Prints the route the console moves to.
pub(crate) fn navigate(out: &mut dyn Write, route: &Route) -> Result<()> {
    writeln!(out, "-> {}", route)?;
    writeln!(out)?;
    Ok(())
}

/// Toasts a failed action and swallows the error, except `Unauthorized`,
/// which the top level turns into a login redirect.
pub(crate) fn report_failure(
    state: &ConsoleState,
    source: &str,
    prefix: &str,
    err: AppError,
) -> Result<()> {
    match err {
        AppError::Unauthorized => Err(AppError::Unauthorized),
        AppError::ValidationError(message) => {
            state.toasts.warning(source, &message);
            Ok(())
        }
        AppError::Operation { reason, .. } => {
            state.toasts.error(source, &format!("{}: {}", prefix, reason));
            Ok(())
        }
        other => {
            state.toasts.error(source, &format!("{}: {}", prefix, other));
            Ok(())
        }
    }
}

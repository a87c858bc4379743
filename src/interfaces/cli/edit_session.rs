use std::io::{BufRead, Write};

use tracing::debug;

use super::resolve_value;
use crate::application::use_cases::draft_editor::{CancelOutcome, Draft, DraftEditor, DraftSaver};
use crate::domain::error::{AppError, Result};

const HELP: &str = "Commands:
  show               list the fields of the draft
  set FIELD VALUE    change a field (VALUE may be @path to read a file)
  save               save the draft
  cancel             leave edit mode
  help               show this help";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSessionOutcome {
    Saved,
    Discarded,
    Closed,
}

pub fn render_draft<T: Draft>(out: &mut dyn Write, editor: &DraftEditor<T>) -> Result<()> {
    for name in T::field_names() {
        let value = editor.draft().field(name).unwrap_or_default();
        let mut lines = value.lines();
        let first = lines.next().unwrap_or("");
        writeln!(out, "  {:<22} {}", name, first)?;
        for line in lines {
            writeln!(out, "  {:<22} {}", "", line)?;
        }
        if let Some(error) = editor.errors().get(*name) {
            writeln!(out, "  {:<22} ! {}", "", error)?;
        }
    }
    Ok(())
}

fn read_line(input: &mut dyn BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string()))
}

/// Line-driven edit mode over a draft editor.
///
/// `set` runs the field's validation right away, like leaving the field in a
/// form. End of input leaves unsaved changes in the draft and returns
/// `Closed`.
pub async fn run_edit_session<T: Draft>(
    editor: &mut DraftEditor<T>,
    saver: &dyn DraftSaver<T>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<EditSessionOutcome> {
    editor.edit();
    writeln!(out, "Editing. Type 'help' for commands.")?;
    render_draft(out, editor)?;

    loop {
        write!(out, "edit> ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            if editor.is_dirty() {
                writeln!(out, "Changes were not saved")?;
            }
            return Ok(EditSessionOutcome::Closed);
        };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        debug!(command, "Edit session command");

        match command {
            "" => {}
            "help" => writeln!(out, "{}", HELP)?,
            "show" => render_draft(out, editor)?,
            "set" => {
                let Some((field, value)) = rest.trim_start().split_once(' ').or_else(|| {
                    let field = rest.trim();
                    (!field.is_empty()).then_some((field, ""))
                }) else {
                    writeln!(out, "Usage: set FIELD VALUE")?;
                    continue;
                };
                let value = match resolve_value(value) {
                    Ok(value) => value,
                    Err(err) => {
                        writeln!(out, "{}", err)?;
                        continue;
                    }
                };
                match editor.change(field, &value) {
                    Ok(()) => {
                        editor.blur(field);
                        if let Some(error) = editor.errors().get(field) {
                            writeln!(out, "! {}", error)?;
                        }
                    }
                    Err(err) => writeln!(out, "{}", err)?,
                }
            }
            "save" => match editor.save(saver).await {
                Ok(()) => {
                    writeln!(out, "Saved")?;
                    return Ok(EditSessionOutcome::Saved);
                }
                Err(AppError::Unauthorized) => return Err(AppError::Unauthorized),
                Err(err) => writeln!(out, "Failed to save: {}", err)?,
            },
            "cancel" => match editor.cancel() {
                CancelOutcome::Closed => return Ok(EditSessionOutcome::Closed),
                CancelOutcome::ConfirmDiscard => {
                    write!(out, "Discard changes? [y/N] ")?;
                    out.flush()?;
                    let answer = read_line(input)?.unwrap_or_default();
                    if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                        editor.confirm_discard();
                        writeln!(out, "Changes discarded")?;
                        return Ok(EditSessionOutcome::Discarded);
                    }
                    editor.keep_editing();
                }
            },
            other => writeln!(out, "Unknown command '{}'. Type 'help'.", other)?,
        }
    }
}

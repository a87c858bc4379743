//! Positional line diff for failed test-case executions.
//!
//! Lines are compared index by index, not aligned with an edit script, so a
//! reordered block shows up as removed and added lines.

use serde_json::Value as JsonValue;

use crate::domain::test_case::{LastExecution, TestCaseStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    Unchanged,
    Removed,
    Added,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub change: LineChange,
    pub text: String,
}

impl DiffLine {
    fn new(change: LineChange, text: &str) -> Self {
        Self {
            change,
            text: text.to_string(),
        }
    }

    pub fn marker(&self) -> char {
        match self.change {
            LineChange::Unchanged => ' ',
            LineChange::Removed => '-',
            LineChange::Added => '+',
        }
    }
}

pub fn line_diff(expected: &str, actual: &str) -> Vec<DiffLine> {
    let expected_lines: Vec<&str> = expected.split('\n').collect();
    let actual_lines: Vec<&str> = actual.split('\n').collect();
    let mut diff = Vec::new();

    for index in 0..expected_lines.len().max(actual_lines.len()) {
        match (expected_lines.get(index), actual_lines.get(index)) {
            (Some(left), Some(right)) if left == right => {
                diff.push(DiffLine::new(LineChange::Unchanged, left));
            }
            (Some(left), Some(right)) => {
                let removed = !actual_lines.contains(left);
                let added = !expected_lines.contains(right);
                match (removed, added) {
                    (true, false) => diff.push(DiffLine::new(LineChange::Removed, left)),
                    (false, true) => diff.push(DiffLine::new(LineChange::Added, right)),
                    _ => {
                        diff.push(DiffLine::new(LineChange::Removed, left));
                        diff.push(DiffLine::new(LineChange::Added, right));
                    }
                }
            }
            (Some(left), None) => diff.push(DiffLine::new(LineChange::Removed, left)),
            (None, Some(right)) => diff.push(DiffLine::new(LineChange::Added, right)),
            (None, None) => {}
        }
    }

    diff
}

/// The diff to show for an execution, if it is a failure carrying both the
/// expected and the translated payload.
pub fn execution_diff(execution: &LastExecution) -> Option<Vec<DiffLine>> {
    if execution.status != TestCaseStatus::Failure {
        return None;
    }
    let result = execution.result.as_ref()?.as_object()?;
    let expected = result.get("expected")?;
    let translated = result.get("translated")?;
    Some(line_diff(&as_text(expected), &as_text(translated)))
}

fn as_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(text) => text.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

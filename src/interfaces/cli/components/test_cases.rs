use std::io::{self, Write};

use super::{code_block, field, format_timestamp};
use crate::application::use_cases::line_diff::execution_diff;
use crate::domain::test_case::{LastExecution, TestCaseStatus, TestCaseSummary};

fn status_chip(status: TestCaseStatus) -> String {
    let marker = match status {
        TestCaseStatus::Success => '+',
        TestCaseStatus::Failure => 'x',
        TestCaseStatus::NotExecuted => '?',
    };
    format!("[{}] {}", marker, status.as_str().to_uppercase())
}

pub fn render_test_case_list(
    out: &mut dyn Write,
    test_cases: Option<&[TestCaseSummary]>,
) -> io::Result<()> {
    let Some(test_cases) = test_cases else {
        return writeln!(out, "  Loading test cases...");
    };
    if test_cases.is_empty() {
        return writeln!(out, "  No test cases have been created...");
    }
    writeln!(out, "  {:<12} {:<32} {}", "ID", "NAME", "STATUS")?;
    for test_case in test_cases {
        writeln!(
            out,
            "  {:<12} {:<32} {}",
            test_case.id,
            test_case.name,
            status_chip(test_case.status)
        )?;
    }
    Ok(())
}

/// Last execution; failures carrying both payloads render as a line diff.
pub fn render_execution(out: &mut dyn Write, execution: Option<&LastExecution>) -> io::Result<()> {
    let Some(execution) = execution else {
        return writeln!(out, "  Not executed yet");
    };
    field(out, "Status", &status_chip(execution.status))?;
    if let Some(executed_at) = &execution.executed_at {
        field(out, "Executed at", &format_timestamp(executed_at))?;
    }

    match execution_diff(execution) {
        Some(diff) => {
            writeln!(out, "  Diff (Expected vs Translated):")?;
            for line in diff {
                writeln!(out, "  {} {}", line.marker(), line.text)?;
            }
            Ok(())
        }
        None => {
            let json = serde_json::to_string_pretty(execution).unwrap_or_default();
            code_block(out, "json", &json)
        }
    }
}

use std::io::{self, Write};

use super::{code_block, section};
use crate::domain::artifact::{Artifact, ArtifactOutcome, GenerateArtifactResponse};

/// Result banner shown after a generation attempt.
pub fn render_generation_banner(
    out: &mut dyn Write,
    response: &GenerateArtifactResponse,
) -> io::Result<()> {
    let outcome = response.outcome();
    let marker = if outcome == ArtifactOutcome::Generated {
        "[ok]"
    } else {
        "[error]"
    };
    writeln!(out, "{} {}", marker, outcome.headline())?;
    writeln!(out, "    {}", outcome.message())?;
    if let Some(error) = response.error.as_deref().filter(|e| !e.is_empty()) {
        writeln!(out, "    {}", error)?;
    }
    if let Some(failed) = response.failed_test_cases.as_ref().filter(|f| !f.is_empty()) {
        writeln!(out, "    Failed test cases: {}", failed.len())?;
    }
    Ok(())
}

pub fn render_artifact(out: &mut dyn Write, artifact: &Artifact) -> io::Result<()> {
    section(out, "Artifact")?;
    writeln!(out, "  id: {}", artifact.id)?;
    code_block(out, "python", &artifact.implementation_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artifact::ArtifactRef;

    fn render(response: &GenerateArtifactResponse) -> String {
        let mut out = Vec::new();
        render_generation_banner(&mut out, response).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_banner_for_partial_failure() {
        let text = render(&GenerateArtifactResponse {
            success: true,
            error: None,
            artifact: Some(ArtifactRef {
                id: "a-1".to_string(),
            }),
            it_generated_artifact: true,
            it_passed_all_tests: false,
            failed_test_cases: Some(vec![serde_json::json!({"uuid": "tc-1"})]),
        });

        assert!(text.starts_with("[error] Artifact generation failed!"));
        assert!(text.contains("Artifact has been generated but one or more tests have failed"));
        assert!(text.contains("Failed test cases: 1"));
    }

    #[test]
    fn test_banner_for_success() {
        let text = render(&GenerateArtifactResponse {
            success: true,
            error: None,
            artifact: Some(ArtifactRef {
                id: "a-1".to_string(),
            }),
            it_generated_artifact: true,
            it_passed_all_tests: true,
            failed_test_cases: None,
        });
        assert!(text.starts_with("[ok] Artifact has been generated successfully!"));
    }
}

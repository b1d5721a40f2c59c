//! Validate command - load an index and run consistency checks.

use std::io::Write;
use std::path::Path;

use super::inspect::open_or_report;
use crate::index::lint;
use crate::io::{EntityType, Envelope, ExitCode, OutputManager};

/// Run validate command.
///
/// A malformed index always fails. Consistency issues only fail with `strict`.
pub fn run<O: Write, E: Write>(
    path: &Path,
    strict: bool,
    output: &mut OutputManager<O, E>,
) -> anyhow::Result<ExitCode> {
    let store = open_or_report!(path, output);
    let issues = lint(&store);
    let exit_code = if strict && !issues.is_empty() {
        ExitCode::ValidationFailed
    } else {
        ExitCode::Success
    };
    let summary = format!(
        "{} records, {} issues ({})",
        store.len(),
        issues.len(),
        store.source_format()
    );

    if output.is_json() {
        let count = issues.len();
        let envelope = if exit_code.is_success() {
            Envelope::success(issues)
        } else {
            Envelope::error(exit_code, "Consistency checks failed").with_data(issues)
        };
        output.emit_json(
            &envelope
                .with_entity_type(EntityType::LintIssue)
                .with_count(count)
                .with_message(summary),
        )?;
        return Ok(exit_code);
    }

    for issue in &issues {
        writeln!(output.err(), "warning: {issue}")?;
    }
    writeln!(output.out(), "{}: {summary}", path.display())?;
    Ok(exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::inspect::tests::{buffers, fixture_file};
    use crate::io::OutputFormat;
    use tempfile::TempDir;

    const SPLIT_PAGE: &str = r#"{"docs":[
        {"location":"a.html","page":"A","title":"A","text":"","category":"page"},
        {"location":"b.html","page":"B","title":"B","text":"","category":"page"},
        {"location":"a.html","page":"A","title":"A","text":"again","category":"page"}
    ]}"#;

    #[test]
    fn test_clean_fixture_passes_strict() {
        let dir = TempDir::new().unwrap();
        let path = fixture_file(&dir);
        let mut output = buffers(OutputFormat::Text);
        assert_eq!(run(&path, true, &mut output).unwrap(), ExitCode::Success);

        let (out, err) = output.into_writers();
        assert!(String::from_utf8(out).unwrap().contains("5 records, 0 issues"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_issues_only_fail_in_strict_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, SPLIT_PAGE).unwrap();

        let mut output = buffers(OutputFormat::Text);
        assert_eq!(run(&path, false, &mut output).unwrap(), ExitCode::Success);
        let (_, err) = output.into_writers();
        assert!(String::from_utf8(err).unwrap().contains("page-not-contiguous"));

        let mut output = buffers(OutputFormat::Json);
        assert_eq!(
            run(&path, true, &mut output).unwrap(),
            ExitCode::ValidationFailed
        );
        let (out, _) = output.into_writers();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["code"], "VALIDATION_FAILED");
        assert_eq!(value["data"][0]["kind"], "page_not_contiguous");
        assert_eq!(value["data"][0]["record"], 2);
    }

    #[test]
    fn test_malformed_index_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, r#"{"docs":[{"page":"A"}]}"#).unwrap();

        let mut output = buffers(OutputFormat::Text);
        assert_eq!(
            run(&path, false, &mut output).unwrap(),
            ExitCode::MalformedIndex
        );
    }
}

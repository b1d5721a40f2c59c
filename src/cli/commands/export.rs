//! Export command - re-emit an index as plain JSON or as a script.

use anyhow::Context;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::inspect::open_or_report;
use crate::cli::ExportFormat;
use crate::config::Settings;
use crate::index::SourceFormat;
use crate::io::{EntityType, Envelope, ExitCode, OutputManager};

#[derive(Debug, Serialize)]
struct ExportSummary<'a> {
    output: &'a Path,
    format: &'a SourceFormat,
    records: usize,
}

/// Run export command.
///
/// Without an output path the rendered index goes to stdout and `--json`
/// has no effect, since the payload itself is the result.
pub fn run<O: Write, E: Write>(
    path: &Path,
    format: ExportFormat,
    variable: Option<String>,
    destination: Option<PathBuf>,
    config: &Settings,
    output: &mut OutputManager<O, E>,
) -> anyhow::Result<ExitCode> {
    let target = match format {
        ExportFormat::Json => SourceFormat::Json,
        ExportFormat::Script => SourceFormat::script(
            variable.unwrap_or_else(|| config.index.variable_name.clone()),
        ),
    };
    if let Err(e) = target.validate() {
        return Ok(output.report_error(&e)?);
    }

    let store = open_or_report!(path, output);

    let Some(destination) = destination else {
        let rendered = match store.render(&target) {
            Ok(rendered) => rendered,
            Err(e) => return Ok(output.report_error(&e)?),
        };
        output
            .out()
            .write_all(rendered.as_bytes())
            .context("Failed to write export to stdout")?;
        return Ok(ExitCode::Success);
    };

    if let Err(e) = store.write_to(&destination, &target) {
        return Ok(output.report_error(&e)?);
    }

    if output.is_json() {
        let summary = ExportSummary {
            output: &destination,
            format: &target,
            records: store.len(),
        };
        let envelope = Envelope::success(summary)
            .with_entity_type(EntityType::Export)
            .with_count(store.len());
        output.emit_json(&envelope)?;
    } else {
        writeln!(
            output.out(),
            "Wrote {} records to {} ({target})",
            store.len(),
            destination.display()
        )?;
    }
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::inspect::tests::{buffers, fixture_file};
    use crate::index::SearchIndexStore;
    use crate::io::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_export_json_to_stdout_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = fixture_file(&dir);
        let mut output = buffers(OutputFormat::Text);
        let code = run(
            &path,
            ExportFormat::Json,
            None,
            None,
            &Settings::default(),
            &mut output,
        )
        .unwrap();
        assert_eq!(code, ExitCode::Success);

        let (out, _) = output.into_writers();
        let exported = String::from_utf8(out).unwrap();
        assert!(exported.starts_with("{\"docs\":["));
        let reloaded = SearchIndexStore::load(&exported).unwrap();
        assert_eq!(reloaded, SearchIndexStore::open(&path).unwrap());
    }

    #[test]
    fn test_export_script_to_file_uses_variable() {
        let dir = TempDir::new().unwrap();
        let path = fixture_file(&dir);
        let destination = dir.path().join("out.js");

        let mut output = buffers(OutputFormat::Json);
        run(
            &path,
            ExportFormat::Script,
            Some("siteIndex".to_string()),
            Some(destination.clone()),
            &Settings::default(),
            &mut output,
        )
        .unwrap();

        let (out, _) = output.into_writers();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["data"]["records"], 5);
        assert_eq!(value["data"]["format"]["kind"], "script");
        assert_eq!(value["data"]["format"]["variable"], "siteIndex");

        let written = std::fs::read_to_string(&destination).unwrap();
        assert!(written.starts_with("var siteIndex = {\"docs\":\n["));
        let reloaded = SearchIndexStore::open(&destination).unwrap();
        assert_eq!(reloaded.source_format(), &SourceFormat::script("siteIndex"));
        assert_eq!(reloaded.len(), 5);
    }

    #[test]
    fn test_export_rejects_invalid_variable() {
        let dir = TempDir::new().unwrap();
        let path = fixture_file(&dir);
        let destination = dir.path().join("out.js");

        let mut output = buffers(OutputFormat::Text);
        let code = run(
            &path,
            ExportFormat::Script,
            Some("search-index".to_string()),
            Some(destination.clone()),
            &Settings::default(),
            &mut output,
        )
        .unwrap();
        assert_eq!(code, ExitCode::GeneralError);
        assert!(!destination.exists());
        let (_, err) = output.into_writers();
        assert!(String::from_utf8(err).unwrap().contains("'search-index' is not a valid"));

        let mut config = Settings::default();
        config.index.variable_name = String::new();
        let mut output = buffers(OutputFormat::Text);
        let code = run(&path, ExportFormat::Script, None, None, &config, &mut output).unwrap();
        assert_eq!(code, ExitCode::GeneralError);
        let (out, _) = output.into_writers();
        assert!(out.is_empty());
    }

    #[test]
    fn test_export_script_defaults_to_configured_variable() {
        let dir = TempDir::new().unwrap();
        let path = fixture_file(&dir);
        let mut config = Settings::default();
        config.index.variable_name = "customIndex".to_string();

        let mut output = buffers(OutputFormat::Text);
        run(&path, ExportFormat::Script, None, None, &config, &mut output).unwrap();
        let (out, _) = output.into_writers();
        assert!(String::from_utf8(out).unwrap().starts_with("var customIndex = "));
    }
}

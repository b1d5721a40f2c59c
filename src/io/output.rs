//! Text/JSON output switching for commands.

use console::style;
use serde::Serialize;
use std::io::{self, Write};

use super::{Envelope, ErrorDetails, ExitCode};
use crate::error::IndexError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Writes command results to stdout and diagnostics to stderr.
///
/// Generic over the writers so commands can be exercised against buffers.
pub struct OutputManager<O = io::Stdout, E = io::Stderr> {
    format: OutputFormat,
    out: O,
    err: E,
    color: bool,
}

impl OutputManager {
    /// Manager over the process stdout/stderr; color only on a terminal.
    pub fn new(format: OutputFormat) -> Self {
        let color = is_terminal::is_terminal(io::stdout()) && console::colors_enabled();
        Self {
            format,
            out: io::stdout(),
            err: io::stderr(),
            color,
        }
    }
}

impl<O: Write, E: Write> OutputManager<O, E> {
    pub fn with_writers(format: OutputFormat, out: O, err: E) -> Self {
        Self {
            format,
            out,
            err,
            color: false,
        }
    }

    pub fn into_writers(self) -> (O, E) {
        (self.out, self.err)
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn out(&mut self) -> &mut O {
        &mut self.out
    }

    pub fn err(&mut self) -> &mut E {
        &mut self.err
    }

    pub fn heading(&self, text: &str) -> String {
        if self.color {
            style(text).cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            style(text).dim().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn emit_json<T: Serialize>(&mut self, envelope: &Envelope<T>) -> io::Result<()> {
        let json = envelope.to_json().map_err(io::Error::other)?;
        writeln!(self.out, "{json}")
    }

    /// Report a library error and return the matching exit code.
    pub fn report_error(&mut self, error: &IndexError) -> io::Result<ExitCode> {
        let exit_code = error.exit_code();
        let suggestions = error.suggestions();

        if self.is_json() {
            let record = match error {
                IndexError::Malformed(e) => e.record,
                _ => None,
            };
            let envelope: Envelope<()> = Envelope::error(exit_code, error.to_string())
                .with_error_details(ErrorDetails {
                    suggestions,
                    record,
                });
            self.emit_json(&envelope)?;
        } else {
            writeln!(self.err, "Error: {error}")?;
            for suggestion in suggestions {
                writeln!(self.err, "  hint: {suggestion}")?;
            }
        }

        tracing::debug!(target: "cli", "command failed with {exit_code:?}: {error}");
        Ok(exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedRecordError;

    fn buffers(format: OutputFormat) -> OutputManager<Vec<u8>, Vec<u8>> {
        OutputManager::with_writers(format, Vec::new(), Vec::new())
    }

    #[test]
    fn test_text_error_goes_to_stderr() {
        let mut output = buffers(OutputFormat::Text);
        let error: IndexError = MalformedRecordError::record(1, "missing field `page`").into();
        let code = output.report_error(&error).unwrap();
        assert_eq!(code, ExitCode::MalformedIndex);

        let (out, err) = output.into_writers();
        assert!(out.is_empty());
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("Error: malformed record #1"));
        assert!(err.contains("hint: Regenerate"));
    }

    #[test]
    fn test_json_error_goes_to_stdout() {
        let mut output = buffers(OutputFormat::Json);
        let error: IndexError = MalformedRecordError::record(5, "bad").into();
        output.report_error(&error).unwrap();

        let (out, err) = output.into_writers();
        assert!(err.is_empty());
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], "MALFORMED_INDEX");
        assert_eq!(value["exit_code"], 4);
        assert_eq!(value["error"]["record"], 5);
    }

    #[test]
    fn test_plain_styles_without_color() {
        let output = buffers(OutputFormat::Text);
        assert_eq!(output.heading("Pages"), "Pages");
        assert_eq!(output.dim("(empty)"), "(empty)");
        assert_eq!(OutputFormat::from_flag(true), OutputFormat::Json);
    }
}

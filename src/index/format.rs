//! Detection and emission of the search index file layout.
//!
//! Site generators ship the index as a script that assigns the JSON object to
//! a global, e.g.
//!
//! ```text
//! var documenterSearchIndex = {"docs":
//! [{"location":"index.html","page":"Home",...}]
//! }
//! ```
//!
//! The same payload may also be stored as plain JSON.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::error::{IndexError, IndexResult, MalformedRecordError};

/// Variable name used by Documenter-generated sites.
pub const DEFAULT_VARIABLE: &str = "documenterSearchIndex";

const IDENTIFIER: &str = r"[A-Za-z_$][A-Za-z0-9_$]*";

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*(?:(?:var|let|const)\s+|window\.)({IDENTIFIER})\s*=\s*"
    ))
    .expect("assignment pattern is valid")
});

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{IDENTIFIER}$")).expect("identifier pattern is valid")
});

/// How the index payload is wrapped on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceFormat {
    /// Bare `{"docs": [...]}` object.
    Json,
    /// Script assigning the object to a global variable.
    Script { variable: String },
}

impl SourceFormat {
    pub fn script(variable: impl Into<String>) -> Self {
        Self::Script {
            variable: variable.into(),
        }
    }

    /// Check that this layout can be written and detected again.
    pub fn validate(&self) -> IndexResult<()> {
        match self {
            Self::Json => Ok(()),
            Self::Script { variable } => check_variable(variable),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Script { variable } => write!(f, "script ({variable})"),
        }
    }
}

/// Split raw file contents into its layout and the JSON payload.
pub fn detect(raw: &str) -> Result<(SourceFormat, &str), MalformedRecordError> {
    let trimmed = raw.trim_start_matches('\u{feff}').trim_start();

    if trimmed.starts_with('{') {
        tracing::debug!(target: "format", "detected plain JSON payload");
        return Ok((SourceFormat::Json, trimmed.trim_end()));
    }

    let captures = ASSIGNMENT.captures(trimmed).ok_or_else(|| {
        MalformedRecordError::shape("expected a JSON object or a `var NAME = {...}` assignment")
    })?;
    let variable = captures[1].to_string();
    let payload = trimmed[captures[0].len()..].trim_end();
    let payload = payload.strip_suffix(';').unwrap_or(payload).trim_end();

    tracing::debug!(target: "format", "detected script payload assigned to {variable}");
    Ok((SourceFormat::Script { variable }, payload))
}

/// Whether `name` is a variable name [`detect`] recognises.
pub fn is_valid_variable(name: &str) -> bool {
    VARIABLE.is_match(name)
}

/// Reject variable names that would produce an unreadable script.
pub fn check_variable(name: &str) -> IndexResult<()> {
    if is_valid_variable(name) {
        Ok(())
    } else {
        Err(IndexError::InvalidVariable {
            name: name.to_string(),
        })
    }
}

/// Wrap a serialized `docs` array in the script layout.
///
/// The variable name is written as given; see [`check_variable`].
pub fn wrap_script(variable: &str, docs_json: &str) -> String {
    format!("var {variable} = {{\"docs\":\n{docs_json}\n}}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_plain_json() {
        let (format, payload) = detect("  {\"docs\":[]}\n").unwrap();
        assert_eq!(format, SourceFormat::Json);
        assert_eq!(payload, "{\"docs\":[]}");
    }

    #[test]
    fn test_detect_documenter_script() {
        let raw = "var documenterSearchIndex = {\"docs\":\n[]\n}\n";
        let (format, payload) = detect(raw).unwrap();
        assert_eq!(format, SourceFormat::script(DEFAULT_VARIABLE));
        assert_eq!(payload, "{\"docs\":\n[]\n}");
    }

    #[test]
    fn test_detect_other_assignments() {
        let (format, payload) = detect("const idx={\"docs\":[]};").unwrap();
        assert_eq!(format, SourceFormat::script("idx"));
        assert_eq!(payload, "{\"docs\":[]}");

        let (format, _) = detect("window.searchData = {\"docs\":[]}").unwrap();
        assert_eq!(format, SourceFormat::script("searchData"));
    }

    #[test]
    fn test_detect_rejects_garbage() {
        let err = detect("function x() {}").unwrap_err();
        assert_eq!(err.record, None);
        assert!(detect("").is_err());
    }

    #[test]
    fn test_variable_names() {
        for name in ["documenterSearchIndex", "_idx", "$data", "index2"] {
            assert!(is_valid_variable(name), "{name} should be accepted");
        }
        for name in ["", "a-b", "search-index", "my index", "2fast", "window.x"] {
            assert!(!is_valid_variable(name), "{name} should be rejected");
        }

        assert!(SourceFormat::Json.validate().is_ok());
        assert!(SourceFormat::script("siteIndex").validate().is_ok());
        assert!(matches!(
            SourceFormat::script("a-b").validate(),
            Err(IndexError::InvalidVariable { name }) if name == "a-b"
        ));
    }

    #[test]
    fn test_wrap_script_layout() {
        let wrapped = wrap_script("documenterSearchIndex", "[]");
        assert_eq!(wrapped, "var documenterSearchIndex = {\"docs\":\n[]\n}\n");
        let (format, payload) = detect(&wrapped).unwrap();
        assert_eq!(format, SourceFormat::script("documenterSearchIndex"));
        assert_eq!(payload, "{\"docs\":\n[]\n}");
    }
}

//! Input/Output handling for the CLI.
//!
//! This module provides:
//! - JSON output envelope
//! - Stable process exit codes
//! - Text/JSON output switching

pub mod envelope;
pub mod exit_code;
pub mod output;

pub use envelope::{EntityType, Envelope, ErrorDetails, MessageType, ResultCode, SCHEMA_VERSION, Status};
pub use exit_code::ExitCode;
pub use output::{OutputFormat, OutputManager};

//! CLI argument parsing using clap.
//!
//! Contains the Cli struct and the Commands enum.

use clap::{
    Parser, Subcommand, ValueEnum,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Documentation search index inspector
#[derive(Parser)]
#[command(
    name = "docindex",
    version = env!("CARGO_PKG_VERSION"),
    about = "Load, validate and inspect documentation search indexes",
    long_about = "Load, validate and inspect the search index a documentation-site generator ships \
                  for client-side search (e.g. Documenter's search_index.js).",
    next_line_help = true,
    styles = clap_cargo_style(),
    after_help = "Examples:\n  docindex stats build/search_index.js\n  docindex lookup tutorials/particle_filter.html\n  docindex validate --strict\n  docindex export --format json -o index.json"
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output JSON envelopes instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize project
    #[command(about = "Set up .docindex directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings")]
    Config,

    /// Print every record in reading order
    #[command(about = "List all records in order")]
    List {
        /// Index file (defaults to index.path from settings)
        file: Option<PathBuf>,

        /// Maximum number of records to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print the records of one location
    #[command(
        about = "Show records for a location",
        after_help = "Examples:\n  docindex lookup index.html\n  docindex lookup 'tutorials/particle_filter.html#Setup' --file site/search_index.js"
    )]
    Lookup {
        /// Location to look up, e.g. `page.html#anchor`
        location: String,

        /// Index file (defaults to index.path from settings)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print page groups
    #[command(about = "List pages with their record counts")]
    Pages {
        /// Index file (defaults to index.path from settings)
        file: Option<PathBuf>,
    },

    /// Print summary counts
    #[command(about = "Show record, page and category counts")]
    Stats {
        /// Index file (defaults to index.path from settings)
        file: Option<PathBuf>,
    },

    /// Load and lint an index
    #[command(about = "Check an index for malformed records and consistency issues")]
    Validate {
        /// Index file (defaults to index.path from settings)
        file: Option<PathBuf>,

        /// Fail when consistency issues are found
        #[arg(long)]
        strict: bool,
    },

    /// Re-emit an index
    #[command(about = "Write the index as plain JSON or as a script")]
    Export {
        /// Index file (defaults to index.path from settings)
        file: Option<PathBuf>,

        /// Output layout
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Variable name for the script layout (defaults to index.variable_name)
        #[arg(long)]
        variable: Option<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Script,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_lookup_with_global_flags() {
        let cli = Cli::parse_from([
            "docindex",
            "lookup",
            "index.html",
            "--file",
            "site/search_index.js",
            "--json",
        ]);
        assert!(cli.json);
        match cli.command {
            Commands::Lookup { location, file } => {
                assert_eq!(location, "index.html");
                assert_eq!(file, Some(PathBuf::from("site/search_index.js")));
            }
            _ => panic!("expected lookup"),
        }
    }

    #[test]
    fn test_parse_export_defaults() {
        let cli = Cli::parse_from(["docindex", "export", "in.js", "--format", "script"]);
        match cli.command {
            Commands::Export {
                file,
                format,
                variable,
                output,
            } => {
                assert_eq!(file, Some(PathBuf::from("in.js")));
                assert_eq!(format, ExportFormat::Script);
                assert!(variable.is_none());
                assert!(output.is_none());
            }
            _ => panic!("expected export"),
        }
    }
}

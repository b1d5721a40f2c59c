use anyhow::Context;
use clap::Parser;
use docindex::cli::commands::{self, export, init, inspect, validate};
use docindex::cli::{Cli, Commands};
use docindex::io::{ExitCode, OutputFormat, OutputManager};
use docindex::{Settings, logging};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::GeneralError.into()
        }
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Settings::load()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .context("Failed to load configuration")?,
    };
    Ok(settings)
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_settings(&cli)?;
    logging::init_with_config(&config.logging);
    tracing::debug!(target: "cli", "effective index path: {}", config.index.path.display());

    let format = OutputFormat::from_flag(cli.json || config.output.json);
    let mut output = OutputManager::new(format);

    match cli.command {
        Commands::Init { force } => {
            let root = std::env::current_dir().context("Cannot determine current directory")?;
            init::run_init(&root, force, &mut output)
        }
        Commands::Config => init::run_config(&config, &mut output),
        Commands::List { file, limit } => {
            let path = commands::resolve_index_path(file, &config);
            inspect::run_list(&path, limit, &config, &mut output)
        }
        Commands::Lookup { location, file } => {
            let path = commands::resolve_index_path(file, &config);
            inspect::run_lookup(&path, &location, &config, &mut output)
        }
        Commands::Pages { file } => {
            let path = commands::resolve_index_path(file, &config);
            inspect::run_pages(&path, &mut output)
        }
        Commands::Stats { file } => {
            let path = commands::resolve_index_path(file, &config);
            inspect::run_stats(&path, &mut output)
        }
        Commands::Validate { file, strict } => {
            let path = commands::resolve_index_path(file, &config);
            validate::run(&path, strict, &mut output)
        }
        Commands::Export {
            file,
            format,
            variable,
            output: destination,
        } => {
            let path = commands::resolve_index_path(file, &config);
            export::run(&path, format, variable, destination, &config, &mut output)
        }
    }
}

//! Init and Config commands.

use anyhow::{Context, anyhow};
use std::io::Write;
use std::path::Path;

use crate::config::{CONFIG_DIR, CONFIG_FILE, Settings};
use crate::io::{ExitCode, OutputManager};

/// Run init command - create configuration file under `root`.
pub fn run_init<O: Write, E: Write>(
    root: &Path,
    force: bool,
    output: &mut OutputManager<O, E>,
) -> anyhow::Result<ExitCode> {
    let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

    if config_path.exists() && !force {
        writeln!(
            output.err(),
            "Configuration file already exists at: {}",
            config_path.display()
        )?;
        writeln!(output.err(), "Use --force to overwrite")?;
        return Ok(ExitCode::GeneralError);
    }

    let path = Settings::init_config_file(root, force)
        .map_err(|e| anyhow!("{e}"))
        .context("Failed to create configuration")?;
    writeln!(output.out(), "Created configuration file at: {}", path.display())?;
    writeln!(output.out(), "Edit this file to customize your settings.")?;
    Ok(ExitCode::Success)
}

/// Run config command - display current configuration.
pub fn run_config<O: Write, E: Write>(
    config: &Settings,
    output: &mut OutputManager<O, E>,
) -> anyhow::Result<ExitCode> {
    let toml_str = toml::to_string_pretty(config).context("Error displaying config")?;
    let heading = output.heading("Current Configuration:");
    writeln!(output.out(), "{heading}")?;
    writeln!(output.out(), "{}", "=".repeat(50))?;
    writeln!(output.out(), "{toml_str}")?;
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::OutputFormat;
    use tempfile::TempDir;

    fn buffers() -> OutputManager<Vec<u8>, Vec<u8>> {
        OutputManager::with_writers(OutputFormat::Text, Vec::new(), Vec::new())
    }

    #[test]
    fn test_init_then_refuse_overwrite() {
        let temp_dir = TempDir::new().unwrap();

        let mut output = buffers();
        assert_eq!(
            run_init(temp_dir.path(), false, &mut output).unwrap(),
            ExitCode::Success
        );
        assert!(temp_dir.path().join(".docindex/settings.toml").exists());

        let mut output = buffers();
        assert_eq!(
            run_init(temp_dir.path(), false, &mut output).unwrap(),
            ExitCode::GeneralError
        );
        let (_, err) = output.into_writers();
        assert!(String::from_utf8(err).unwrap().contains("--force"));
    }

    #[test]
    fn test_config_prints_toml() {
        let mut output = buffers();
        run_config(&Settings::default(), &mut output).unwrap();
        let (out, _) = output.into_writers();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("[index]"));
        assert!(out.contains("variable_name = \"documenterSearchIndex\""));
    }
}

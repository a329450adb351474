//! Config command
//!
//! Inspect and reset the prompt-reviewer configuration file.

use anyhow::{Context, Result};
use clap::Subcommand;
use pr_core::config::Config;
use std::fs;
use std::path::{Path, PathBuf};

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the configuration file path
    Path,

    /// Reset to default configuration
    Reset {
        /// Force reset without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration
    Validate,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, config_path: &Path) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(config_path, json),
        ConfigCommand::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
        ConfigCommand::Reset { force } => reset_config(config_path, force),
        ConfigCommand::Validate => validate_config(config_path),
    }
}

fn show_config(config_path: &Path, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    if config_path.exists() {
        println!("{}", config_path.display().to_string().dimmed());
    } else {
        println!(
            "{}",
            format!("{} (not found, showing defaults)", config_path.display()).dimmed()
        );
    }
    println!();
    println!("{}", config.to_toml_string()?);

    Ok(())
}

fn reset_config(config_path: &Path, force: bool) -> Result<()> {
    use colored::Colorize;

    if !force {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt("Reset configuration to defaults?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    if let Some(backup) = write_defaults(config_path)? {
        println!("{} Backed up to {}", "✓".green(), backup.display());
    }
    println!("{} Configuration reset to defaults.", "✓".green());

    Ok(())
}

/// Write the default configuration, backing up an existing file first
fn write_defaults(config_path: &Path) -> Result<Option<PathBuf>> {
    let backup = if config_path.exists() {
        let backup = PathBuf::from(format!(
            "{}.backup-{}",
            config_path.display(),
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        ));
        fs::copy(config_path, &backup)
            .with_context(|| format!("Failed to back up {}", config_path.display()))?;
        Some(backup)
    } else {
        None
    };

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content = format!(
        "# prompt-reviewer configuration\n\n{}",
        Config::default().to_toml_string()?
    );
    fs::write(config_path, content)?;

    Ok(backup)
}

fn validate_config(config_path: &Path) -> Result<()> {
    use colored::Colorize;

    if !config_path.exists() {
        println!(
            "{} No configuration at {}; defaults apply",
            "⚠".yellow(),
            config_path.display()
        );
        return Ok(());
    }

    let content = fs::read_to_string(config_path)?;
    Config::from_toml_str(&content)
        .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    println!("{} Configuration is valid", "✓".green());
    Ok(())
}

//! `mto config` command - inspect the effective configuration

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::{Config, THICKNESS_ENV, VALID_KEYS};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration, or a single value
    Show(ShowArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value (dotted, e.g. rates.seal)
    pub key: Option<String>,
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Path => run_path(global),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    // not validated: an out-of-range value must still be inspectable
    let config = Config::load(global.config.as_deref())?;

    if let Some(key) = &args.key {
        return match config.get_value(key) {
            Some(value) => {
                println!("{}", value);
                Ok(())
            }
            None => Err(miette::miette!(
                help = "run `mto config keys` to list recognised keys",
                "Unknown configuration key '{}'",
                key
            )),
        };
    }

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config).into_diagnostic()?);
        }
        _ => {
            print!("{}", serde_yml::to_string(&config).into_diagnostic()?);
        }
    }
    Ok(())
}

fn run_path(global: &GlobalOpts) -> Result<()> {
    println!("{}", style("Configuration file paths:").bold());
    println!();

    match Config::global_config_path() {
        Some(path) => print_path("Global:", &path),
        None => println!(
            "  {} {}",
            style("Global:").cyan(),
            style("(no config directory)").dim()
        ),
    }
    print_path("Project:", &Config::project_config_path());
    if let Some(path) = &global.config {
        print_path("Explicit:", path);
    }

    println!();
    println!(
        "{}",
        style(format!(
            "Later files override earlier ones; {} and --thickness override all files.",
            THICKNESS_ENV
        ))
        .dim()
    );
    Ok(())
}

fn print_path(label: &str, path: &std::path::Path) {
    let state = if path.exists() {
        style("(exists)").green()
    } else {
        style("(not created)").dim()
    };
    println!("  {:<10} {} {}", style(label).cyan(), path.display(), state);
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in VALID_KEYS {
        println!("  {:<22} {}", style(key).cyan(), style(description).dim());
    }
    Ok(())
}

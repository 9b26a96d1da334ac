//! ---
//! px_section: "05-external-interfaces"
//! px_subsection: "binary"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Control CLI for inspecting component types and definitions."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use plexus_common::config::{HostConfig, LoadedHostConfig};
use plexus_common::{init_tracing, VERSION};
use plexus_core::ComponentRegistry;
use plexus_logging as logging;

mod defs;
mod types;

const DEFAULT_CONFIG_FILE: &str = "plexus.toml";

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "Plexus component host utility",
    long_about = None
)]
struct Cli {
    #[arg(
        short = 'V',
        long = "version",
        action = ArgAction::SetTrue,
        help = "Print version information and exit"
    )]
    version: bool,
    /// Host configuration file (overrides PLEXUS_CONFIG; defaults to ./plexus.toml when present).
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List registered component types and their schema fields.
    List(types::ListCommand),
    /// Validate and load every declaration below a path.
    Check(defs::CheckCommand),
    /// Load, build and merge definitions below a path and print them.
    Build(defs::BuildCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("plexusctl {}", VERSION);
        return Ok(());
    }
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let host = load_host_config(cli.config)?;
    match host.source {
        Some(_) => init_tracing("plexusctl", &host.config.logging),
        None => logging::init(),
    }
    let registry = registry()?;

    match command {
        Commands::List(cmd) => cmd.execute(&registry),
        Commands::Check(cmd) => cmd.execute(&registry, &host.config),
        Commands::Build(cmd) => cmd.execute(&registry, &host.config),
    }
}

/// `--config` takes precedence over `PLEXUS_CONFIG`.
fn load_host_config(explicit: Option<PathBuf>) -> Result<LoadedHostConfig> {
    match explicit {
        Some(path) => HostConfig::resolve(Some(path.as_path()), &[DEFAULT_CONFIG_FILE]),
        None => HostConfig::load_with_source(&[DEFAULT_CONFIG_FILE]),
    }
}

/// Component types compiled into this binary.
fn registry() -> Result<ComponentRegistry> {
    let mut registry = ComponentRegistry::new();
    plexus_sample::register(&mut registry)?;
    Ok(registry)
}

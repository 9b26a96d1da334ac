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
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use plexus_common::config::HostConfig;
use plexus_core::{
    build_defs_from_folder, load_components_from_folder, ArtifactKind, ComponentRegistry,
};

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Declaration file or folder (defaults to `components_root` from the host config).
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct BuildCommand {
    /// Declaration file or folder (defaults to `components_root` from the host config).
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Output encoding for the merged definitions.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn resolve_root(path: Option<PathBuf>, host: &HostConfig) -> PathBuf {
    path.unwrap_or_else(|| host.components_root.clone())
}

impl CheckCommand {
    pub fn execute(self, registry: &ComponentRegistry, host: &HostConfig) -> Result<()> {
        let root = resolve_root(self.path, host);
        let loaded =
            load_components_from_folder(registry, &root, Arc::new(host.resources.clone()))
                .with_context(|| format!("check failed under {}", root.display()))?;

        for component in &loaded {
            println!(
                "ok  {:<24} {}",
                component.name(),
                component.declaration_path().display()
            );
        }
        println!("{} component(s) loaded", loaded.len());
        Ok(())
    }
}

impl BuildCommand {
    pub fn execute(self, registry: &ComponentRegistry, host: &HostConfig) -> Result<()> {
        let root = resolve_root(self.path, host);
        let defs = build_defs_from_folder(registry, &root, Arc::new(host.resources.clone()))
            .with_context(|| format!("failed to build definitions under {}", root.display()))?;

        let rendered = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&defs)?,
            OutputFormat::Yaml => serde_yaml::to_string(&defs)?,
        };
        println!("{}", rendered.trim_end());

        let counts: Vec<String> = ArtifactKind::all()
            .iter()
            .map(|kind| format!("{}={}", kind, defs.count(*kind)))
            .collect();
        eprintln!("definitions: {}", counts.join(" "));
        Ok(())
    }
}

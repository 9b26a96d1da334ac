//! ---
//! px_section: "01-core-functionality"
//! px_subsection: "module"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Shared primitives and utilities for component hosts."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::logging::LogFormat;

fn default_components_root() -> PathBuf {
    PathBuf::from("components")
}

fn default_logging_directory() -> PathBuf {
    PathBuf::from("target/logs")
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_file_output() -> bool {
    true
}

/// Primary configuration object for a component host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Folder scanned for `component.yaml` declarations when no path is given.
    #[serde(default = "default_components_root")]
    pub components_root: PathBuf,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Named external resources offered to components through the load context.
    #[serde(default)]
    pub resources: IndexMap<String, serde_yaml::Value>,
}

/// Metadata describing where a [`HostConfig`] was loaded from.
///
/// `source` is `None` when no configuration file was found and defaults apply.
#[derive(Debug, Clone)]
pub struct LoadedHostConfig {
    pub config: HostConfig,
    pub source: Option<PathBuf>,
}

impl HostConfig {
    pub const ENV_CONFIG_PATH: &'static str = "PLEXUS_CONFIG";

    /// Load configuration together with the effective source path.
    ///
    /// A non-blank `PLEXUS_CONFIG` is used as the override path of [`HostConfig::resolve`].
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedHostConfig> {
        let env_path = std::env::var(Self::ENV_CONFIG_PATH)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        Self::resolve(env_path.as_deref(), candidates)
    }

    /// Resolve the configuration from an override path or the candidate list.
    ///
    /// An override path must exist. Candidate paths are probed in order and the
    /// defaults are used when none of them exists.
    pub fn resolve<P: AsRef<Path>>(
        override_path: Option<&Path>,
        candidates: &[P],
    ) -> Result<LoadedHostConfig> {
        if let Some(path) = override_path {
            return Ok(LoadedHostConfig {
                config: Self::from_file(path)?,
                source: Some(path.to_path_buf()),
            });
        }

        for candidate in candidates {
            let path = candidate.as_ref();
            if path.exists() {
                let config = Self::from_file(path)?;
                return Ok(LoadedHostConfig {
                    config,
                    source: Some(path.to_path_buf()),
                });
            }
        }

        debug!("no host configuration file found, using defaults");
        Ok(LoadedHostConfig {
            config: Self::default(),
            source: None,
        })
    }

    /// Read and validate a single configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading host configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<HostConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        if self.components_root.as_os_str().is_empty() {
            return Err(anyhow!("components_root cannot be empty"));
        }
        for key in self.resources.keys() {
            if key.trim().is_empty() {
                return Err(anyhow!("resource names cannot be blank"));
            }
        }
        Ok(())
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            components_root: default_components_root(),
            logging: LoggingConfig::default(),
            resources: IndexMap::new(),
        }
    }
}

impl std::str::FromStr for HostConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: HostConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// Keep a daily JSON log file in `directory` next to console output.
    #[serde(default = "default_file_output")]
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_logging_directory(),
            format: default_log_format(),
            file: default_file_output(),
        }
    }
}

//! ---
//! px_section: "01-core-functionality"
//! px_subsection: "module"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Shared primitives and utilities for component hosts."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
//! Shared primitives for the Plexus workspace.
//! This crate exposes host configuration loading and tracing
//! initialisation consumed by the CLI and integration tests.

pub mod config;
pub mod logging;

pub use config::{HostConfig, LoadedHostConfig, LoggingConfig};
pub use logging::{init_tracing, LogFormat};

/// Version string of the running Plexus tooling.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

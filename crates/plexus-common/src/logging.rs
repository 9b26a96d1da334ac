//! ---
//! px_section: "01-core-functionality"
//! px_subsection: "module"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Shared primitives and utilities for component hosts."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::daily;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();
static STDERR_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Available log formats for host tooling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    StructuredJson,
    #[default]
    Pretty,
}

/// Path prefix of the daily log files written for `service_name`.
///
/// The appender adds a date suffix, e.g. `target/logs/plexusctl.log.2024-05-01`.
pub fn log_file_prefix(service_name: &str, config: &LoggingConfig) -> PathBuf {
    config.directory.join(format!("{service_name}.log"))
}

fn file_writer(service_name: &str, config: &LoggingConfig) -> Result<Option<NonBlocking>> {
    if !config.file {
        return Ok(None);
    }
    std::fs::create_dir_all(&config.directory).with_context(|| {
        format!(
            "unable to create log directory {}",
            config.directory.display()
        )
    })?;
    let appender = daily(&config.directory, format!("{service_name}.log"));
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = FILE_GUARD.set(guard);
    Ok(Some(writer))
}

/// Initialize the tracing subscriber for a host process.
///
/// * The filter comes from [`plexus_logging::env_filter`]: `PLEXUS_LOG`, then
///   `RUST_LOG`, defaulting to `info`.
/// * Console output goes to stderr so command output on stdout stays machine readable.
/// * With `config.file` set, a daily JSON log named after `service_name` is kept in
///   `config.directory`. When that directory cannot be created the host keeps
///   running with console output only and logs a warning.
pub fn init_tracing(service_name: &str, config: &LoggingConfig) {
    let (file_sink, file_error) = match file_writer(service_name, config) {
        Ok(writer) => (writer, None),
        Err(err) => (None, Some(err)),
    };
    let (stderr_writer, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());
    let _ = STDERR_GUARD.set(stderr_guard);

    let console_layer = match config.format {
        LogFormat::StructuredJson => fmt::layer()
            .with_target(false)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .json()
            .with_writer(stderr_writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(stderr_writer)
            .boxed(),
    };

    let file_layer = file_sink.map(|writer| {
        fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .json()
            .with_writer(writer)
            .boxed()
    });
    let log_file = if file_layer.is_some() {
        log_file_prefix(service_name, config).display().to_string()
    } else {
        "-".to_owned()
    };

    tracing_subscriber::registry()
        .with(plexus_logging::env_filter())
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .ok();

    if let Some(err) = file_error {
        warn!(service = %service_name, error = %format!("{err:#}"), "file logging disabled");
    }
    info!(
        service = %service_name,
        log_file = %log_file,
        format = ?config.format,
        "tracing initialised"
    );
}

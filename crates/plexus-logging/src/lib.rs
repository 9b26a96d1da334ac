//! ---
//! px_section: "03-logging"
//! px_subsection: "module"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Structured logging adapters for component lifecycle events."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
#![warn(missing_docs)]

//! Structured logging helpers shared by component hosts and components.

use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Registry};

/// Convenience macros attaching a [`LogContext`] to tracing events.
pub mod macros;

/// Environment variable holding the Plexus log filter.
pub const LOG_ENV: &str = "PLEXUS_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Pick the filter directive: `PLEXUS_LOG`, then `RUST_LOG`, then `info`.
///
/// Blank values count as unset.
pub fn filter_directive(plexus_log: Option<String>, rust_log: Option<String>) -> String {
    plexus_log
        .into_iter()
        .chain(rust_log)
        .map(|directive| directive.trim().to_owned())
        .find(|directive| !directive.is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_owned())
}

/// Build the [`EnvFilter`] from the process environment.
///
/// An unparsable directive is reported on stderr and replaced by `info`.
pub fn env_filter() -> EnvFilter {
    let directive = filter_directive(
        std::env::var(LOG_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );
    EnvFilter::try_new(&directive).unwrap_or_else(|err| {
        eprintln!("invalid log filter `{directive}` ({err}); defaulting to {DEFAULT_DIRECTIVE}");
        EnvFilter::new(DEFAULT_DIRECTIVE)
    })
}

/// Initialize a console-only subscriber on stderr, filtered by [`env_filter`].
pub fn init() {
    let _ = Registry::default()
        .with(env_filter())
        .with(subscriber_fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Step of the component pipeline a log event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Raw parameters are being validated against the schema.
    Validate,
    /// The component instance is being constructed.
    Load,
    /// Definitions are being produced by the component.
    Build,
    /// Definitions are being merged into the host aggregate.
    Merge,
}

impl Phase {
    /// Stable lowercase label used as the `phase` field value.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Validate => "validate",
            Phase::Load => "load",
            Phase::Build => "build",
            Phase::Merge => "merge",
        }
    }
}

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Registered component type name.
    pub component: Option<&'a str>,
    /// Location of the declaration being processed.
    pub declaration: Option<&'a str>,
    /// Pipeline phase.
    pub phase: Option<Phase>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a component type name.
    pub fn with_component(mut self, component: &'a str) -> Self {
        self.component = Some(component);
        self
    }

    /// Attach a declaration location.
    pub fn with_declaration(mut self, declaration: &'a str) -> Self {
        self.declaration = Some(declaration);
        self
    }

    /// Attach a pipeline phase.
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }
}

/// High-level outcome used when emitting lifecycle log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The operation completed successfully.
    Success,
    /// The operation failed and the error was handed back to the caller.
    Fault,
}

impl EventOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            EventOutcome::Success => "success",
            EventOutcome::Fault => "fault",
        }
    }
}

/// Emit a standardized component lifecycle event with a success/fault outcome.
pub fn log_component_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: EventOutcome,
) {
    let default_ctx = LogContext::default();
    let ctx = context.unwrap_or(&default_ctx);
    let phase = ctx.phase.map(Phase::as_str).unwrap_or("");
    match outcome {
        EventOutcome::Success => tracing::event!(
            Level::INFO,
            event,
            outcome = outcome.as_str(),
            component = ctx.component.unwrap_or(""),
            declaration = ctx.declaration.unwrap_or(""),
            phase,
            message = %message
        ),
        EventOutcome::Fault => tracing::event!(
            Level::ERROR,
            event,
            outcome = outcome.as_str(),
            component = ctx.component.unwrap_or(""),
            declaration = ctx.declaration.unwrap_or(""),
            phase,
            message = %message
        ),
    }
}

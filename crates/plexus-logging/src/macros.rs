//! ---
//! px_section: "03-logging"
//! px_subsection: "module"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Structured logging adapters for component lifecycle events."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
/// Emit an informational log enriched with component context.
#[macro_export]
macro_rules! px_info {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::INFO,
            component = ctx.component.unwrap_or(""),
            declaration = ctx.declaration.unwrap_or(""),
            phase = ctx.phase.map($crate::Phase::as_str).unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        $crate::px_info!(context = $crate::LogContext::default(), $($arg)+)
    }};
}

/// Emit a debug log enriched with component context.
#[macro_export]
macro_rules! px_debug {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::DEBUG,
            component = ctx.component.unwrap_or(""),
            declaration = ctx.declaration.unwrap_or(""),
            phase = ctx.phase.map($crate::Phase::as_str).unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        $crate::px_debug!(context = $crate::LogContext::default(), $($arg)+)
    }};
}

/// Emit an error log enriched with component context.
#[macro_export]
macro_rules! px_error {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::ERROR,
            component = ctx.component.unwrap_or(""),
            declaration = ctx.declaration.unwrap_or(""),
            phase = ctx.phase.map($crate::Phase::as_str).unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        $crate::px_error!(context = $crate::LogContext::default(), $($arg)+)
    }};
}

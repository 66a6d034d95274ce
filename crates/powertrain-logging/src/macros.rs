//! ---
//! pt_section: "03-logging"
//! pt_subsection: "module"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Structured diagnostic logging adapters."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
#[doc(hidden)]
#[macro_export]
macro_rules! __pt_event {
    ($level:expr, context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        $crate::tracing::event!(
            $level,
            station = ctx.station.unwrap_or(""),
            worker = ctx.worker.unwrap_or(""),
            sequence = ctx.sequence.unwrap_or_default(),
            message = %format_args!($($arg)+)
        );
    }};
    ($level:expr, $($arg:tt)+) => {{
        $crate::__pt_event!($level, context = $crate::LogContext::default(), $($arg)+)
    }};
}

/// Emit an informational log enriched with line context.
#[macro_export]
macro_rules! pt_info {
    ($($arg:tt)+) => { $crate::__pt_event!($crate::tracing::Level::INFO, $($arg)+) };
}

/// Emit a debug log enriched with line context.
#[macro_export]
macro_rules! pt_debug {
    ($($arg:tt)+) => { $crate::__pt_event!($crate::tracing::Level::DEBUG, $($arg)+) };
}

/// Emit a warning enriched with line context.
#[macro_export]
macro_rules! pt_warn {
    ($($arg:tt)+) => { $crate::__pt_event!($crate::tracing::Level::WARN, $($arg)+) };
}

/// Emit an error log enriched with line context.
#[macro_export]
macro_rules! pt_error {
    ($($arg:tt)+) => { $crate::__pt_event!($crate::tracing::Level::ERROR, $($arg)+) };
}

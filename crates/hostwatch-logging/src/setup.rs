//! Configuration surface over the process-wide registry.
//!
//! Thin free functions for the agent's startup and reload paths; every one
//! of them delegates to [`LogRegistry`](crate::LogRegistry), which is where
//! the semantics (and the tests) live.

use std::path::Path;
use std::sync::Arc;

use crate::format::Args;
use crate::registry::{registry, LogSettings};
use crate::sink::EventSink;

/// Sets the file target on the Log, Debug, and Trace channels.
pub fn change_log_file_name(path: impl AsRef<Path>) {
    registry().change_log_file_name(path);
}

/// Toggles Debug-channel file output.
pub fn enable_debug_log(enable: bool) {
    registry().enable_debug_log(enable);
}

/// Toggles debugger output on the Log, Debug, and Trace channels.
pub fn enable_windbg(enable: bool) {
    registry().enable_windbg(enable);
}

/// Re-derives filename and directions from the current settings.
pub fn reconfigure() {
    registry().reconfigure();
}

/// Replaces the settings source of truth and re-derives everything from it.
/// The agent calls this once its configuration is parsed.
pub fn configure(settings: LogSettings) {
    let registry = registry();
    registry.update_settings(settings);
    registry.reconfigure();
}

/// Installs the OS event-log adapter.
pub fn set_event_sink(sink: Arc<dyn EventSink>) {
    registry().set_event_sink(sink);
}

/// Renders and fires one critical event at the OS event log, bypassing the
/// channel sinks. Fire-and-forget.
pub fn emit_critical_event(id: u32, fmt: &str, args: Args<'_>) {
    registry().log().emit_event(id, fmt, args);
}

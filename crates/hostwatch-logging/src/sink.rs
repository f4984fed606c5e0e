use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use crate::emitter::Severity;

/// Event id used when a write is escalated by `Mods::CRIT_ERROR`.
pub const EVENT_ID_CRITICAL: u32 = 1;

/// Timestamp column of the file sink. Renders to exactly 23 characters, so
/// with the single separator space the severity tag / message always starts
/// at column 24.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Appends one formatted line to `path`.
///
/// An empty or unopenable path is a silent no-op; the file sink never fails
/// the write call.
pub(crate) fn append_line(path: &Path, severity: Severity, message: &str) {
    if path.as_os_str().is_empty() {
        return;
    }
    let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
    let _ = writeln!(file, "{} {}{}", timestamp, severity.tag(), message);
}

/// Writes one line to the debugger console.
///
/// Stderr stands in for an attached debugger here; it needs no external
/// resource, so this is the sink every degraded write can still reach.
pub(crate) fn write_debugger(prefix_ascii: &str, severity: Severity, message: &str) {
    let mut stderr = io::stderr().lock();
    if prefix_ascii.is_empty() {
        let _ = writeln!(stderr, "{}{}", severity.tag(), message);
    } else {
        let _ = writeln!(stderr, "{}: {}{}", prefix_ascii, severity.tag(), message);
    }
}

/// Writes the rendered message verbatim to stdout.
///
/// The stdio channel is raw: no timestamp, no tag, no implicit newline.
/// Callers that want a line ending include it in the message.
pub(crate) fn write_stdout(message: &str) {
    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(message.as_bytes());
    let _ = stdout.flush();
}

/// Call contract of the OS event-log adapter.
///
/// The adapter itself lives in the OS layer; the core only needs a
/// fire-and-forget emission with a severity id and a rendered message.
pub trait EventSink: Send + Sync {
    fn emit(&self, id: u32, message: &str);
}

/// Default adapter: discards every event. Installed until the OS layer
/// registers a real one.
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&self, _id: u32, _message: &str) {}
}

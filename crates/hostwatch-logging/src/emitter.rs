use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::directions::{Directions, Mods};
use crate::format::{self, Args};
use crate::params::ChannelParams;
use crate::registry::LogSettings;
use crate::sink::{self, EventSink, NullEventSink, EVENT_ID_CRITICAL};

/// Identity of a logical channel. Fixes the channel's default direction
/// policy and whether it is subject to release-build suppression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogType {
    /// Operational log: always on, file plus debugger by default.
    Log,
    /// Debug trace: debugger by default, file when the debug level asks.
    Debug,
    /// Verbose trace: debugger only by default.
    Trace,
    /// Raw stdio: stdout only, immune to every configuration toggle.
    Stdio,
}

/// Severity rendered into the line prefix by the file and debugger sinks.
///
/// Tags are fixed-width so that columns align; Info deliberately has no tag
/// and the message begins right after the timestamp field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Trace,
    Warn,
    Err,
    Info,
    Crit,
}

impl Severity {
    pub(crate) fn tag(self) -> &'static str {
        match self {
            Severity::Trace => "[Trace] ",
            Severity::Warn => "[Warn ] ",
            Severity::Err => "[Err  ] ",
            Severity::Info => "",
            Severity::Crit => "[ERROR:CRITICAL] ",
        }
    }
}

/// Decides which sinks fire for one call: the persisted channel state
/// widened by the one-shot overrides. Pure; never mutates the channel.
fn active_sinks(directions: Directions, mods: Mods) -> Directions {
    let mut active = directions;
    if mods.contains(Mods::FILE) {
        active = active.with(Directions::FILE);
    }
    if mods.intersects(Mods::EVENT | Mods::CRIT_ERROR) {
        active = active.with(Directions::EVENT);
    }
    active
}

/// Hook for `Mods::BREAKPOINT`. The actual trap instruction belongs to the
/// OS layer; the core keeps the hook inert.
fn breakpoint_hook() {}

/// One logical channel: owns its parameters and serializes its sink output.
///
/// Every write snapshots the parameters once, so a concurrent
/// reconfiguration is observed either fully or not at all, and writes never
/// interleave partial lines on a sink.
pub struct Emitter {
    ty: LogType,
    params: RwLock<ChannelParams>,
    io: Mutex<()>,
    event_sink: RwLock<Arc<dyn EventSink>>,
}

impl Emitter {
    /// Channel with the compiled-default settings. Registry construction
    /// uses [`with_settings`](Self::with_settings) instead.
    pub fn new(ty: LogType) -> Self {
        Self::with_settings(ty, &LogSettings::default())
    }

    pub fn with_settings(ty: LogType, settings: &LogSettings) -> Self {
        let directions = default_directions(ty, settings);
        let filename = match ty {
            LogType::Stdio => PathBuf::new(),
            _ => settings.log_file.clone(),
        };
        Self {
            ty,
            params: RwLock::new(ChannelParams::new(directions, filename, &settings.prefix)),
            io: Mutex::new(()),
            event_sink: RwLock::new(Arc::new(NullEventSink)),
        }
    }

    pub fn log_type(&self) -> LogType {
        self.ty
    }

    pub fn directions(&self) -> Directions {
        self.read_params().directions()
    }

    pub fn filename(&self) -> PathBuf {
        self.read_params().filename().to_path_buf()
    }

    pub fn prefix(&self) -> String {
        self.read_params().prefix().to_owned()
    }

    pub fn prefix_ascii(&self) -> String {
        self.read_params().prefix_ascii().to_owned()
    }

    /// Sets this channel's file target. An empty path clears the target
    /// without touching any direction flag.
    pub fn config_file(&self, path: impl AsRef<Path>) {
        self.write_params().set_filename(path.as_ref());
    }

    pub fn config_prefix(&self, prefix: &str) {
        self.write_params().set_prefix(prefix);
    }

    pub fn enable_file_log(&self, enable: bool) {
        let mut params = self.write_params();
        if enable {
            params.add_directions(Directions::FILE);
        } else {
            params.remove_directions(Directions::FILE);
        }
    }

    pub fn set_directions(&self, directions: Directions) {
        self.write_params().set_directions(directions);
    }

    pub fn add_directions(&self, directions: Directions) {
        self.write_params().add_directions(directions);
    }

    pub fn remove_directions(&self, directions: Directions) {
        self.write_params().remove_directions(directions);
    }

    pub fn set_event_sink(&self, sink: Arc<dyn EventSink>) {
        *self.write_event_sink() = sink;
    }

    /// Re-derives filename, prefix, and directions from `settings` under a
    /// single lock acquisition, so a concurrent writer sees the old or the
    /// new channel state in full, never a mix.
    pub fn reconfigure(&self, settings: &LogSettings) {
        let directions = default_directions(self.ty, settings);
        let filename = match self.ty {
            LogType::Stdio => PathBuf::new(),
            _ => settings.log_file.clone(),
        };
        let mut params = self.write_params();
        params.set_filename(filename);
        params.set_prefix(&settings.prefix);
        params.set_directions(directions);
    }

    /// Formatted write with one-shot overrides.
    ///
    /// `Mods::DROP` suppresses the call entirely; `Mods::CRIT_ERROR` makes
    /// the line critical. Formatting mismatches render best-effort and the
    /// call never fails. Returns the rendered line so it can be forwarded,
    /// for instance into the stdio channel's stream.
    pub fn write(&self, mods: Mods, fmt: &str, args: Args<'_>) -> String {
        let message = format::formatv(fmt, args);
        if !mods.contains(Mods::DROP) {
            let severity = if mods.contains(Mods::CRIT_ERROR) {
                Severity::Crit
            } else {
                Severity::Info
            };
            self.dispatch(severity, mods, &message);
        }
        message
    }

    /// Formatted critical write: tags the line and routes to the event sink.
    pub fn crit(&self, fmt: &str, args: Args<'_>) -> String {
        self.write(Mods::CRIT_ERROR, fmt, args)
    }

    /// Begins a streamed line with no tag; flushed once when dropped.
    pub fn line(&self) -> LineStream<'_> {
        self.stream(Severity::Info, Mods::NONE)
    }

    /// Begins a streamed line carrying one-shot overrides.
    pub fn line_with(&self, mods: Mods) -> LineStream<'_> {
        let severity = if mods.contains(Mods::CRIT_ERROR) {
            Severity::Crit
        } else {
            Severity::Info
        };
        self.stream(severity, mods)
    }

    /// Streamed trace line: `[Trace] `.
    pub fn t(&self) -> LineStream<'_> {
        self.stream(Severity::Trace, Mods::NONE)
    }

    /// Streamed warning line: `[Warn ] `.
    pub fn w(&self) -> LineStream<'_> {
        self.stream(Severity::Warn, Mods::NONE)
    }

    /// Streamed error line: `[Err  ] `.
    pub fn e(&self) -> LineStream<'_> {
        self.stream(Severity::Err, Mods::NONE)
    }

    /// Streamed info line; no tag, message starts right after the timestamp.
    pub fn i(&self) -> LineStream<'_> {
        self.stream(Severity::Info, Mods::NONE)
    }

    /// Renders and sends straight to the event sink, bypassing the other
    /// sinks. Fire-and-forget.
    pub fn emit_event(&self, id: u32, fmt: &str, args: Args<'_>) {
        let message = format::formatv(fmt, args);
        let sink = Arc::clone(&self.read_event_sink());
        sink.emit(id, &message);
    }

    fn stream(&self, severity: Severity, mods: Mods) -> LineStream<'_> {
        LineStream {
            emitter: self,
            severity,
            mods,
            buf: String::new(),
        }
    }

    /// Debug-type channels go quiet in release builds unless forced.
    fn suppressed(&self) -> bool {
        matches!(self.ty, LogType::Debug | LogType::Trace) && !cfg!(debug_assertions)
    }

    fn dispatch(&self, severity: Severity, mods: Mods, message: &str) {
        if mods.contains(Mods::DROP) {
            return;
        }
        if self.suppressed() && !mods.contains(Mods::FORCE) {
            return;
        }
        if mods.contains(Mods::BREAKPOINT) {
            breakpoint_hook();
        }

        // One snapshot per call: a concurrent reconfigure is seen fully or
        // not at all.
        let (directions, filename, prefix_ascii) = {
            let params = self.read_params();
            (
                params.directions(),
                params.filename().to_path_buf(),
                params.prefix_ascii().to_owned(),
            )
        };
        let active = active_sinks(directions, mods);
        if active.is_empty() {
            return;
        }

        let _io = self.lock_io();
        if active.contains(Directions::DEBUGGER) {
            sink::write_debugger(&prefix_ascii, severity, message);
        }
        if active.contains(Directions::STDIO) {
            sink::write_stdout(message);
        }
        if active.contains(Directions::FILE) {
            sink::append_line(&filename, severity, message);
        }
        if active.contains(Directions::EVENT) {
            let event_sink = Arc::clone(&self.read_event_sink());
            event_sink.emit(EVENT_ID_CRITICAL, message);
        }
    }

    // Lock helpers: a poisoned lock only means another writer panicked
    // mid-log; the state is a plain value, so keep going rather than take
    // the whole process down with it.

    fn read_params(&self) -> RwLockReadGuard<'_, ChannelParams> {
        self.params.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_params(&self) -> RwLockWriteGuard<'_, ChannelParams> {
        self.params.write().unwrap_or_else(|e| e.into_inner())
    }

    fn read_event_sink(&self) -> RwLockReadGuard<'_, Arc<dyn EventSink>> {
        self.event_sink.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_event_sink(&self) -> RwLockWriteGuard<'_, Arc<dyn EventSink>> {
        self.event_sink.write().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_io(&self) -> MutexGuard<'_, ()> {
        self.io.lock().unwrap_or_else(|e| e.into_inner())
    }
}

pub(crate) fn default_directions(ty: LogType, settings: &LogSettings) -> Directions {
    let debugger = if settings.windbg {
        Directions::DEBUGGER
    } else {
        Directions::NONE
    };
    match ty {
        LogType::Log => debugger | Directions::FILE,
        LogType::Debug => {
            if settings.debug_level >= 1 {
                debugger | Directions::FILE
            } else {
                debugger
            }
        }
        LogType::Trace => debugger,
        LogType::Stdio => Directions::STDIO,
    }
}

/// Line builder returned by the streamed-write entry points.
///
/// Text accumulates through chained [`push`](Self::push) calls; the line is
/// dispatched to the active sinks exactly once, when the builder drops.
pub struct LineStream<'a> {
    emitter: &'a Emitter,
    severity: Severity,
    mods: Mods,
    buf: String,
}

impl LineStream<'_> {
    /// Appends a value to the pending line and returns the builder for
    /// chaining.
    pub fn push(mut self, value: impl fmt::Display) -> Self {
        let _ = write!(self.buf, "{value}");
        self
    }

    /// Explicit end of line. Dropping the builder does the same.
    pub fn flush(self) {}
}

impl Drop for LineStream<'_> {
    fn drop(&mut self) {
        self.emitter.dispatch(self.severity, self.mods, &self.buf);
    }
}

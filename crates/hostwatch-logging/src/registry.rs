use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;

use crate::directions::Directions;
use crate::emitter::{Emitter, LogType};
use crate::sink::EventSink;

/// External configuration the registry derives channel state from: the
/// source of truth consulted by [`LogRegistry::reconfigure`].
#[derive(Clone, Debug)]
pub struct LogSettings {
    /// Debug level; `>= 1` enables Debug-channel file output by default.
    pub debug_level: u32,
    /// Whether channels print to the attached debugger console.
    pub windbg: bool,
    /// Default file target for the Log, Debug, and Trace channels.
    pub log_file: PathBuf,
    /// Message prefix shared by all channels.
    pub prefix: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            debug_level: 0,
            windbg: true,
            log_file: std::env::temp_dir().join("hostwatch.log"),
            prefix: "hostwatch".to_owned(),
        }
    }
}

/// The process-wide set of four channels plus the settings they were, and
/// will be, derived from.
///
/// All mutation goes through the configuration surface below; each
/// operation takes the per-channel locks, so a concurrent writer sees
/// either the pre- or post-mutation state, never a mix.
pub struct LogRegistry {
    log: Emitter,
    debug: Emitter,
    trace: Emitter,
    stdio: Emitter,
    settings: RwLock<LogSettings>,
}

impl LogRegistry {
    pub fn new(settings: LogSettings) -> Self {
        Self {
            log: Emitter::with_settings(LogType::Log, &settings),
            debug: Emitter::with_settings(LogType::Debug, &settings),
            trace: Emitter::with_settings(LogType::Trace, &settings),
            stdio: Emitter::with_settings(LogType::Stdio, &settings),
            settings: RwLock::new(settings),
        }
    }

    /// Operational log channel.
    pub fn log(&self) -> &Emitter {
        &self.log
    }

    /// Debug trace channel.
    pub fn debug(&self) -> &Emitter {
        &self.debug
    }

    /// Verbose trace channel.
    pub fn trace(&self) -> &Emitter {
        &self.trace
    }

    /// Raw stdio channel.
    pub fn stdio(&self) -> &Emitter {
        &self.stdio
    }

    pub fn settings(&self) -> LogSettings {
        self.read_settings().clone()
    }

    /// Replaces the source of truth without touching any channel. Call
    /// [`reconfigure`](Self::reconfigure) to apply it.
    pub fn update_settings(&self, settings: LogSettings) {
        *self
            .settings
            .write()
            .unwrap_or_else(|e| e.into_inner()) = settings;
    }

    /// Sets the file target on Log, Debug, and Trace. Direction flags and
    /// the Stdio channel are untouched.
    pub fn change_log_file_name(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        for emitter in [&self.log, &self.debug, &self.trace] {
            emitter.config_file(path);
        }
    }

    /// Toggles file output on the Debug channel only.
    pub fn enable_debug_log(&self, enable: bool) {
        self.debug.enable_file_log(enable);
    }

    /// Toggles debugger output on Log, Debug, and Trace. Stdio never has
    /// debugger output to begin with.
    pub fn enable_windbg(&self, enable: bool) {
        for emitter in [&self.log, &self.debug, &self.trace] {
            if enable {
                emitter.add_directions(Directions::DEBUGGER);
            } else {
                emitter.remove_directions(Directions::DEBUGGER);
            }
        }
    }

    /// Recomputes filename and directions for Log, Debug, and Trace from
    /// the stored settings. The single "back to the source of truth"
    /// operation; Stdio stays untouched with an empty filename.
    ///
    /// Each channel is replaced in one step, so a concurrent writer never
    /// observes the new filename paired with the old flags or vice versa.
    pub fn reconfigure(&self) {
        let settings = self.settings();
        for emitter in [&self.log, &self.debug, &self.trace] {
            emitter.reconfigure(&settings);
        }
    }

    /// Installs the OS event-log adapter on every channel.
    pub fn set_event_sink(&self, sink: Arc<dyn EventSink>) {
        for emitter in [&self.log, &self.debug, &self.trace, &self.stdio] {
            emitter.set_event_sink(Arc::clone(&sink));
        }
    }

    fn read_settings(&self) -> std::sync::RwLockReadGuard<'_, LogSettings> {
        self.settings.read().unwrap_or_else(|e| e.into_inner())
    }
}

lazy_static! {
    static ref GLOBAL: LogRegistry = LogRegistry::new(LogSettings::default());
}

/// The process-wide registry. Built on first use with compiled defaults;
/// the agent applies its real configuration through
/// [`setup::configure`](crate::setup::configure) during startup.
pub fn registry() -> &'static LogRegistry {
    &GLOBAL
}

/// Process-wide operational log channel.
pub fn log() -> &'static Emitter {
    &registry().log
}

/// Process-wide debug channel.
pub fn debug() -> &'static Emitter {
    &registry().debug
}

/// Process-wide verbose trace channel.
pub fn trace() -> &'static Emitter {
    &registry().trace
}

/// Process-wide raw stdio channel.
pub fn stdio() -> &'static Emitter {
    &registry().stdio
}

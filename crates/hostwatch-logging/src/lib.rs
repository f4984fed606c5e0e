//! # hostwatch-logging
//!
//! Multi-channel, multi-sink logging for the hostwatch agent.
//!
//! Four fixed channels — operational [`log`], [`debug`] trace, verbose
//! [`trace`], and raw [`stdio`] — each emit to any subset of four sinks
//! (debugger console, append-mode file, stdout, OS event log). Sink
//! selection is a per-channel [`Directions`] bitset, reconfigurable at
//! runtime through the [`setup`] surface without restarting the process,
//! and widened per call by one-shot [`Mods`] overrides.
//!
//! Writes never fail the caller: formatting mismatches render best-effort,
//! an unopenable log file skips only the file sink, and debugger output is
//! always attempted.
//!
//! ```
//! use hostwatch_logging::{args, LogRegistry, LogSettings, Mods};
//!
//! let registry = LogRegistry::new(LogSettings::default());
//! registry.log().write(Mods::NONE, "disk {} at {}%", args!["sda1", 93]);
//! registry.log().w().push("threshold crossed");
//! ```

mod directions;
mod emitter;
mod format;
mod params;
mod registry;
pub mod setup;
mod sink;
mod tracing_bridge;

pub use directions::{Directions, Mods};
pub use emitter::{Emitter, LineStream, LogType, Severity};
pub use format::{formatv, Args, Ptr};
pub use params::ChannelParams;
pub use registry::{debug, log, registry, stdio, trace, LogRegistry, LogSettings};
pub use sink::{EventSink, NullEventSink, EVENT_ID_CRITICAL};
pub use tracing_bridge::{init_tracing, ChannelLayer};

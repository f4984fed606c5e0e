//! Bridge between the `tracing` crate and the channel registry.
//!
//! Agent code logs through standard `tracing` macros; this layer routes
//! each event to the channel matching its level: ERROR/WARN/INFO land on
//! the operational log with the corresponding severity, DEBUG on the debug
//! channel, TRACE on the verbose trace channel.

use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::emitter::LogType;
use crate::registry;

/// Tracing-subscriber layer that forwards events into the channels.
pub struct ChannelLayer;

/// Channel an event of the given level lands on.
fn route(level: Level) -> LogType {
    match level {
        Level::ERROR | Level::WARN | Level::INFO => LogType::Log,
        Level::DEBUG => LogType::Debug,
        Level::TRACE => LogType::Trace,
    }
}

impl<S> Layer<S> for ChannelLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let Some(message) = visitor.message else {
            return;
        };

        let level = *event.metadata().level();
        let stream = match route(level) {
            LogType::Log => match level {
                Level::ERROR => registry::log().e(),
                Level::WARN => registry::log().w(),
                _ => registry::log().i(),
            },
            LogType::Debug => registry::debug().line(),
            _ => registry::trace().t(),
        };
        stream.push(message).flush();
    }
}

/// Extracts the `message` field from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs the bridge as the global tracing subscriber.
///
/// Quietly does nothing when a subscriber is already installed; the logging
/// facility never takes the process down.
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let _ = tracing_subscriber::registry().with(ChannelLayer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_route_to_their_channels() {
        assert_eq!(route(Level::ERROR), LogType::Log);
        assert_eq!(route(Level::WARN), LogType::Log);
        assert_eq!(route(Level::INFO), LogType::Log);
        assert_eq!(route(Level::DEBUG), LogType::Debug);
        assert_eq!(route(Level::TRACE), LogType::Trace);
    }
}

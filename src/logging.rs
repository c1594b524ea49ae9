// Author: kelexine (https://github.com/kelexine)
// logging.rs -- tracing subscriber setup and the log observer bridge

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

/// Receives every formatted log line, e.g. to feed a front end's log view.
pub trait LogObserver: Send + Sync {
    fn on_log_message(&self, text: &str);
}

/// Forwards events to a [`LogObserver`] as `"[LEVEL] message key=value"`.
pub struct ObserverLayer {
    observer: Arc<dyn LogObserver>,
}

impl ObserverLayer {
    pub fn new(observer: Arc<dyn LogObserver>) -> Self {
        Self { observer }
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

impl<S: Subscriber> Layer<S> for ObserverLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let line = format!("[{}] {}{}", event.metadata().level(), visitor.message, visitor.fields);
        self.observer.on_log_message(&line);
    }
}

/// `RUST_LOG` wins; otherwise `-v` count selects warn, info, debug or trace.
pub fn filter_for(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    })
}

/// Install the global subscriber: compact stderr output plus the optional
/// observer. A second call is a no-op.
pub fn init(verbosity: u8, observer: Option<Arc<dyn LogObserver>>) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter_for(verbosity))
        .with(fmt_layer)
        .with(observer.map(ObserverLayer::new))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tracing::{info, warn};

    #[derive(Default)]
    struct Collect(Mutex<Vec<String>>);

    impl LogObserver for Collect {
        fn on_log_message(&self, text: &str) {
            self.0.lock().unwrap().push(text.to_string());
        }
    }

    #[test]
    fn test_observer_receives_formatted_events() {
        let sink = Arc::new(Collect::default());
        let subscriber = tracing_subscriber::registry().with(ObserverLayer::new(sink.clone()));

        tracing::subscriber::with_default(subscriber, || {
            info!("Converting comment for {}", "read");
            warn!(file = "led.cpp", "function skipped");
        });

        let lines = sink.0.lock().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "[INFO] Converting comment for read");
        assert_eq!(lines[1], "[WARN] function skipped file=led.cpp");
    }
}

//! Nullable log sink: record tracing events instead of printing them.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// One recorded tracing event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
    /// Value of a structured field, rendered as text.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A tracing layer that keeps every event for later assertions.
///
/// Clones share the same buffer.
#[derive(Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install as the thread's default subscriber until the guard drops.
    ///
    /// Thread-local: use with a current-thread runtime (plain `#[tokio::test]`).
    pub fn install(&self) -> DefaultGuard {
        tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.lock().clone()
    }

    pub fn events_at(&self, level: Level) -> Vec<CapturedEvent> {
        self.lock()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    pub fn count_at(&self, level: Level) -> usize {
        self.lock().iter().filter(|e| e.level == level).count()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CapturedEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldCollector::default();
        event.record(&mut visitor);
        let metadata = event.metadata();
        self.lock().push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldCollector {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = rendered;
        } else {
            self.fields.push((field.name().to_string(), rendered));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_level_message_and_fields() {
        let capture = LogCapture::new();
        {
            let _guard = capture.install();
            tracing::error!(product_id = "X", reason = "not_found", "verification error");
            tracing::info!("unrelated");
        }
        tracing::error!("after the guard dropped");

        let errors = capture.events_at(Level::ERROR);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "verification error");
        assert_eq!(errors[0].field("product_id"), Some("X"));
        assert_eq!(errors[0].field("reason"), Some("not_found"));
        assert_eq!(capture.count_at(Level::INFO), 1);

        let all = capture.events();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].message, "unrelated");
        assert_eq!(all[1].target, module_path!());
    }
}

// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{Event, Level, Subscriber, field};
use tracing_subscriber::{Layer, layer::Context, prelude::*};

/// Represents a captured tracing event.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    /// The severity of the event.
    pub level: Level,
    /// The target of the event, typically the module path.
    pub target: String,
    /// The formatted `message` field, empty if the event has no message.
    pub message: String,
    /// Any other fields, converted to their string representations.
    pub fields: HashMap<String, String>,
}

/// A `tracing::field::Visit` implementation to extract the event fields.
struct EventVisitor<'a>(&'a mut HashMap<String, String>);

impl<'a> field::Visit for EventVisitor<'a> {
    fn record_str(&mut self, field: &field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), format!("{:?}", value));
    }
}

/// Captures the tracing events emitted on the current thread.
///
/// The capture is installed as the thread's default subscriber, so it works
/// with `#[tokio::test]` (which uses a current-thread runtime) and tests can
/// run in parallel without seeing each other's events.
///
/// # Example
///
/// ```
/// use google_cloud_test_utils::log_capture::LogCapture;
/// use tracing::Level;
///
/// let capture = LogCapture::new();
/// let _guard = capture.set_default();
/// tracing::error!("no zone returned from {}", "http://metadata");
///
/// let events = capture.events_at(Level::ERROR);
/// assert_eq!(events.len(), 1);
/// assert!(events[0].message.contains("no zone"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the capture as the default subscriber for the current thread.
    ///
    /// Events are captured while the returned guard is in scope.
    pub fn set_default(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::set_default(subscriber)
    }

    /// Returns a copy of all the events captured so far.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Returns the events captured at exactly `level`.
    pub fn events_at(&self, level: Level) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }
}

impl<S> Layer<S> for LogCapture
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut EventVisitor(&mut fields));
        let message = fields.remove("message").unwrap_or_default();
        let captured = CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message,
            fields,
        };
        self.events.lock().unwrap().push(captured);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_levels_and_fields() {
        let capture = LogCapture::new();
        {
            let _guard = capture.set_default();
            tracing::debug!(url = "http://metadata", "calling metadata");
            tracing::error!("empty zone");
        }
        tracing::error!("not captured");

        let events = capture.events();
        assert_eq!(events.len(), 2, "{events:?}");
        assert_eq!(events[0].level, Level::DEBUG);
        assert_eq!(events[0].message, "calling metadata");
        assert_eq!(
            events[0].fields.get("url").map(String::as_str),
            Some("http://metadata")
        );

        let errors = capture.events_at(Level::ERROR);
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert_eq!(errors[0].message, "empty zone");
    }

    #[test]
    fn captures_are_isolated() {
        let a = LogCapture::new();
        let b = LogCapture::new();
        {
            let _guard = a.set_default();
            tracing::warn!("for a");
        }
        {
            let _guard = b.set_default();
            tracing::warn!("for b");
        }
        assert_eq!(a.events().len(), 1);
        assert_eq!(a.events()[0].message, "for a");
        assert_eq!(b.events().len(), 1);
        assert_eq!(b.events()[0].message, "for b");
    }
}

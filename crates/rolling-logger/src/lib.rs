//! Rolling Logger
//!
//! A `tracing` layer that keeps the most recent log lines in a circular
//! buffer and mirrors each line to a [`LogSink`]. The buffer is read back
//! through the [`LogHandle`] returned by [`init`].

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// Default number of lines kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

/// One formatted log record
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Destination for formatted lines
pub trait LogSink: Send + Sync + 'static {
    fn write_line(&self, level: Level, line: &str);
}

/// Fixed-capacity buffer, oldest lines are dropped first
#[derive(Debug)]
pub struct RingBuffer {
    lines: VecDeque<LogLine>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: LogLine) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter()
    }
}

/// Cloneable handle to the shared buffer
#[derive(Debug, Clone)]
pub struct LogHandle {
    buffer: Arc<Mutex<RingBuffer>>,
}

impl LogHandle {
    fn new(capacity: usize) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(RingBuffer::new(capacity))),
        }
    }

    fn push(&self, line: LogLine) {
        // A poisoned buffer only loses history; keep logging
        let mut guard = match self.buffer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(line);
    }

    /// Copy of all buffered lines, oldest first
    pub fn snapshot(&self) -> Vec<LogLine> {
        match self.buffer.lock() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    /// Last `n` lines rendered as text, oldest first
    pub fn tail(&self, n: usize) -> Vec<String> {
        let lines = self.snapshot();
        let skip = lines.len().saturating_sub(n);
        lines.into_iter().skip(skip).map(|l| l.to_string()).collect()
    }
}

/// Collects the `message` field and any extra `key=value` fields
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.join(" ")
        } else {
            format!("{} {}", self.message, self.fields.join(" "))
        }
    }
}

/// The layer itself; build with [`RollingLayer::new`]
pub struct RollingLayer<W: LogSink> {
    handle: LogHandle,
    sink: W,
}

impl<W: LogSink> RollingLayer<W> {
    pub fn new(capacity: usize, sink: W) -> Self {
        Self {
            handle: LogHandle::new(capacity),
            sink,
        }
    }

    pub fn handle(&self) -> LogHandle {
        self.handle.clone()
    }
}

impl<S: Subscriber, W: LogSink> Layer<S> for RollingLayer<W> {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let line = LogLine {
            timestamp: Local::now(),
            level: *meta.level(),
            target: meta.target().to_string(),
            message: visitor.finish(),
        };
        self.sink.write_line(line.level, &line.to_string());
        self.handle.push(line);
    }
}

/// Install the layer as the global default subscriber.
///
/// Returns the buffer handle; fails if a global subscriber is already set.
pub fn init<W: LogSink>(
    level: Level,
    capacity: usize,
    sink: W,
) -> Result<LogHandle, tracing_subscriber::util::TryInitError> {
    let layer = RollingLayer::new(capacity, sink);
    let handle = layer.handle();
    tracing_subscriber::registry()
        .with(layer.with_filter(LevelFilter::from_level(level)))
        .try_init()?;
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[derive(Clone, Default)]
    struct CaptureSink(Arc<Mutex<Vec<(Level, String)>>>);

    impl LogSink for CaptureSink {
        fn write_line(&self, level: Level, line: &str) {
            self.0.lock().unwrap().push((level, line.to_string()));
        }
    }

    fn line(message: &str) -> LogLine {
        LogLine {
            timestamp: Local::now(),
            level: Level::INFO,
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut buffer = RingBuffer::new(2);
        buffer.push(line("a"));
        buffer.push(line("b"));
        buffer.push(line("c"));
        let messages: Vec<_> = buffer.iter().map(|l| l.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one_line() {
        let mut buffer = RingBuffer::new(0);
        buffer.push(line("a"));
        buffer.push(line("b"));
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_layer_captures_message_and_fields() {
        let sink = CaptureSink::default();
        let layer = RollingLayer::new(10, sink.clone());
        let handle = layer.handle();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(weight = 2.5, "[DND] collision");
        });

        let lines = handle.snapshot();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].level, Level::WARN);
        assert_eq!(lines[0].message, "[DND] collision weight=2.5");

        let written = sink.0.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].1.ends_with("[DND] collision weight=2.5"));
    }

    #[test]
    fn test_level_filter_drops_verbose_events() {
        let layer = RollingLayer::new(10, CaptureSink::default());
        let handle = layer.handle();
        let subscriber = tracing_subscriber::registry()
            .with(layer.with_filter(LevelFilter::from_level(Level::INFO)));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("hidden");
            tracing::info!("shown");
        });

        let messages: Vec<_> = handle.snapshot().into_iter().map(|l| l.message).collect();
        assert_eq!(messages, vec!["shown".to_string()]);
    }

    #[test]
    fn test_tail_returns_most_recent_lines() {
        let layer = RollingLayer::new(10, CaptureSink::default());
        let handle = layer.handle();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            for i in 0..5 {
                tracing::info!("line {}", i);
            }
        });

        let tail = handle.tail(2);
        assert_eq!(tail.len(), 2);
        assert!(tail[0].ends_with("line 3"));
        assert!(tail[1].ends_with("line 4"));
    }
}

use std::fmt;
use std::time::Instant;

use smartstring::alias::String;

use crate::monitor::DEFAULT_SLOW_THRESHOLD_MS;
use crate::sink::{DiagnosticsSink, LogSink};

/// Counts how often a subject re-renders and complains past a limit.
///
/// Useful for spotting feedback loops where a component re-renders far more
/// often than its inputs change.
pub struct RenderCounter {
    subject:    String,
    count:      u32,
    warn_after: u32,
    sink:       Box<dyn DiagnosticsSink>,
}

impl fmt::Debug for RenderCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderCounter")
            .field("subject", &self.subject)
            .field("count", &self.count)
            .field("warn_after", &self.warn_after)
            .finish_non_exhaustive()
    }
}

impl RenderCounter {
    /// Render count past which the counter starts warning.
    pub const DEFAULT_WARN_AFTER: u32 = 10;

    /// Counter reporting through the `log` facade.
    pub fn new(subject: impl Into<String>) -> Self {
        Self::with_sink(subject, Box::new(LogSink))
    }

    /// Counter reporting through an injected sink.
    pub fn with_sink(subject: impl Into<String>, sink: Box<dyn DiagnosticsSink>) -> Self {
        Self { subject: subject.into(), count: 0, warn_after: Self::DEFAULT_WARN_AFTER, sink }
    }

    /// Overrides the warning limit.
    #[must_use]
    pub fn warn_after(mut self, limit: u32) -> Self {
        self.warn_after = limit;
        self
    }

    /// Records one render and returns the running total.
    pub fn record(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        if self.count > self.warn_after {
            self.sink.warn(&format!(
                "[Performance] {} has rendered {} times",
                self.subject, self.count
            ));
        }
        self.count
    }

    /// Renders recorded so far.
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Runs `render`, measures its wall-clock duration, and warns through `sink`
/// when it exceeds the 60 fps frame budget. Returns the closure's value.
pub fn measure_render<T>(
    subject: &str, sink: &dyn DiagnosticsSink, render: impl FnOnce() -> T,
) -> T {
    let start = Instant::now();
    let value = render();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
    if elapsed_ms > DEFAULT_SLOW_THRESHOLD_MS {
        sink.warn(&format!("[Performance] {subject} render took {elapsed_ms:.2}ms"));
    }
    value
}

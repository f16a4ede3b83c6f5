use std::fmt;
use std::time::Instant;

use derive_builder::Builder;
use smartstring::alias::String;

use crate::clock::{Clock, MonotonicClock};
use crate::sample_window::SampleWindow;
use crate::sink::{DiagnosticsSink, LogSink};

/// Samples retained per window unless configured otherwise.
pub const DEFAULT_MAX_SAMPLES: usize = 50;

/// Frame budget for 60 frames per second, in milliseconds.
pub const DEFAULT_SLOW_THRESHOLD_MS: f64 = 16.0;

/// Construction parameters for a [`RenderMonitor`].
#[derive(Builder, Clone, Debug)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct MonitorConfig {
    /// Name of the observed subject, e.g. a view component.
    #[builder(setter(into))]
    pub subject: String,

    /// Trailing window capacity.
    #[builder(default = "DEFAULT_MAX_SAMPLES")]
    pub max_samples: usize,

    /// Duration above which a sample counts as slow.
    #[builder(default = "DEFAULT_SLOW_THRESHOLD_MS")]
    pub slow_threshold_ms: f64,
}

impl MonitorConfigBuilder {
    #[allow(clippy::absolute_paths)]
    fn validate(&self) -> Result<(), std::string::String> {
        if let Some(subject) = &self.subject
            && subject.is_empty()
        {
            return Err("subject must not be empty".into());
        }
        if self.max_samples == Some(0) {
            return Err("max_samples must be positive".into());
        }
        if let Some(threshold) = self.slow_threshold_ms
            && (!threshold.is_finite() || threshold <= 0.0)
        {
            return Err("slow_threshold_ms must be positive and finite".into());
        }
        Ok(())
    }
}

/// Point-in-time view of a monitor's statistics.
///
/// Values are unrounded; rounding happens only when formatting log output.
#[derive(Clone, Debug, PartialEq)]
pub struct PerfSnapshot {
    /// Subject the statistics belong to.
    pub subject: String,
    /// Samples currently retained.
    pub sample_count: usize,
    /// Mean duration over the window, `0.0` when empty.
    pub average_ms: f64,
    /// Most recent sample, `0.0` when none yet.
    pub last_ms: f64,
    /// Samples above the slowness threshold.
    pub slow_count: usize,
}

impl PerfSnapshot {
    fn empty(subject: String) -> Self {
        Self { subject, sample_count: 0, average_ms: 0.0, last_ms: 0.0, slow_count: 0 }
    }

    /// Share of slow samples in percent, `0.0` when the window is empty.
    pub fn slow_percent(&self) -> f64 {
        if self.sample_count == 0 {
            return 0.0;
        }
        #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
        {
            self.slow_count as f64 / self.sample_count as f64 * 100.0
        }
    }
}

/// Records render durations for one subject over a bounded trailing window.
///
/// Each [`capture`](Self::capture) turns the time since the previous capture
/// into a new sample and recomputes the statistics synchronously. Dropping
/// the monitor emits a one-line summary if anything was recorded.
pub struct RenderMonitor {
    cfg:          MonitorConfig,
    window:       SampleWindow,
    snapshot:     PerfSnapshot,
    last_capture: Instant,
    clock:        Box<dyn Clock>,
    sink:         Box<dyn DiagnosticsSink>,
}

impl fmt::Debug for RenderMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderMonitor")
            .field("cfg", &self.cfg)
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}

impl RenderMonitor {
    /// Monitor wired to the monotonic clock and the `log` facade.
    pub fn new(cfg: MonitorConfig) -> Self {
        Self::with_collaborators(cfg, Box::new(MonotonicClock), Box::new(LogSink))
    }

    /// Monitor with an injected clock and sink.
    pub fn with_collaborators(
        cfg: MonitorConfig, clock: Box<dyn Clock>, sink: Box<dyn DiagnosticsSink>,
    ) -> Self {
        let window = SampleWindow::new(cfg.max_samples);
        let snapshot = PerfSnapshot::empty(cfg.subject.clone());
        let last_capture = clock.now();
        sink.info(&format!("[Performance] {} mounted", cfg.subject), &[]);
        Self { cfg, window, snapshot, last_capture, clock, sink }
    }

    /// Records one render.
    ///
    /// The elapsed time since the previous capture (or since construction
    /// for the first call) becomes a new sample; the oldest sample is
    /// evicted once the window is full. Warns when the sample exceeds the
    /// slowness threshold.
    pub fn capture(&mut self) {
        let now = self.clock.now();
        let elapsed_ms = now.duration_since(self.last_capture).as_secs_f64() * 1e3;
        self.window.push(elapsed_ms);
        self.recompute();
        if elapsed_ms > self.cfg.slow_threshold_ms {
            self.sink.warn(&format!(
                "[Performance] {} slow render: {elapsed_ms:.2}ms",
                self.cfg.subject
            ));
        }
        self.last_capture = now;
    }

    /// Copy of the current statistics; mutating it does not affect the monitor.
    pub fn snapshot(&self) -> PerfSnapshot {
        self.snapshot.clone()
    }

    /// Drops all samples, keeping the subject. Safe to call when already empty.
    pub fn reset(&mut self) {
        self.window.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.snapshot.sample_count = self.window.len();
        self.snapshot.average_ms = self.window.mean();
        self.snapshot.last_ms = self.window.last().unwrap_or_default();
        self.snapshot.slow_count = self.window.count_over(self.cfg.slow_threshold_ms);
    }
}

impl Drop for RenderMonitor {
    /// Emits the final summary. Silent if nothing was captured since the
    /// last reset; the snapshot is recomputed on every capture, so the
    /// summary always reflects the final sample.
    fn drop(&mut self) {
        if self.snapshot.sample_count == 0 {
            return;
        }
        self.sink.info(
            &format!("[Performance] {} unmounted", self.cfg.subject),
            &[
                ("Total Renders", self.snapshot.sample_count.to_string()),
                ("Avg Render Time", format!("{:.2}ms", self.snapshot.average_ms)),
                ("Slow Renders", self.snapshot.slow_count.to_string()),
                ("Slow Render %", format!("{:.1}%", self.snapshot.slow_percent())),
            ],
        );
    }
}

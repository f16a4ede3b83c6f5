//! `render_perf`
//!
//! Render-performance monitoring for named subjects. A [`RenderMonitor`]
//! keeps a bounded trailing window of render durations, recomputes its
//! statistics on every capture, warns when a render blows the frame budget
//! and logs a one-line summary when it is dropped.
//!
//! The time source and the log sink are injectable, so tests drive elapsed
//! time by hand with a [`ManualClock`] and assert on diagnostics with a
//! [`RecordingSink`] instead of capturing process-wide output.
//!
//! ```
//! use render_perf::{MonitorConfigBuilder, RenderMonitor};
//!
//! # fn main() -> Result<(), render_perf::MonitorConfigBuilderError> {
//! let cfg = MonitorConfigBuilder::default().subject("GameBoard").build()?;
//! let mut monitor = RenderMonitor::new(cfg);
//! // once per completed render:
//! monitor.capture();
//! assert_eq!(monitor.snapshot().sample_count, 1);
//! # Ok(())
//! # }
//! ```

mod clock;
mod measure;
mod monitor;
mod sample_window;
mod sink;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use measure::{RenderCounter, measure_render};
pub use monitor::{
    DEFAULT_MAX_SAMPLES, DEFAULT_SLOW_THRESHOLD_MS, MonitorConfig, MonitorConfigBuilder,
    MonitorConfigBuilderError, PerfSnapshot, RenderMonitor,
};
pub use sink::{DiagnosticsSink, LogSink, RecordingSink, SinkMessage};

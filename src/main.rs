//! `render_perf` demo
//!
//! Simulates a render loop for one subject and prints the monitor's
//! diagnostics: slow-render warnings while running, a summary on shutdown.
#![allow(unused_results)]

use std::{thread, time};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use time::Duration;
#[cfg(target_os = "linux")]
use tikv_jemallocator::Jemalloc;

use render_perf::{
    DEFAULT_MAX_SAMPLES, DEFAULT_SLOW_THRESHOLD_MS, MonitorConfigBuilder, RenderMonitor,
};

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Debug, Parser)]
struct Cli {
    #[arg(long = "subject", default_value = "DemoView")]
    /// Subject name used in the diagnostics
    subject: String,

    #[arg(long = "frames", default_value_t = 120)]
    /// Number of simulated renders
    frames: u32,

    #[arg(long = "max-samples", default_value_t = DEFAULT_MAX_SAMPLES)]
    /// Trailing window capacity
    max_samples: usize,

    #[arg(long = "slow-ms", default_value_t = DEFAULT_SLOW_THRESHOLD_MS)]
    /// Slow-render threshold in milliseconds
    slow_ms: f64,
}

fn init_logging() {
    env_logger::builder().filter_level(LevelFilter::Info).init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let cfg = MonitorConfigBuilder::default()
        .subject(cli.subject.as_str())
        .max_samples(cli.max_samples)
        .slow_threshold_ms(cli.slow_ms)
        .build()?;
    let mut monitor = RenderMonitor::new(cfg);

    for frame in 0..cli.frames {
        // Every 30th frame stalls past the frame budget.
        #[allow(clippy::arithmetic_side_effects)]
        let busy_ms = if frame % 30 == 29 { cli.slow_ms * 1.5 } else { 4.0 };
        thread::sleep(Duration::from_secs_f64(busy_ms / 1e3));
        monitor.capture();
    }

    let snap = monitor.snapshot();
    log::info!(
        "{}: {} samples, avg {:.2}ms, last {:.2}ms, {} slow",
        snap.subject,
        snap.sample_count,
        snap.average_ms,
        snap.last_ms,
        snap.slow_count
    );

    Ok(())
}

//! Timing instrumentation for the simulation loop.
//!
//! Records how long maze generation, navigator ticks and sky sampling take so
//! a headless run can report where its frame budget goes.
//!
//! Measurements land in a process-wide table keyed by section name. Timers and
//! the [`Profiler`] write into it, and [`summary`] or [`write_report`] read it
//! back out.

use std::time::Duration;

/// Controls whether and how measurements are recorded
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Whether benchmarking is enabled
    pub enabled: bool,
    /// Whether each measurement is logged as it is recorded
    pub log_results: bool,
    /// Minimum duration to record (filters out very fast operations)
    pub min_duration_threshold: Duration,
    /// Maximum number of frame samples kept for FPS statistics
    pub max_samples: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
            log_results: false,
            min_duration_threshold: Duration::from_micros(100),
            max_samples: 1000,
        }
    }
}

impl BenchmarkConfig {
    /// Records every measurement regardless of build profile or duration.
    pub fn always() -> Self {
        Self {
            enabled: true,
            min_duration_threshold: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Measurement storage: frame counter, per-section metrics, profiler
pub mod data;

/// Timers, the global-table helpers and report output
pub mod utils;


pub use data::{FrameRateCounter, PerformanceMetrics, Profiler};
pub use utils::*;

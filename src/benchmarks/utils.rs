//! Timers and helpers over the global measurement table.
//!
//! [`Timer`] is stopped explicitly; [`ScopedTimer`] records when dropped. The
//! free functions read, clear and report on [`BENCHMARK_DATA`].

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::BenchmarkConfig;
use super::data::{BENCHMARK_DATA, PerformanceMetrics, Profiler, record};

/// A timer for measuring execution time of code sections
pub struct Timer {
    name: String,
    start_time: Instant,
    config: BenchmarkConfig,
}

impl Timer {
    /// Starts timing `name`.
    pub fn new(name: &str, config: BenchmarkConfig) -> Self {
        Self {
            name: name.to_string(),
            start_time: Instant::now(),
            config,
        }
    }

    /// Stops the timer and records the measurement
    ///
    /// Returns the elapsed duration. It is recorded only when benchmarking is
    /// enabled and the duration meets the configured threshold.
    pub fn stop(self) -> Duration {
        let duration = self.start_time.elapsed();

        if self.config.enabled && duration >= self.config.min_duration_threshold {
            record(&self.name, duration);
            if self.config.log_results {
                tracing::debug!(section = %self.name, ?duration, "benchmark");
            }
        }

        duration
    }
}

/// A timer that records when it goes out of scope
pub struct ScopedTimer {
    timer: Option<Timer>,
}

impl ScopedTimer {
    /// Starts a scoped timer for `name`.
    pub fn new(name: &str, config: BenchmarkConfig) -> Self {
        Self {
            timer: Some(Timer::new(name, config)),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop();
        }
    }
}

/// Times a closure with the default configuration and returns its result
pub fn time<F, R>(name: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let mut profiler = Profiler::new(BenchmarkConfig::default());
    profiler.time_closure(name, f)
}

/// Scoped timer with the default configuration
pub fn scoped_timer(name: &str) -> ScopedTimer {
    ScopedTimer::new(name, BenchmarkConfig::default())
}

/// Drops every recorded measurement and frame sample
pub fn clear_measurements() {
    if let Ok(mut data) = BENCHMARK_DATA.lock() {
        data.clear();
    }
}

/// Snapshot of every recorded measurement
pub fn get_measurements() -> HashMap<String, PerformanceMetrics> {
    BENCHMARK_DATA
        .lock()
        .map(|data| data.get_measurements().clone())
        .unwrap_or_default()
}

/// Records one wall-clock frame and returns the running FPS
pub fn record_frame() -> f64 {
    BENCHMARK_DATA
        .lock()
        .map(|mut data| data.record_frame())
        .unwrap_or(0.0)
}

/// Records one frame of known length
pub fn record_frame_time(frame_time: Duration) {
    if let Ok(mut data) = BENCHMARK_DATA.lock() {
        data.record_frame_time(frame_time);
    }
}

/// `(average fps, min frame time, max frame time)`
pub fn get_fps_stats() -> (f64, Duration, Duration) {
    BENCHMARK_DATA
        .lock()
        .map(|data| data.get_fps_stats())
        .unwrap_or((0.0, Duration::ZERO, Duration::ZERO))
}

fn format_duration(duration: Duration) -> String {
    let micros = duration.as_secs_f64() * 1e6;
    if micros >= 1000.0 {
        format!("{:.2}ms", micros / 1000.0)
    } else {
        format!("{micros:.1}us")
    }
}

/// Measurement table sorted by total time, heaviest first.
pub fn summary() -> String {
    let mut rows: Vec<(String, PerformanceMetrics)> = get_measurements().into_iter().collect();
    rows.sort_by(|a, b| {
        b.1.total_duration
            .cmp(&a.1.total_duration)
            .then_with(|| a.0.cmp(&b.0))
    });

    let mut out = String::new();
    let (fps, min_frame, max_frame) = get_fps_stats();
    if fps > 0.0 {
        let _ = writeln!(
            out,
            "FPS: {fps:.1} (frame {} .. {})",
            format_duration(min_frame),
            format_duration(max_frame)
        );
    }

    if rows.is_empty() {
        out.push_str("no measurements recorded\n");
        return out;
    }

    let name_width = rows
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0)
        .max("section".len());
    let _ = writeln!(
        out,
        "{:<name_width$}  {:>7}  {:>10}  {:>10}  {:>10}  {:>10}",
        "section", "count", "total", "avg", "min", "max"
    );
    for (name, metrics) in &rows {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>7}  {:>10}  {:>10}  {:>10}  {:>10}",
            name,
            metrics.count,
            format_duration(metrics.total_duration),
            format_duration(metrics.avg_duration),
            format_duration(metrics.min_duration),
            format_duration(metrics.max_duration),
        );
    }
    out
}

/// Logs the summary table at info level
pub fn log_summary() {
    for line in summary().lines() {
        tracing::info!("{line}");
    }
}

/// Writes the summary under `dir` with a timestamped name and returns the path.
///
/// `source` labels the run in the file header.
pub fn write_report(dir: &Path, source: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let now: DateTime<Local> = Local::now();
    let file_path = dir.join(now.format("bench_%m-%d-%y_%I-%M-%S%p.txt").to_string());

    let mut contents = format!(
        "{source} benchmark report, {}\n\n",
        now.format("%Y-%m-%d %H:%M:%S")
    );
    contents.push_str(&summary());
    fs::write(&file_path, contents)?;

    tracing::info!(path = %file_path.display(), "wrote benchmark report");
    Ok(file_path)
}

/// Times a block with a [`ScopedTimer`] and evaluates to the block's value
///
/// ```
/// let sum = maze_walker::benchmark!("sum", { (0..10).sum::<i32>() });
/// assert_eq!(sum, 45);
/// ```
#[macro_export]
macro_rules! benchmark {
    ($name:expr, $block:expr) => {{
        let _timer = $crate::benchmarks::ScopedTimer::new(
            $name,
            $crate::benchmarks::BenchmarkConfig::default(),
        );
        $block
    }};
}

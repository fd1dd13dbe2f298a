use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::BenchmarkConfig;

/// Frame rate counter fed once per simulated frame
pub struct FrameRateCounter {
    /// Duration of each recorded frame, oldest first
    pub frame_times: Vec<Duration>,
    max_samples: usize,
    last_frame_time: Option<Instant>,
}

impl FrameRateCounter {
    /// Creates a counter that keeps at most `max_samples` frame times.
    pub fn new(max_samples: usize) -> Self {
        Self {
            frame_times: Vec::with_capacity(max_samples),
            max_samples,
            last_frame_time: None,
        }
    }

    /// Records a frame and returns the current FPS
    pub fn record_frame(&mut self) -> f64 {
        let now = Instant::now();
        if let Some(last_time) = self.last_frame_time {
            self.push_frame_time(now.duration_since(last_time));
        }
        self.last_frame_time = Some(now);
        self.get_fps()
    }

    /// Records a frame of known length, as a fixed-step loop does.
    pub fn push_frame_time(&mut self, frame_time: Duration) {
        self.frame_times.push(frame_time);
        if self.frame_times.len() > self.max_samples {
            self.frame_times.remove(0);
        }
    }

    /// Average FPS over the retained samples, zero without samples
    pub fn get_fps(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }

        let total_time: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total_time / self.frame_times.len() as u32;

        if avg_frame_time.as_secs_f64() > 0.0 {
            1.0 / avg_frame_time.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Shortest frame time recorded
    pub fn get_min_frame_time(&self) -> Duration {
        self.frame_times
            .iter()
            .min()
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Longest frame time recorded
    pub fn get_max_frame_time(&self) -> Duration {
        self.frame_times
            .iter()
            .max()
            .copied()
            .unwrap_or(Duration::ZERO)
    }
}

/// Times named sections of a frame
pub struct Profiler {
    active_timers: HashMap<String, Instant>,
    config: BenchmarkConfig,
}

impl Profiler {
    /// Creates a new profiler
    pub fn new(config: BenchmarkConfig) -> Self {
        Self {
            active_timers: HashMap::new(),
            config,
        }
    }

    /// Starts timing a section
    pub fn start_section(&mut self, name: &str) {
        if self.config.enabled {
            self.active_timers.insert(name.to_string(), Instant::now());
        }
    }

    /// Ends timing a section, returning its duration if it was started
    pub fn end_section(&mut self, name: &str) -> Option<Duration> {
        if !self.config.enabled {
            return None;
        }
        let duration = self.active_timers.remove(name)?.elapsed();
        if duration >= self.config.min_duration_threshold {
            record(name, duration);
            if self.config.log_results {
                tracing::debug!(section = name, ?duration, "profiled section");
            }
        }
        Some(duration)
    }

    /// Times a closure execution
    pub fn time_closure<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if self.config.enabled {
            self.start_section(name);
            let result = f();
            self.end_section(name);
            result
        } else {
            f()
        }
    }
}

/// Aggregate timings for one section name
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    /// Number of times this operation was measured
    pub count: usize,
    /// Total duration of all measurements combined
    pub total_duration: Duration,
    /// Shortest duration recorded for this operation
    pub min_duration: Duration,
    /// Longest duration recorded for this operation
    pub max_duration: Duration,
    /// Average duration across all measurements
    pub avg_duration: Duration,
}

impl PerformanceMetrics {
    fn new() -> Self {
        Self {
            count: 0,
            total_duration: Duration::ZERO,
            min_duration: Duration::MAX,
            max_duration: Duration::ZERO,
            avg_duration: Duration::ZERO,
        }
    }

    fn update(&mut self, duration: Duration) {
        self.count += 1;
        self.total_duration += duration;
        self.min_duration = self.min_duration.min(duration);
        self.max_duration = self.max_duration.max(duration);
        self.avg_duration = self.total_duration / self.count as u32;
    }
}

/// Process-wide measurement table
pub struct BenchmarkData {
    measurements: HashMap<String, PerformanceMetrics>,
    frame_counter: FrameRateCounter,
}

impl BenchmarkData {
    /// Empty table
    pub fn new() -> Self {
        Self {
            measurements: HashMap::new(),
            frame_counter: FrameRateCounter::new(BenchmarkConfig::default().max_samples),
        }
    }

    /// Adds one measurement for `name`
    pub fn record_measurement(&mut self, name: &str, duration: Duration) {
        self.measurements
            .entry(name.to_string())
            .or_insert_with(PerformanceMetrics::new)
            .update(duration);
    }

    /// All measurements keyed by section name
    pub fn get_measurements(&self) -> &HashMap<String, PerformanceMetrics> {
        &self.measurements
    }

    /// Drops every measurement and frame sample
    pub fn clear(&mut self) {
        self.measurements.clear();
        self.frame_counter = FrameRateCounter::new(self.frame_counter.max_samples);
    }

    /// Records a wall-clock frame
    pub fn record_frame(&mut self) -> f64 {
        self.frame_counter.record_frame()
    }

    /// Records a frame with a known duration
    pub fn record_frame_time(&mut self, frame_time: Duration) {
        self.frame_counter.push_frame_time(frame_time);
    }

    /// `(average fps, min frame time, max frame time)`
    pub fn get_fps_stats(&self) -> (f64, Duration, Duration) {
        (
            self.frame_counter.get_fps(),
            self.frame_counter.get_min_frame_time(),
            self.frame_counter.get_max_frame_time(),
        )
    }
}

impl Default for BenchmarkData {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static::lazy_static! {
    /// Global benchmark data shared by every timer and profiler
    pub static ref BENCHMARK_DATA: Arc<Mutex<BenchmarkData>> =
        Arc::new(Mutex::new(BenchmarkData::new()));
}

/// Records into the global table. A poisoned lock drops the sample.
pub(crate) fn record(name: &str, duration: Duration) {
    if let Ok(mut data) = BENCHMARK_DATA.lock() {
        data.record_measurement(name, duration);
    }
}

//! Time management utilities

use std::time::{Duration, Instant};

/// Wall-clock frame timer
pub struct Timer {
    last_frame: Instant,
    delta: Duration,
    total: Duration,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            total: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Restart the frame clock and return the time elapsed since the last call
    pub fn restart(&mut self) -> Duration {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_frame);
        self.total += self.delta;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta
    }

    /// Time between the last two `restart` calls
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Total elapsed time since timer creation
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Number of frames measured so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Fixed-timestep accumulator.
///
/// Wall-clock time is fed in with [`FixedTimestep::accumulate`]; the caller
/// then runs one simulation step per [`FixedTimestep::step`] that returns
/// `true`, always with the same constant delta.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    accumulator: Duration,
}

impl FixedTimestep {
    /// Create an accumulator producing steps of `step`
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
        }
    }

    /// Create an accumulator producing `rate` steps per second
    pub fn from_rate(rate: f32) -> Self {
        Self::new(Duration::from_secs_f32(1.0 / rate))
    }

    /// Constant delta handed to every step
    pub fn delta(&self) -> Duration {
        self.step
    }

    /// Add elapsed wall-clock time
    pub fn accumulate(&mut self, elapsed: Duration) {
        self.accumulator += elapsed;
    }

    /// Consume one step if enough time has accumulated
    pub fn step(&mut self) -> bool {
        if self.accumulator > self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }

    /// Time left over that has not yet produced a step
    pub fn remainder(&self) -> Duration {
        self.accumulator
    }
}

/// Frames-per-second and time-per-update counters, refreshed every second
#[derive(Debug, Clone, Default)]
pub struct FrameStatistics {
    update_time: Duration,
    num_frames: u32,
    frames_per_second: u32,
    time_per_update: Duration,
}

impl FrameStatistics {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame; returns `true` when a new one-second sample is ready
    pub fn record(&mut self, delta: Duration) -> bool {
        self.update_time += delta;
        self.num_frames += 1;

        if self.update_time > Duration::from_secs(1) {
            self.frames_per_second = self.num_frames;
            self.time_per_update = self.update_time / self.num_frames;
            self.update_time -= Duration::from_secs(1);
            self.num_frames = 0;
            true
        } else {
            false
        }
    }

    /// Frames counted in the last complete sample
    pub fn frames_per_second(&self) -> u32 {
        self.frames_per_second
    }

    /// Average time per update in the last complete sample
    pub fn time_per_update(&self) -> Duration {
        self.time_per_update
    }
}

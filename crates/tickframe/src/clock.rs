//! # Tick Clock
//!
//! Fixed-timestep accumulator for a render loop driving a slower
//! simulation.
//!
//! ```text
//! frame:   ├──────┼──────┼──────┼──────┼──────┤   render rate
//! tick:    ├──────────────────┼──────────────────┤ simulation rate
//!                             ▲        ▲
//!                        drain_ticks   heartbeat_fraction = 0.33
//! ```
//!
//! Each frame: [`advance`](TickClock::advance) by the elapsed time, run
//! [`drain_ticks`](TickClock::drain_ticks) simulation ticks, then
//! interpolate at [`heartbeat_fraction`](TickClock::heartbeat_fraction).

use std::time::{Duration, Instant};

use crate::config::InterpolationConfig;

/// Most ticks run for one frame. Time beyond that is dropped, so a long
/// stall does not turn into a burst of catch-up ticks.
pub const MAX_CATCH_UP_TICKS: u32 = 5;

/// Fixed-timestep accumulator.
pub struct TickClock {
    /// Target tick duration.
    tick_duration: Duration,
    /// Wall time of the last [`update`](Self::update).
    last_update: Instant,
    /// Time not yet consumed by ticks.
    accumulator: Duration,
    /// Total ticks drained.
    tick_count: u64,
    /// Frame timing statistics.
    stats: ClockStats,
}

/// Frame timing statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClockStats {
    /// Frames measured.
    pub frames: u64,
    /// Shortest frame observed.
    pub min_frame_us: u64,
    /// Longest frame observed.
    pub max_frame_us: u64,
    /// Average frame time (rolling).
    pub avg_frame_us: u64,
    /// Frames that ran more than one tick.
    pub catch_up_frames: u64,
    /// Ticks skipped by the catch-up limit.
    pub dropped_ticks: u64,
}

impl ClockStats {
    fn fresh() -> Self {
        Self {
            min_frame_us: u64::MAX,
            ..Self::default()
        }
    }
}

impl TickClock {
    /// Creates a clock running `tick_rate` ticks per second.
    ///
    /// # Panics
    ///
    /// Panics if `tick_rate` is zero.
    #[must_use]
    pub fn new(tick_rate: u32) -> Self {
        assert!(tick_rate > 0, "Tick rate must be positive");
        Self::with_duration(Duration::from_micros(1_000_000 / u64::from(tick_rate)))
    }

    /// Creates a clock at the configured tick rate.
    #[must_use]
    pub fn from_config(config: &InterpolationConfig) -> Self {
        Self::with_duration(config.tick_duration())
    }

    fn with_duration(tick_duration: Duration) -> Self {
        Self {
            tick_duration,
            last_update: Instant::now(),
            accumulator: Duration::ZERO,
            tick_count: 0,
            stats: ClockStats::fresh(),
        }
    }

    /// Adds `elapsed` render time.
    #[allow(clippy::cast_possible_truncation)]
    pub fn advance(&mut self, elapsed: Duration) {
        let elapsed_us = elapsed.as_micros() as u64;

        self.stats.frames += 1;
        self.stats.min_frame_us = self.stats.min_frame_us.min(elapsed_us);
        self.stats.max_frame_us = self.stats.max_frame_us.max(elapsed_us);
        self.stats.avg_frame_us = if self.stats.frames == 1 {
            elapsed_us
        } else {
            (self.stats.avg_frame_us * 15 + elapsed_us) / 16
        };

        self.accumulator += elapsed;
    }

    /// Adds the wall time since the previous update.
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update);
        self.last_update = now;
        self.advance(elapsed);
    }

    /// Consumes whole ticks from the accumulator and returns how many the
    /// simulation should run now.
    pub fn drain_ticks(&mut self) -> u32 {
        let mut ticks = 0;
        let mut dropped = 0u64;
        while self.accumulator >= self.tick_duration {
            self.accumulator -= self.tick_duration;
            if ticks < MAX_CATCH_UP_TICKS {
                ticks += 1;
            } else {
                dropped += 1;
            }
        }

        if ticks > 1 {
            self.stats.catch_up_frames += 1;
        }
        if dropped > 0 {
            self.stats.dropped_ticks += dropped;
            tracing::debug!(dropped, "tick clock fell behind");
        }

        self.tick_count += u64::from(ticks);
        ticks
    }

    /// Fraction of a tick accumulated since the last drained tick, in
    /// `[0, 1)` after [`drain_ticks`](Self::drain_ticks).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn heartbeat_fraction(&self) -> f32 {
        (self.accumulator.as_secs_f64() / self.tick_duration.as_secs_f64()) as f32
    }

    /// Total ticks drained.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Frame timing statistics.
    #[must_use]
    pub const fn stats(&self) -> &ClockStats {
        &self.stats
    }

    /// Target tick duration.
    #[must_use]
    pub const fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Resets statistics.
    pub fn reset_stats(&mut self) {
        self.stats = ClockStats::fresh();
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::from_config(&InterpolationConfig::default())
    }
}

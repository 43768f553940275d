//! Frame scheduling: the per-tick bridge between the busy signal, the blend
//! spring, and the render pass.
//!
//! The host drives one synchronous tick per display refresh. Each tick reads
//! the monotonic clock and the busy flag (once), advances the spring, and
//! hands the resulting globals to the renderer. After `stop()` no further
//! inputs are produced; cancellation is cooperative and immediate.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use nimbus_common::BusyFlag;

use crate::spring::{MorphSpring, SpringParams};

// ---------------------------------------------------------------------------
// FrameClock
// ---------------------------------------------------------------------------

/// Monotonic elapsed-time clock for the animation.
///
/// Elapsed time starts at 0 when the clock is created and is never reset or
/// wrapped for the lifetime of the view.
#[derive(Debug)]
pub struct FrameClock {
    origin: Instant,
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            origin: now,
            last: now,
        }
    }

    /// Seconds since the clock was created and seconds since the previous
    /// tick.
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.origin).as_secs_f32();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        (elapsed, dt)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// FrameScheduler
// ---------------------------------------------------------------------------

/// Per-frame global inputs consumed by the transform pipeline.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs {
    /// Seconds since the view was activated.
    pub elapsed: f32,
    /// Seconds since the previous tick.
    pub dt: f32,
    /// Live sphere↔wave blend factor (near [0, 1]; may overshoot).
    pub blend: f32,
}

/// Owns the clock, the blend spring, and the busy-signal port.
///
/// The flag is read exactly once per tick with no locking; a transition may
/// be observed up to one tick late, which is accepted.
pub struct FrameScheduler {
    clock: FrameClock,
    spring: MorphSpring,
    busy: BusyFlag,
    running: bool,
}

impl FrameScheduler {
    pub fn new(busy: BusyFlag, params: SpringParams) -> Self {
        let initial = busy.get();
        Self {
            clock: FrameClock::new(),
            spring: MorphSpring::new(params, initial),
            busy,
            running: true,
        }
    }

    /// Produce this tick's global inputs, or `None` once stopped.
    pub fn tick(&mut self) -> Option<FrameInputs> {
        if !self.running {
            return None;
        }
        let (elapsed, dt) = self.clock.tick();
        self.spring.retarget(self.busy.get());
        let blend = self.spring.advance(dt);
        Some(FrameInputs { elapsed, dt, blend })
    }

    /// Stop the loop. Subsequent `tick()` calls return `None`; no further
    /// global-input writes occur.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current blend value without advancing time.
    pub fn blend(&self) -> f32 {
        self.spring.value()
    }
}

// ---------------------------------------------------------------------------
// FrameTimer
// ---------------------------------------------------------------------------

/// Tracks frame durations for FPS diagnostics.
pub struct FrameTimer {
    frame_times: VecDeque<Duration>,
    last_frame: Instant,
    max_samples: usize,
}

impl FrameTimer {
    /// Create a new frame timer with a default 120-sample rolling window.
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::new(),
            last_frame: Instant::now(),
            max_samples: 120,
        }
    }

    /// Record the start of a new frame. Call this once per frame.
    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.max_samples {
            self.frame_times.pop_front();
        }
    }

    /// Average frames per second over the sample window.
    pub fn fps(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let total: f64 = self.frame_times.iter().map(|d| d.as_secs_f64()).sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.frame_times.len() as f64 / total
    }

    /// Average frame time in milliseconds.
    pub fn frame_time_ms(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let total: f64 = self.frame_times.iter().map(|d| d.as_secs_f64()).sum();
        (total / self.frame_times.len() as f64) * 1000.0
    }

    pub fn sample_count(&self) -> usize {
        self.frame_times.len()
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

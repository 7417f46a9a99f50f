//! Time management for the game loop.

use std::time::{Duration, Instant};

/// Longest frame delta fed into the fixed-step accumulator. A stall (window drag,
/// debugger break) would otherwise queue hundreds of simulation steps.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Manages frame timing and delta time calculation.
#[derive(Debug)]
pub struct Time {
    /// Time of the last frame.
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Fixed timestep for the simulation (default 60 Hz).
    fixed_timestep: Duration,
    /// Accumulated time for fixed updates.
    accumulator: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            fixed_timestep: Duration::from_secs_f64(1.0 / 60.0),
            accumulator: Duration::ZERO,
        }
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.advance(delta);
    }

    /// Advance the clock by an explicit frame duration.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.accumulator += delta.min(MAX_FRAME_DELTA);
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get the fixed timestep in seconds.
    pub fn fixed_timestep_seconds(&self) -> f32 {
        self.fixed_timestep.as_secs_f32()
    }

    /// Check if a fixed update should run and consume the time.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            true
        } else {
            false
        }
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }

    /// Set the fixed timestep rate in Hz.
    pub fn set_fixed_rate(&mut self, hz: f64) {
        if hz > 0.0 {
            self.fixed_timestep = Duration::from_secs_f64(1.0 / hz);
        } else {
            log::warn!("Ignoring non-positive fixed rate {}", hz);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(time: &mut Time) -> u32 {
        let mut steps = 0;
        while time.should_fixed_update() {
            steps += 1;
        }
        steps
    }

    #[test]
    fn fixed_steps_follow_accumulated_time() {
        let mut time = Time::new();
        time.set_fixed_rate(10.0);
        time.advance(Duration::from_millis(250));
        assert_eq!(drain(&mut time), 2);
        // 50ms left over carries into the next frame.
        time.advance(Duration::from_millis(60));
        assert_eq!(drain(&mut time), 1);
        assert!((time.elapsed_seconds() - 0.31).abs() < 1e-6);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut time = Time::new();
        time.set_fixed_rate(100.0);
        time.advance(Duration::from_secs(10));
        assert_eq!(drain(&mut time), 25);
        assert!((time.elapsed_seconds() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn non_positive_rate_is_ignored() {
        let mut time = Time::new();
        let before = time.fixed_timestep_seconds();
        time.set_fixed_rate(0.0);
        assert_eq!(time.fixed_timestep_seconds(), before);
    }
}

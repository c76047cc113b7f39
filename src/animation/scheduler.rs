use crate::foundation::error::{BackdropError, BackdropResult};

/// Frame length (ms) that motion constants were tuned against (a 30 fps baseline).
pub const BASELINE_FRAME_MS: f64 = 33.333;

/// Fixed-step accumulator that turns uncapped host callbacks into logical ticks at a target rate.
///
/// Every tick carries the same motion scale `n`, so the speed of the procedural animation depends
/// only on the configured rate and speed factor, never on callback jitter.
#[derive(Clone, Copy, Debug)]
pub struct FrameScheduler {
    frame_interval_ms: f64,
    motion_scale: f64,
    accumulator_ms: f64,
}

impl FrameScheduler {
    /// Create a scheduler for `target_fps` logical ticks per second.
    pub fn new(target_fps: f64, speed_factor: f64) -> BackdropResult<Self> {
        if !target_fps.is_finite() || target_fps <= 0.0 {
            return Err(BackdropError::validation(
                "scheduler target_fps must be finite and > 0",
            ));
        }
        if !speed_factor.is_finite() || speed_factor < 0.0 {
            return Err(BackdropError::validation(
                "scheduler speed_factor must be finite and >= 0",
            ));
        }
        let frame_interval_ms = 1000.0 / target_fps;
        Ok(Self {
            frame_interval_ms,
            motion_scale: (frame_interval_ms / BASELINE_FRAME_MS) * speed_factor,
            accumulator_ms: 0.0,
        })
    }

    /// Feed one real callback delta and drain the accumulator into logical ticks.
    ///
    /// Negative or non-finite deltas count as zero.
    pub fn advance(&mut self, delta_ms: f64) -> Ticks {
        let delta_ms = if delta_ms.is_finite() {
            delta_ms.max(0.0)
        } else {
            0.0
        };
        self.accumulator_ms += delta_ms;

        let interval = self.frame_interval_ms;
        let mut count = (self.accumulator_ms / interval).floor();
        self.accumulator_ms -= count * interval;
        // Division rounding can leave the remainder a hair outside [0, interval).
        while self.accumulator_ms < 0.0 && count > 0.0 {
            self.accumulator_ms += interval;
            count -= 1.0;
        }
        while self.accumulator_ms >= interval {
            self.accumulator_ms -= interval;
            count += 1.0;
        }
        if self.accumulator_ms < 0.0 {
            self.accumulator_ms = 0.0;
        }

        Ticks {
            remaining: count as u64,
            motion_scale: self.motion_scale,
        }
    }

    /// Length of one logical tick in ms.
    pub fn frame_interval_ms(&self) -> f64 {
        self.frame_interval_ms
    }

    /// Motion scale `n` carried by every tick.
    pub fn motion_scale(&self) -> f64 {
        self.motion_scale
    }

    /// Time banked toward the next tick, always in `[0, frame_interval_ms)`.
    pub fn accumulator_ms(&self) -> f64 {
        self.accumulator_ms
    }
}

/// Logical ticks produced by one [`FrameScheduler::advance`] call.
///
/// Iterating yields the motion scale once per tick.
#[derive(Clone, Copy, Debug)]
pub struct Ticks {
    remaining: u64,
    motion_scale: f64,
}

impl Ticks {
    /// Number of ticks not yet consumed.
    pub fn len(&self) -> u64 {
        self.remaining
    }

    /// `true` when the callback did not complete a tick.
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }
}

impl Iterator for Ticks {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.motion_scale)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;

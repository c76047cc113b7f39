/// Leading-edge rate limiter.
///
/// The first call in a window passes; later calls inside `interval_ms` of the last accepted one
/// are dropped, not deferred.
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    interval_ms: f64,
    last_fired_ms: Option<f64>,
}

impl Throttle {
    /// Create a throttle. Non-finite or negative intervals behave like `0` (never throttles).
    pub fn new(interval_ms: f64) -> Self {
        let interval_ms = if interval_ms.is_finite() {
            interval_ms.max(0.0)
        } else {
            0.0
        };
        Self {
            interval_ms,
            last_fired_ms: None,
        }
    }

    /// Return `true` (and open a new window) when a call at `now_ms` may run.
    pub fn try_fire(&mut self, now_ms: f64) -> bool {
        match self.last_fired_ms {
            Some(last) if now_ms - last < self.interval_ms => false,
            _ => {
                self.last_fired_ms = Some(now_ms);
                true
            }
        }
    }

    /// Configured window length.
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/throttle.rs"]
mod tests;

use tracing::{debug, trace};

use crate::animation::throttle::Throttle;
use crate::foundation::core::{Rect, Vec2, Viewport};

/// Default tie window (px) for the vertical distance comparison.
pub const DEFAULT_TIE_EPSILON_PX: f64 = 1.0;
/// Default minimum spacing between handled scroll events.
pub const DEFAULT_SCROLL_THROTTLE_MS: f64 = 100.0;

/// Index of the anchor whose midpoint is vertically nearest the viewport center.
///
/// `anchors` are viewport-relative rects. A candidate wins outright only when it is more than
/// `epsilon` closer vertically than the current best; within `epsilon` of the best it wins only on
/// a strictly smaller horizontal distance. The winner's distances become the new reference in both
/// cases, so the outcome depends on document order at the boundaries.
pub fn nearest_anchor(anchors: &[Rect], viewport: Viewport, epsilon: f64) -> Option<usize> {
    let center = viewport.center();
    let mut closest: Option<usize> = None;
    let mut closest_y = f64::INFINITY;
    let mut closest_x = f64::INFINITY;

    for (i, rect) in anchors.iter().enumerate() {
        let mid = rect.center();
        let dy = (mid.y - center.y).abs();
        let dx = (mid.x - center.x).abs();

        if dy < closest_y - epsilon {
            closest = Some(i);
            closest_y = dy;
            closest_x = dx;
        } else if (dy - closest_y).abs() <= epsilon && dx < closest_x {
            closest = Some(i);
            closest_y = dy;
            closest_x = dx;
        }
    }

    closest
}

/// Active index plus the latched pending target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollSelection {
    active: usize,
    pending: Option<usize>,
}

impl ScrollSelection {
    /// Selection showing `active` with nothing pending.
    pub fn new(active: usize) -> Self {
        Self {
            active,
            pending: None,
        }
    }

    /// Latch `index` and return `true` if a transition should be requested for it.
    pub fn request(&mut self, index: usize) -> bool {
        if index == self.active || self.pending == Some(index) {
            return false;
        }
        self.pending = Some(index);
        true
    }

    /// Record that a transition to `target` finished.
    pub fn complete(&mut self, target: usize) {
        self.active = target;
        self.pending = None;
    }

    /// Index currently shown.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Latched target, if any.
    pub fn pending(&self) -> Option<usize> {
        self.pending
    }
}

/// Turns scroll offsets into transition requests.
#[derive(Clone, Debug)]
pub struct ScrollSelector {
    anchors: Vec<Rect>,
    throttle: Throttle,
    epsilon: f64,
    selection: ScrollSelection,
    scratch: Vec<Rect>,
}

impl ScrollSelector {
    /// Selector over `anchors` given in document coordinates, starting on index 0.
    pub fn new(anchors: Vec<Rect>, throttle_ms: f64, epsilon: f64) -> Self {
        let scratch = Vec::with_capacity(anchors.len());
        Self {
            anchors,
            throttle: Throttle::new(throttle_ms),
            epsilon,
            selection: ScrollSelection::new(0),
            scratch,
        }
    }

    /// Handle a scroll event at `now_ms`; dropped when inside the throttle window.
    pub fn on_scroll(&mut self, now_ms: f64, scroll: Vec2, viewport: Viewport) -> Option<usize> {
        if !self.throttle.try_fire(now_ms) {
            trace!(now_ms, "scroll event throttled");
            return None;
        }
        self.select_now(scroll, viewport)
    }

    /// Unthrottled selection pass, used once at setup.
    pub fn select_now(&mut self, scroll: Vec2, viewport: Viewport) -> Option<usize> {
        self.scratch.clear();
        self.scratch.extend(self.anchors.iter().map(|r| *r - scroll));
        let index = nearest_anchor(&self.scratch, viewport, self.epsilon)?;
        if !self.selection.request(index) {
            return None;
        }
        debug!(
            index,
            active = self.selection.active(),
            "scroll selected new gallery index"
        );
        Some(index)
    }

    /// Record a finished transition.
    pub fn complete(&mut self, target: usize) {
        self.selection.complete(target);
    }

    /// Current selection state.
    pub fn selection(&self) -> ScrollSelection {
        self.selection
    }

    /// Anchors in document coordinates.
    pub fn anchors(&self) -> &[Rect] {
        &self.anchors
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/selector.rs"]
mod tests;

use tracing::debug;

use crate::animation::ease::Ease;
use crate::assets::texture::{TextureId, TextureSet};
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::scene::layers::LayerSet;

/// Default cross-dissolve length.
pub const DEFAULT_DURATION_MS: f64 = 5000.0;

/// A cross-dissolve in flight.
#[derive(Clone, Debug)]
pub struct Transition {
    target: TextureId,
    elapsed_ms: f64,
    overlay: LayerSet,
}

impl Transition {
    /// Texture being faded in.
    pub fn target(&self) -> TextureId {
        self.target
    }

    /// Time spent so far.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Sprites being faded in, drawn above the current layer.
    pub fn overlay(&self) -> &LayerSet {
        &self.overlay
    }
}

/// Crossfade state. Overlay sprites only exist while `Active`.
#[derive(Clone, Debug, Default)]
pub enum CrossfadeState {
    /// No transition running.
    #[default]
    Idle,
    /// A transition is running.
    Active(Transition),
}

/// Result of a start request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new transition began.
    Started,
    /// A transition is already running; the request was ignored.
    Busy,
    /// The index has no loaded texture.
    Unloaded,
    /// The layer set already shows that texture.
    AlreadyShowing,
}

/// Timed alpha cross-dissolve between the current layer set and an overlay bound to a new texture.
#[derive(Clone, Debug)]
pub struct Crossfade {
    state: CrossfadeState,
    duration_ms: f64,
    ease: Ease,
}

impl Crossfade {
    /// Create an idle crossfade.
    pub fn new(duration_ms: f64, ease: Ease) -> BackdropResult<Self> {
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return Err(BackdropError::validation(
                "crossfade duration_ms must be finite and > 0",
            ));
        }
        Ok(Self {
            state: CrossfadeState::Idle,
            duration_ms,
            ease,
        })
    }

    /// Begin fading `current` over to `target`.
    ///
    /// Invalid requests are ignored and reported through the outcome; state is untouched.
    pub fn start(
        &mut self,
        target: TextureId,
        textures: &TextureSet,
        current: &LayerSet,
    ) -> StartOutcome {
        if matches!(self.state, CrossfadeState::Active(_)) {
            return StartOutcome::Busy;
        }
        if !textures.contains(target) {
            return StartOutcome::Unloaded;
        }
        if current.texture() == target {
            return StartOutcome::AlreadyShowing;
        }

        debug!(
            from = current.texture().0,
            to = target.0,
            duration_ms = self.duration_ms,
            "crossfade started"
        );
        self.state = CrossfadeState::Active(Transition {
            target,
            elapsed_ms: 0.0,
            overlay: current.rebound(target),
        });
        StartOutcome::Started
    }

    /// Advance by one real callback delta, updating both layers' opacity.
    ///
    /// On completion the overlay replaces `current` (the old sprites are dropped, their textures
    /// stay in the set) and the finished target is returned.
    pub fn tick(&mut self, delta_ms: f64, current: &mut LayerSet) -> Option<TextureId> {
        let CrossfadeState::Active(tr) = &mut self.state else {
            return None;
        };

        if delta_ms.is_finite() && delta_ms > 0.0 {
            tr.elapsed_ms += delta_ms;
        }
        let t = (tr.elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        let eased = self.ease.apply(t);
        tr.overlay.set_alpha(eased);
        current.set_alpha(1.0 - eased);

        if t < 1.0 {
            return None;
        }

        let CrossfadeState::Active(done) = std::mem::take(&mut self.state) else {
            return None;
        };
        *current = done.overlay;
        debug!(target = done.target.0, "crossfade complete");
        Some(done.target)
    }

    /// Current state.
    pub fn state(&self) -> &CrossfadeState {
        &self.state
    }

    /// `true` while a transition runs.
    pub fn is_active(&self) -> bool {
        matches!(self.state, CrossfadeState::Active(_))
    }

    /// Overlay sprites, present only while active.
    pub fn overlay(&self) -> Option<&LayerSet> {
        match &self.state {
            CrossfadeState::Active(tr) => Some(&tr.overlay),
            CrossfadeState::Idle => None,
        }
    }

    /// Overlay sprites for the per-tick motion update.
    pub(crate) fn overlay_mut(&mut self) -> Option<&mut LayerSet> {
        match &mut self.state {
            CrossfadeState::Active(tr) => Some(&mut tr.overlay),
            CrossfadeState::Idle => None,
        }
    }

    /// Target of the running transition.
    pub fn target(&self) -> Option<TextureId> {
        match &self.state {
            CrossfadeState::Active(tr) => Some(tr.target),
            CrossfadeState::Idle => None,
        }
    }

    /// Configured duration.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/crossfade.rs"]
mod tests;

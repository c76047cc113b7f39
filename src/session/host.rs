use std::collections::VecDeque;

use tracing::debug;

use crate::foundation::core::Vec2;
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::render::frame::Frame;
use crate::session::backdrop::Backdrop;
use crate::session::page::ScrollEventDef;

/// Deterministic refresh loop driving a [`Backdrop`].
///
/// Callbacks arrive every `1000 / refresh_hz` ms. Scripted scroll events due at or before a
/// callback's timestamp are dispatched, in order, before that callback.
#[derive(Debug)]
pub struct Host {
    backdrop: Backdrop,
    frame_ms: f64,
    frames: u64,
    events: VecDeque<ScrollEventDef>,
}

impl Host {
    pub fn new(
        backdrop: Backdrop,
        refresh_hz: f64,
        scroll: &[ScrollEventDef],
    ) -> BackdropResult<Self> {
        if !refresh_hz.is_finite() || refresh_hz <= 0.0 {
            return Err(BackdropError::validation("refresh_hz must be > 0"));
        }
        let mut events = scroll.to_vec();
        events.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        Ok(Self {
            backdrop,
            frame_ms: 1000.0 / refresh_hz,
            frames: 0,
            events: events.into(),
        })
    }

    /// Timestamp of the last callback.
    pub fn now_ms(&self) -> f64 {
        self.frames as f64 * self.frame_ms
    }

    pub fn frame_ms(&self) -> f64 {
        self.frame_ms
    }

    /// Run one refresh callback.
    pub fn step(&mut self) {
        self.frames += 1;
        let now = self.now_ms();
        while let Some(ev) = self.events.front().copied() {
            if ev.at_ms > now {
                break;
            }
            self.events.pop_front();
            self.backdrop.on_scroll(ev.at_ms, Vec2::new(ev.x, ev.y));
        }
        self.backdrop.on_frame(self.frame_ms);
    }

    /// Step until the next callback would land after `t_ms`.
    pub fn run_until(&mut self, t_ms: f64) {
        let start = self.frames;
        while (self.frames + 1) as f64 * self.frame_ms <= t_ms + 1e-6 {
            self.step();
        }
        debug!(
            callbacks = self.frames - start,
            now_ms = self.now_ms(),
            "host advanced"
        );
    }

    pub fn render(&mut self) -> BackdropResult<Frame> {
        self.backdrop.render()
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn backdrop_mut(&mut self) -> &mut Backdrop {
        &mut self.backdrop
    }

    pub fn into_backdrop(self) -> Backdrop {
        self.backdrop
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/host.rs"]
mod tests;

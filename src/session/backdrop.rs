use tracing::{debug, info, trace};

use crate::animation::scheduler::FrameScheduler;
use crate::assets::texture::{TextureId, TextureSet};
use crate::config::BackdropConfig;
use crate::effects::stack::FilterStack;
use crate::foundation::core::{Rect, Vec2, Viewport};
use crate::foundation::error::BackdropResult;
use crate::render::frame::Frame;
use crate::render::surface::Surface;
use crate::scene::crossfade::{Crossfade, StartOutcome};
use crate::scene::layers::LayerSet;
use crate::scene::selector::{ScrollSelection, ScrollSelector};

/// A running backdrop: textures, the active layer set, the crossfade, the scroll selector and the
/// render surface.
///
/// Only constructed once every texture has loaded, so the per-callback entry points
/// ([`Backdrop::on_frame`], [`Backdrop::on_scroll`]) are infallible.
#[derive(Debug)]
pub struct Backdrop {
    viewport: Viewport,
    scroll: Vec2,
    textures: TextureSet,
    layers: LayerSet,
    scheduler: FrameScheduler,
    crossfade: Crossfade,
    selector: Option<ScrollSelector>,
    filters: FilterStack,
    surface: Surface,
}

impl Backdrop {
    /// Lay out the sprites on texture 0 and prepare the surface.
    ///
    /// `anchors` are gallery boxes in document coordinates; with none, scrolling never selects
    /// anything.
    pub fn new(
        cfg: &BackdropConfig,
        viewport: Viewport,
        device_pixel_ratio: f64,
        textures: TextureSet,
        anchors: Vec<Rect>,
    ) -> BackdropResult<Self> {
        cfg.validate()?;
        viewport.validate()?;

        let surface = Surface::new(
            viewport,
            device_pixel_ratio,
            cfg.surface.render_scale,
            cfg.surface.power_preference,
        )?;
        let selector = (!anchors.is_empty()).then(|| {
            ScrollSelector::new(anchors, cfg.scroll.throttle_ms, cfg.scroll.tie_epsilon_px)
        });

        info!(
            textures = textures.len(),
            fallback_only = textures.is_fallback_only(),
            width = surface.width(),
            height = surface.height(),
            "backdrop ready"
        );

        Ok(Self {
            viewport,
            scroll: Vec2::ZERO,
            layers: LayerSet::layout(viewport, TextureId(0)),
            scheduler: FrameScheduler::new(cfg.scheduler.target_fps, cfg.scheduler.speed_factor)?,
            crossfade: Crossfade::new(cfg.crossfade.duration_ms, cfg.crossfade.ease)?,
            filters: FilterStack::new(&cfg.filters, viewport.center())?,
            textures,
            selector,
            surface,
        })
    }

    /// One host refresh callback, `delta_ms` after the previous one.
    ///
    /// Motion advances in whole scheduler ticks; the crossfade advances by the raw delta.
    pub fn on_frame(&mut self, delta_ms: f64) {
        let viewport = self.viewport;
        for n in self.scheduler.advance(delta_ms) {
            self.layers.update(n, viewport);
            if let Some(overlay) = self.crossfade.overlay_mut() {
                overlay.update(n, viewport);
            }
            self.filters.recenter_twist(viewport.center());
        }

        if let Some(done) = self.crossfade.tick(delta_ms, &mut self.layers)
            && let Some(selector) = self.selector.as_mut()
        {
            selector.complete(done.0);
        }
    }

    /// Window scrolled to `scroll` at `now_ms`. Throttled.
    pub fn on_scroll(&mut self, now_ms: f64, scroll: Vec2) {
        self.scroll = scroll;
        let viewport = self.viewport;
        let picked = self
            .selector
            .as_mut()
            .and_then(|s| s.on_scroll(now_ms, scroll, viewport));
        if let Some(index) = picked {
            self.request(index);
        }
    }

    /// Unthrottled selection at the current scroll offset, run once after setup.
    pub fn select_initial(&mut self) {
        let (scroll, viewport) = (self.scroll, self.viewport);
        let picked = self
            .selector
            .as_mut()
            .and_then(|s| s.select_now(scroll, viewport));
        if let Some(index) = picked {
            self.request(index);
        }
    }

    fn request(&mut self, index: usize) {
        let outcome = self
            .crossfade
            .start(TextureId(index), &self.textures, &self.layers);
        match outcome {
            StartOutcome::Started => {}
            other => trace!(index, ?other, "transition request ignored"),
        }
    }

    /// Fit the surface and the motion math to a new viewport. Sprite layout is kept.
    pub fn resize(&mut self, viewport: Viewport) -> BackdropResult<()> {
        self.surface.resize(viewport)?;
        self.viewport = viewport;
        debug!(
            width = viewport.width,
            height = viewport.height,
            "backdrop resized"
        );
        Ok(())
    }

    /// Composite the current layers (and the overlay, if fading) and run the filter chain.
    pub fn render(&mut self) -> BackdropResult<Frame> {
        self.surface.render(
            &self.layers,
            self.crossfade.overlay(),
            &self.textures,
            &mut self.filters,
        )
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Last scroll offset seen.
    pub fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    pub fn textures(&self) -> &TextureSet {
        &self.textures
    }

    /// Active layer set.
    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    pub fn crossfade(&self) -> &Crossfade {
        &self.crossfade
    }

    /// Scroll selection state; `None` when the page has no anchors.
    pub fn selection(&self) -> Option<ScrollSelection> {
        self.selector.as_ref().map(ScrollSelector::selection)
    }

    pub fn filters(&self) -> &FilterStack {
        &self.filters
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/backdrop.rs"]
mod tests;

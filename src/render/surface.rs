use tracing::{debug, trace};

use crate::assets::texture::TextureSet;
use crate::effects::composite::draw_sprite;
use crate::effects::stack::FilterStack;
use crate::foundation::core::{Affine, Viewport};
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::foundation::math::rgba8_len;
use crate::render::frame::Frame;
use crate::scene::layers::LayerSet;

/// How much CPU the filter chain may use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerPreference {
    /// Everything on the calling thread.
    #[default]
    LowPower,
    /// Filter rows fan out over the rayon pool.
    HighPerformance,
}

/// Transparent, reduced-resolution raster target sized to the viewport.
///
/// Drawing happens in CSS pixels; the backing store holds
/// `viewport * device_pixel_ratio * render_scale` pixels.
#[derive(Clone, Debug)]
pub struct Surface {
    viewport: Viewport,
    device_pixel_ratio: f64,
    render_scale: f64,
    power: PowerPreference,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    pub fn new(
        viewport: Viewport,
        device_pixel_ratio: f64,
        render_scale: f64,
        power: PowerPreference,
    ) -> BackdropResult<Self> {
        if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
            return Err(BackdropError::validation("device_pixel_ratio must be > 0"));
        }
        if !render_scale.is_finite() || render_scale <= 0.0 {
            return Err(BackdropError::validation("render_scale must be > 0"));
        }
        let mut surface = Self {
            viewport,
            device_pixel_ratio,
            render_scale,
            power,
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        surface.resize(viewport)?;
        Ok(surface)
    }

    /// Backing size for `viewport`, each side rounded and at least 1.
    pub fn backing_size(
        viewport: Viewport,
        device_pixel_ratio: f64,
        render_scale: f64,
    ) -> BackdropResult<(u32, u32)> {
        viewport.validate()?;
        let res = device_pixel_ratio * render_scale;
        let side = |css: f64| -> BackdropResult<u32> {
            let px = (css * res).round().max(1.0);
            if !px.is_finite() || px > f64::from(u32::MAX) {
                return Err(BackdropError::validation("surface backing size out of range"));
            }
            Ok(px as u32)
        };
        Ok((side(viewport.width)?, side(viewport.height)?))
    }

    /// Fit the surface to a new viewport. Contents are cleared.
    pub fn resize(&mut self, viewport: Viewport) -> BackdropResult<()> {
        let (w, h) = Self::backing_size(viewport, self.device_pixel_ratio, self.render_scale)?;
        let len = rgba8_len(w, h).ok_or_else(|| BackdropError::render("surface size overflow"))?;
        self.viewport = viewport;
        self.width = w;
        self.height = h;
        self.pixels.clear();
        self.pixels.resize(len, 0);
        debug!(
            css_width = viewport.width,
            css_height = viewport.height,
            width = w,
            height = h,
            "surface resized"
        );
        Ok(())
    }

    /// Backing-store pixels per CSS pixel.
    pub fn resolution(&self) -> f64 {
        self.device_pixel_ratio * self.render_scale
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn power_preference(&self) -> PowerPreference {
        self.power
    }

    /// Clear, draw `layers` then `overlay` back to front, run `filters` and return the frame.
    pub fn render(
        &mut self,
        layers: &LayerSet,
        overlay: Option<&LayerSet>,
        textures: &TextureSet,
        filters: &mut FilterStack,
    ) -> BackdropResult<Frame> {
        self.pixels.fill(0);
        let resolution = self.resolution();
        let to_backing = Affine::scale(resolution);

        for set in std::iter::once(layers).chain(overlay) {
            for sprite in set.sprites() {
                let texture = textures.get(sprite.texture).ok_or_else(|| {
                    BackdropError::render(format!(
                        "sprite bound to unknown texture {}",
                        sprite.texture.0
                    ))
                })?;
                draw_sprite(
                    &mut self.pixels,
                    self.width,
                    self.height,
                    to_backing,
                    sprite,
                    texture,
                )?;
            }
        }

        let parallel = self.power == PowerPreference::HighPerformance;
        filters.apply(
            &mut self.pixels,
            self.width,
            self.height,
            resolution,
            parallel,
        )?;
        trace!(width = self.width, height = self.height, "frame rendered");

        Ok(Frame {
            width: self.width,
            height: self.height,
            data: self.pixels.clone(),
            premultiplied: true,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;

use tracing::trace;

use crate::config::FilterConfig;
use crate::effects::blur::BlurPass;
use crate::effects::color::ColorMatrix;
use crate::effects::twist::Twist;
use crate::foundation::core::Point;
use crate::foundation::error::BackdropResult;

/// Post-processing chain applied to the composited sprites, always in this order: brightness and
/// contrast, twist, each blur pass, saturation, tint.
#[derive(Clone, Debug)]
pub struct FilterStack {
    adjustment: ColorMatrix,
    twist: Twist,
    blur: Vec<BlurPass>,
    saturation: ColorMatrix,
    tint: ColorMatrix,
    scratch: Vec<u8>,
}

impl FilterStack {
    /// Build the chain with the twist centered on `center` (CSS pixels).
    pub fn new(cfg: &FilterConfig, center: Point) -> BackdropResult<Self> {
        for pass in &cfg.blur {
            pass.validate()?;
        }
        Ok(Self {
            adjustment: ColorMatrix::brightness_contrast(cfg.brightness as f32, cfg.contrast as f32),
            twist: Twist::new(cfg.twist.angle_deg, cfg.twist.radius, center),
            blur: cfg.blur.clone(),
            saturation: ColorMatrix::saturation(cfg.saturation as f32),
            tint: ColorMatrix::tint(cfg.tint),
            scratch: Vec::new(),
        })
    }

    /// Move the twist center, in CSS pixels.
    pub fn recenter_twist(&mut self, center: Point) {
        self.twist.offset = center;
    }

    pub fn twist(&self) -> &Twist {
        &self.twist
    }

    pub fn blur_passes(&self) -> &[BlurPass] {
        &self.blur
    }

    /// Run the chain over a premultiplied RGBA8 surface in place.
    pub fn apply(
        &mut self,
        buf: &mut [u8],
        width: u32,
        height: u32,
        resolution: f64,
        parallel: bool,
    ) -> BackdropResult<()> {
        self.adjustment.apply_rgba8_premul(buf);
        self.twist
            .apply(buf, &mut self.scratch, width, height, resolution, parallel)?;
        for pass in &self.blur {
            pass.apply(buf, &mut self.scratch, width, height, resolution, parallel)?;
        }
        self.saturation.apply_rgba8_premul(buf);
        self.tint.apply_rgba8_premul(buf);
        trace!(width, height, passes = self.blur.len(), "filter stack applied");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/stack.rs"]
mod tests;

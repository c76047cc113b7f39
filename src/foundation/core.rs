use crate::foundation::error::{BackdropError, BackdropResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Visible area of the host page in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport with finite, strictly positive dimensions.
    pub fn new(width: f64, height: f64) -> BackdropResult<Self> {
        let v = Self { width, height };
        v.validate()?;
        Ok(v)
    }

    /// Reject zero, negative or non-finite dimensions.
    pub fn validate(&self) -> BackdropResult<()> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(BackdropError::validation("viewport size must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(BackdropError::validation("viewport size must be > 0"));
        }
        Ok(())
    }

    /// Center point of the viewport.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Straight-alpha RGB color, used for the tint pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8(pub u8, pub u8, pub u8);

impl Rgb8 {
    /// Channels as normalized floats.
    pub fn to_unit(self) -> [f32; 3] {
        [
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

use crate::assets::texture::TextureId;
use crate::foundation::core::{Affine, Point, Vec2};

/// One textured, square, center-anchored quad.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    /// Anchor position in CSS pixels.
    pub position: Point,
    /// Rotation in radians around the anchor.
    pub rotation: f64,
    /// Edge length in CSS pixels (width == height).
    pub size: f64,
    /// Anchor in normalized sprite space; `(0.5, 0.5)` is the center.
    pub anchor: Vec2,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
    /// Bound texture.
    pub texture: TextureId,
}

impl Sprite {
    /// Opaque, unrotated sprite anchored at its center.
    pub fn centered(texture: TextureId, position: Point, size: f64) -> Self {
        Self {
            position,
            rotation: 0.0,
            size,
            anchor: Vec2::new(0.5, 0.5),
            alpha: 1.0,
            texture,
        }
    }

    /// Same geometry bound to `texture`, fully transparent.
    pub fn rebound(&self, texture: TextureId) -> Self {
        Self {
            alpha: 0.0,
            texture,
            ..self.clone()
        }
    }

    /// Map from unit sprite space (`[0, 1]²`, texture uv) to CSS pixel space.
    pub fn to_screen(&self) -> Affine {
        Affine::translate(self.position.to_vec2())
            * Affine::rotate(self.rotation)
            * Affine::scale(self.size)
            * Affine::translate(-self.anchor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/sprite.rs"]
mod tests;

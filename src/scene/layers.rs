use tracing::trace;

use crate::assets::texture::TextureId;
use crate::foundation::core::{Point, Vec2, Viewport};
use crate::scene::sprite::Sprite;

/// Spin per motion unit for the base layer.
pub const BASE_SPIN: f64 = 0.003;
/// Spin per motion unit for the secondary layer.
pub const SECONDARY_SPIN: f64 = -0.008;
/// Spin per motion unit for orbit A.
pub const ORBIT_A_SPIN: f64 = -0.006;
/// Spin per motion unit for orbit B.
pub const ORBIT_B_SPIN: f64 = 0.004;
/// Orbit angle as a fraction of the sprite's own rotation.
pub const ORBIT_PHASE: f64 = 0.75;
/// Orbit radius as a fraction of viewport width.
pub const ORBIT_RADIUS_FRAC: f64 = 0.25;
/// Orbit B center offset as a fraction of half the viewport width, on both axes.
pub const ORBIT_B_OFFSET_FRAC: f64 = 0.1;

/// Fixed semantic role of a sprite, in draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerRole {
    /// Large static-centered backdrop.
    Base,
    /// Off-center counter-rotating layer.
    Secondary,
    /// Inner orbiting layer.
    OrbitA,
    /// Small offset orbiting ring.
    OrbitB,
}

impl LayerRole {
    /// Every role, back to front.
    pub const ALL: [LayerRole; 4] = [
        LayerRole::Base,
        LayerRole::Secondary,
        LayerRole::OrbitA,
        LayerRole::OrbitB,
    ];

    fn slot(self) -> usize {
        match self {
            Self::Base => 0,
            Self::Secondary => 1,
            Self::OrbitA => 2,
            Self::OrbitB => 3,
        }
    }
}

/// The four decorative sprites, all bound to one texture.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerSet {
    sprites: [Sprite; 4],
}

impl LayerSet {
    /// Initial layout for `viewport`, every sprite bound to `texture`.
    pub fn layout(viewport: Viewport, texture: TextureId) -> Self {
        let w = viewport.width;
        let center = viewport.center();
        let off_center = Point::new(viewport.width / 2.5, viewport.height / 2.5);
        Self {
            sprites: [
                Sprite::centered(texture, center, w * 1.25),
                Sprite::centered(texture, off_center, w * 0.8),
                Sprite::centered(texture, center, w * 0.5),
                Sprite::centered(texture, center, w * 0.25),
            ],
        }
    }

    /// Sprite playing `role`.
    pub fn sprite(&self, role: LayerRole) -> &Sprite {
        &self.sprites[role.slot()]
    }

    fn sprite_mut(&mut self, role: LayerRole) -> &mut Sprite {
        &mut self.sprites[role.slot()]
    }

    /// Sprites in draw order.
    pub fn sprites(&self) -> &[Sprite; 4] {
        &self.sprites
    }

    /// Texture the set is bound to.
    pub fn texture(&self) -> TextureId {
        self.sprites[0].texture
    }

    /// Uniform opacity of the set.
    pub fn alpha(&self) -> f64 {
        self.sprites[0].alpha
    }

    /// Set every sprite's opacity.
    pub fn set_alpha(&mut self, alpha: f64) {
        for s in &mut self.sprites {
            s.alpha = alpha;
        }
    }

    /// Geometry-preserving copy bound to `texture`, fully transparent.
    pub fn rebound(&self, texture: TextureId) -> Self {
        Self {
            sprites: self.sprites.clone().map(|s| s.rebound(texture)),
        }
    }

    /// Advance the procedural motion by one logical tick of scale `n`.
    pub fn update(&mut self, n: f64, viewport: Viewport) {
        let center = viewport.center();
        let radius = viewport.width * ORBIT_RADIUS_FRAC;
        let half_w = viewport.width / 2.0;
        let offset_b = Vec2::new(half_w * ORBIT_B_OFFSET_FRAC, half_w * ORBIT_B_OFFSET_FRAC);

        self.sprite_mut(LayerRole::Base).rotation += BASE_SPIN * n;
        self.sprite_mut(LayerRole::Secondary).rotation += SECONDARY_SPIN * n;

        let a = self.sprite_mut(LayerRole::OrbitA);
        a.rotation += ORBIT_A_SPIN * n;
        a.position = orbit_position(center, radius, a.rotation);

        let b = self.sprite_mut(LayerRole::OrbitB);
        b.rotation += ORBIT_B_SPIN * n;
        b.position = orbit_position(center + offset_b, radius, b.rotation);

        trace!(
            base = self.sprites[0].rotation,
            orbit_a = self.sprites[2].rotation,
            orbit_b = self.sprites[3].rotation,
            "layer tick"
        );
    }
}

/// Point on the orbit of `radius` around `center` for a sprite at `rotation`.
pub fn orbit_position(center: Point, radius: f64, rotation: f64) -> Point {
    let phase = rotation * ORBIT_PHASE;
    center + Vec2::new(radius * phase.cos(), radius * phase.sin())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layers.rs"]
mod tests;

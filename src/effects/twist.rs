use rayon::prelude::*;

use crate::effects::composite::{PremulRgba8, bilinear};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::foundation::math::rgba8_len;

/// Radial swirl: pixels within `radius` of `offset` sample the source rotated by
/// `angle * ((radius - dist) / radius)²`, so the twist is strongest at the center and fades to
/// nothing at the rim.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Twist {
    /// Rotation at the center, radians.
    pub angle: f64,
    /// CSS pixels.
    pub radius: f64,
    /// Center in CSS pixels.
    pub offset: Point,
}

impl Twist {
    pub fn new(angle_deg: f64, radius: f64, offset: Point) -> Self {
        Self {
            angle: angle_deg.to_radians(),
            radius,
            offset,
        }
    }

    /// Source position sampled for destination point `p`, both in the same pixel space.
    pub fn source_point(&self, p: Point, center: Point, radius: f64) -> Point {
        let v = p - center;
        let dist = v.hypot();
        if radius <= 0.0 || dist >= radius {
            return p;
        }
        let pct = (radius - dist) / radius;
        let theta = pct * pct * self.angle;
        let (s, c) = theta.sin_cos();
        center + Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
    }

    /// Apply to `buf` in place; `tmp` receives a copy of the unfiltered input.
    pub fn apply(
        &self,
        buf: &mut [u8],
        tmp: &mut Vec<u8>,
        width: u32,
        height: u32,
        resolution: f64,
        parallel: bool,
    ) -> BackdropResult<()> {
        let expected = rgba8_len(width, height)
            .ok_or_else(|| BackdropError::render("twist buffer size overflow"))?;
        if buf.len() != expected {
            return Err(BackdropError::render(
                "twist expects buffer matching width*height*4",
            ));
        }
        let radius = self.radius * resolution;
        if expected == 0 || self.angle == 0.0 || !radius.is_finite() || radius <= 0.0 {
            return Ok(());
        }

        tmp.clear();
        tmp.extend_from_slice(buf);
        let src: &[u8] = tmp;
        let center = Point::new(self.offset.x * resolution, self.offset.y * resolution);
        let (w, h) = (i64::from(width), i64::from(height));
        let fetch = |x: i64, y: i64| -> PremulRgba8 {
            let x = x.clamp(0, w - 1) as usize;
            let y = y.clamp(0, h - 1) as usize;
            let i = (y * width as usize + x) * 4;
            [src[i], src[i + 1], src[i + 2], src[i + 3]]
        };

        let row_len = width as usize * 4;
        let twist_row = |(y, row): (usize, &mut [u8])| {
            let py = y as f64 + 0.5;
            if (py - center.y).abs() >= radius {
                return;
            }
            for x in 0..width as usize {
                let p = Point::new(x as f64 + 0.5, py);
                let s = self.source_point(p, center, radius);
                if s == p {
                    continue;
                }
                let px = bilinear(fetch, s.x - 0.5, s.y - 0.5);
                row[x * 4..x * 4 + 4].copy_from_slice(&px);
            }
        };
        if parallel {
            buf.par_chunks_mut(row_len).enumerate().for_each(twist_row);
        } else {
            buf.chunks_mut(row_len).enumerate().for_each(twist_row);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/twist.rs"]
mod tests;

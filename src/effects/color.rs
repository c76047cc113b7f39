use crate::foundation::core::Rgb8;

/// Rec.601 luma weights.
const LUMA: [f32; 3] = [0.299, 0.587, 0.114];

/// 4x5 affine color matrix, applied as `out = M * [r, g, b, a, 1]` on straight-alpha channels in
/// `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix(pub [f32; 20]);

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ColorMatrix {
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    /// `c' = (c * brightness - 0.5) * contrast + 0.5` on the color channels.
    pub fn brightness_contrast(brightness: f32, contrast: f32) -> Self {
        let s = brightness * contrast;
        let o = 0.5 * (1.0 - contrast);
        Self([
            s, 0.0, 0.0, 0.0, o, //
            0.0, s, 0.0, 0.0, o, //
            0.0, 0.0, s, 0.0, o, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// Luma-preserving saturation; `1.0` is identity, `0.0` is grayscale.
    pub fn saturation(amount: f32) -> Self {
        let mut m = Self::IDENTITY.0;
        for row in 0..3 {
            for col in 0..3 {
                let ident = if row == col { 1.0 } else { 0.0 };
                m[row * 5 + col] = (1.0 - amount) * LUMA[col] + amount * ident;
            }
        }
        Self(m)
    }

    /// Per-channel multiply by `color`.
    pub fn tint(color: Rgb8) -> Self {
        let [r, g, b] = color.to_unit();
        Self([
            r, 0.0, 0.0, 0.0, 0.0, //
            0.0, g, 0.0, 0.0, 0.0, //
            0.0, 0.0, b, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// Apply to a premultiplied RGBA8 buffer in place.
    pub fn apply_rgba8_premul(&self, buf: &mut [u8]) {
        let m = &self.0;
        for px in buf.chunks_exact_mut(4) {
            let pa = f32::from(px[3]) / 255.0;
            let inv_a = if pa > 0.0 { 1.0 / pa } else { 0.0 };
            let r = f32::from(px[0]) / 255.0 * inv_a;
            let g = f32::from(px[1]) / 255.0 * inv_a;
            let b = f32::from(px[2]) / 255.0 * inv_a;
            let a = pa;

            let out_r = (m[0] * r + m[1] * g + m[2] * b + m[3] * a + m[4]).clamp(0.0, 1.0);
            let out_g = (m[5] * r + m[6] * g + m[7] * b + m[8] * a + m[9]).clamp(0.0, 1.0);
            let out_b = (m[10] * r + m[11] * g + m[12] * b + m[13] * a + m[14]).clamp(0.0, 1.0);
            let out_a = (m[15] * r + m[16] * g + m[17] * b + m[18] * a + m[19]).clamp(0.0, 1.0);

            px[0] = to_u8(out_r * out_a);
            px[1] = to_u8(out_g * out_a);
            px[2] = to_u8(out_b * out_a);
            px[3] = to_u8(out_a);
        }
    }
}

fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/color.rs"]
mod tests;

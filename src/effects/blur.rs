use rayon::prelude::*;

use crate::foundation::error::{BackdropError, BackdropResult};
use crate::foundation::math::rgba8_len;

/// Largest per-iteration kernel radius in backing pixels.
pub const MAX_BLUR_RADIUS: u32 = 256;

/// One blur filter: `quality` Gaussian iterations whose radii add up to roughly `strength`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlurPass {
    pub quality: u32,
    /// Total blur in CSS pixels.
    pub strength: f64,
}

impl BlurPass {
    pub fn new(quality: u32, strength: f64) -> BackdropResult<Self> {
        let pass = Self { quality, strength };
        pass.validate()?;
        Ok(pass)
    }

    pub fn validate(&self) -> BackdropResult<()> {
        if self.quality == 0 {
            return Err(BackdropError::validation("blur quality must be >= 1"));
        }
        if !self.strength.is_finite() || self.strength < 0.0 {
            return Err(BackdropError::validation(
                "blur strength must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Kernel radius of each iteration at `resolution` backing pixels per CSS pixel.
    pub fn iteration_radius(&self, resolution: f64) -> u32 {
        if self.quality == 0 {
            return 0;
        }
        let r = (self.strength * resolution / f64::from(self.quality)).round();
        if !r.is_finite() || r <= 0.0 {
            return 0;
        }
        (r as u32).min(MAX_BLUR_RADIUS)
    }

    /// Run every iteration over `buf` in place. `tmp` is reused scratch space.
    pub fn apply(
        &self,
        buf: &mut [u8],
        tmp: &mut Vec<u8>,
        width: u32,
        height: u32,
        resolution: f64,
        parallel: bool,
    ) -> BackdropResult<()> {
        let radius = self.iteration_radius(resolution);
        if radius == 0 {
            return Ok(());
        }
        let sigma = radius as f32 / 2.0;
        for _ in 0..self.quality {
            blur_rgba8_premul_in_place(buf, tmp, width, height, radius, sigma, parallel)?;
        }
        Ok(())
    }
}

/// Separable Gaussian blur of a premultiplied RGBA8 buffer, edges clamped.
pub fn blur_rgba8_premul_in_place(
    buf: &mut [u8],
    tmp: &mut Vec<u8>,
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
    parallel: bool,
) -> BackdropResult<()> {
    let expected_len =
        rgba8_len(width, height).ok_or_else(|| BackdropError::render("blur buffer size overflow"))?;
    if buf.len() != expected_len {
        return Err(BackdropError::render(
            "blur expects buffer matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    tmp.clear();
    tmp.resize(expected_len, 0);

    let row = width as usize * 4;
    let w = width as i32;
    let h = height as i32;
    let k = kernel.as_slice();

    {
        let src: &[u8] = buf;
        let horizontal = |(y, dst_row): (usize, &mut [u8])| horizontal_row(src, dst_row, y, w, k);
        if parallel {
            tmp.par_chunks_mut(row).enumerate().for_each(horizontal);
        } else {
            tmp.chunks_mut(row).enumerate().for_each(horizontal);
        }
    }
    {
        let src: &[u8] = tmp;
        let vertical = |(y, dst_row): (usize, &mut [u8])| vertical_row(src, dst_row, y, w, h, k);
        if parallel {
            buf.par_chunks_mut(row).enumerate().for_each(vertical);
        } else {
            buf.chunks_mut(row).enumerate().for_each(vertical);
        }
    }
    Ok(())
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> BackdropResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(BackdropError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(BackdropError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push the rounding residue into the center tap so the kernel sums to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_row(src: &[u8], dst: &mut [u8], y: usize, w: i32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let base = y * w as usize;
    for x in 0..w {
        let mut acc = [0u64; 4];
        for (ki, &kw) in k.iter().enumerate() {
            let sx = (x + ki as i32 - radius).clamp(0, w - 1);
            let idx = (base + sx as usize) * 4;
            for c in 0..4 {
                acc[c] += u64::from(kw) * u64::from(src[idx + c]);
            }
        }
        let out = x as usize * 4;
        for c in 0..4 {
            dst[out + c] = q16_to_u8(acc[c]);
        }
    }
}

fn vertical_row(src: &[u8], dst: &mut [u8], y: usize, w: i32, h: i32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let y = y as i32;
    for x in 0..w {
        let mut acc = [0u64; 4];
        for (ki, &kw) in k.iter().enumerate() {
            let sy = (y + ki as i32 - radius).clamp(0, h - 1);
            let idx = ((sy * w + x) as usize) * 4;
            for c in 0..4 {
                acc[c] += u64::from(kw) * u64::from(src[idx + c]);
            }
        }
        let out = x as usize * 4;
        for c in 0..4 {
            dst[out + c] = q16_to_u8(acc[c]);
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;

use crate::assets::texture::Texture;
use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::foundation::math::{mul_div255_u8, rgba8_len};
use crate::scene::sprite::Sprite;

pub type PremulRgba8 = [u8; 4];

/// Source-over of one premultiplied pixel, with `src` scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Bilinear sample at continuous texel coordinates `(x, y)`, where texel `(i, j)` has its center
/// at `(i, j)`. `fetch` must clamp out-of-range coordinates itself.
pub(crate) fn bilinear(fetch: impl Fn(i64, i64) -> PremulRgba8, x: f64, y: f64) -> PremulRgba8 {
    let fx = x.floor();
    let fy = y.floor();
    let tx = (x - fx) as f32;
    let ty = (y - fy) as f32;
    let x0 = fx as i64;
    let y0 = fy as i64;

    let p00 = fetch(x0, y0);
    let p10 = fetch(x0 + 1, y0);
    let p01 = fetch(x0, y0 + 1);
    let p11 = fetch(x0 + 1, y0 + 1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = f32::from(p00[c]) + (f32::from(p10[c]) - f32::from(p00[c])) * tx;
        let bottom = f32::from(p01[c]) + (f32::from(p11[c]) - f32::from(p01[c])) * tx;
        out[c] = (top + (bottom - top) * ty).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Draw `sprite` textured with `texture` into `dst` using source-over at the sprite's alpha.
///
/// `to_backing` maps CSS pixels to backing-store pixels. Each covered destination pixel samples the
/// texture at its center through the inverse transform.
pub fn draw_sprite(
    dst: &mut [u8],
    width: u32,
    height: u32,
    to_backing: Affine,
    sprite: &Sprite,
    texture: &Texture,
) -> BackdropResult<()> {
    let expected = rgba8_len(width, height)
        .ok_or_else(|| BackdropError::render("surface size overflow"))?;
    if dst.len() != expected {
        return Err(BackdropError::render(
            "draw_sprite expects dst matching width*height*4",
        ));
    }
    if sprite.alpha <= 0.0 || width == 0 || height == 0 {
        return Ok(());
    }

    let xf = to_backing * sprite.to_screen();
    let det = xf.determinant();
    if !det.is_finite() || det.abs() < 1e-12 {
        return Ok(());
    }
    let inv = xf.inverse();

    let bbox = xf.transform_rect_bbox(Rect::new(0.0, 0.0, 1.0, 1.0));
    let x0 = bbox.x0.floor().max(0.0) as u32;
    let y0 = bbox.y0.floor().max(0.0) as u32;
    let x1 = bbox.x1.ceil().min(f64::from(width)) as u32;
    let y1 = bbox.y1.ceil().min(f64::from(height)) as u32;
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    let tw = f64::from(texture.width());
    let th = f64::from(texture.height());
    let opacity = sprite.alpha as f32;
    let row = width as usize * 4;

    for y in y0..y1 {
        for x in x0..x1 {
            let uv = inv * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if !(0.0..1.0).contains(&uv.x) || !(0.0..1.0).contains(&uv.y) {
                continue;
            }
            let src = bilinear(
                |sx, sy| texture.texel_clamped(sx, sy),
                uv.x * tw - 0.5,
                uv.y * th - 0.5,
            );
            let idx = y as usize * row + x as usize * 4;
            let px = &mut dst[idx..idx + 4];
            let out = over([px[0], px[1], px[2], px[3]], src, opacity);
            px.copy_from_slice(&out);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;

use super::*;
use crate::assets::texture::TextureId;
use crate::foundation::core::Point;

fn solid_texture(w: u32, h: u32, px: [u8; 4]) -> Texture {
    Texture::from_premul_rgba8("solid.png", w, h, px.repeat((w * h) as usize)).unwrap()
}

fn pixel(buf: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [255, 255, 255, 0], 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let src = [255, 0, 0, 255];
    assert_eq!(over([0, 0, 0, 255], src, 1.0), src);
}

#[test]
fn over_half_opacity_on_transparent_halves_src() {
    let out = over([0, 0, 0, 0], [200, 100, 0, 255], 0.5);
    assert_eq!(out, [100, 50, 0, 128]);
}

#[test]
fn bilinear_interpolates_between_texels() {
    let fetch = |x: i64, _y: i64| if x <= 0 { [0, 0, 0, 0] } else { [200, 200, 200, 200] };
    assert_eq!(bilinear(fetch, 0.5, 0.0), [100, 100, 100, 100]);
    assert_eq!(bilinear(fetch, 0.0, 0.0), [0, 0, 0, 0]);
}

#[test]
fn draw_sprite_covers_its_square() {
    let tex = solid_texture(4, 4, [255, 0, 0, 255]);
    let sprite = Sprite::centered(TextureId(0), Point::new(4.0, 4.0), 4.0);
    let (w, h) = (8u32, 8u32);
    let mut dst = vec![0u8; (w * h * 4) as usize];

    draw_sprite(&mut dst, w, h, Affine::IDENTITY, &sprite, &tex).unwrap();

    assert_eq!(pixel(&dst, w, 2, 2), [255, 0, 0, 255]);
    assert_eq!(pixel(&dst, w, 5, 5), [255, 0, 0, 255]);
    assert_eq!(pixel(&dst, w, 1, 1), [0, 0, 0, 0]);
    assert_eq!(pixel(&dst, w, 6, 6), [0, 0, 0, 0]);
    let covered = dst.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert_eq!(covered, 16);
}

#[test]
fn draw_sprite_applies_backing_scale() {
    let tex = solid_texture(2, 2, [0, 0, 255, 255]);
    let sprite = Sprite::centered(TextureId(0), Point::new(8.0, 8.0), 8.0);
    let (w, h) = (4u32, 4u32);
    let mut dst = vec![0u8; (w * h * 4) as usize];

    draw_sprite(&mut dst, w, h, Affine::scale(0.25), &sprite, &tex).unwrap();

    // CSS square [4, 12]² lands on backing [1, 3]².
    assert_eq!(pixel(&dst, w, 1, 1), [0, 0, 255, 255]);
    assert_eq!(pixel(&dst, w, 2, 2), [0, 0, 255, 255]);
    assert_eq!(pixel(&dst, w, 0, 0), [0, 0, 0, 0]);
    assert_eq!(pixel(&dst, w, 3, 3), [0, 0, 0, 0]);
}

#[test]
fn transparent_sprite_draws_nothing() {
    let tex = solid_texture(2, 2, [255, 255, 255, 255]);
    let mut sprite = Sprite::centered(TextureId(0), Point::new(2.0, 2.0), 4.0);
    sprite.alpha = 0.0;
    let mut dst = vec![0u8; 4 * 4 * 4];
    draw_sprite(&mut dst, 4, 4, Affine::IDENTITY, &sprite, &tex).unwrap();
    assert!(dst.iter().all(|&b| b == 0));
}

#[test]
fn sprite_outside_surface_is_clipped() {
    let tex = solid_texture(2, 2, [255, 255, 255, 255]);
    let sprite = Sprite::centered(TextureId(0), Point::new(-50.0, -50.0), 4.0);
    let mut dst = vec![0u8; 4 * 4 * 4];
    draw_sprite(&mut dst, 4, 4, Affine::IDENTITY, &sprite, &tex).unwrap();
    assert!(dst.iter().all(|&b| b == 0));
}

#[test]
fn mismatched_buffer_is_a_render_error() {
    let tex = solid_texture(1, 1, [0, 0, 0, 255]);
    let sprite = Sprite::centered(TextureId(0), Point::new(1.0, 1.0), 2.0);
    let mut dst = vec![0u8; 3];
    let err = draw_sprite(&mut dst, 2, 2, Affine::IDENTITY, &sprite, &tex).unwrap_err();
    assert!(matches!(err, BackdropError::Render(_)));
}

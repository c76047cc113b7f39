use std::io::Cursor;

use super::*;
use crate::assets::source::MemoryTextureSource;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn source_with(entries: &[(&str, Vec<u8>)]) -> MemoryTextureSource {
    let mut src = MemoryTextureSource::new();
    for (href, bytes) in entries {
        src.insert(href, bytes.clone()).unwrap();
    }
    src
}

fn hrefs(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn failed_load_is_excluded_and_indices_stay_contiguous() {
    let src = source_with(&[
        ("a.png", png_bytes(2, 2, [255, 0, 0, 255])),
        ("c.png", png_bytes(3, 1, [0, 0, 255, 255])),
        ("bg.png", png_bytes(1, 1, [0, 0, 0, 255])),
    ]);
    let set = TextureSet::load(&src, &hrefs(&["a.png", "b.png", "c.png"]), "bg.png").unwrap();

    assert_eq!(set.len(), 2);
    assert!(!set.is_fallback_only());
    assert_eq!(set.get(TextureId(0)).unwrap().href(), "a.png");
    assert_eq!(set.get(TextureId(1)).unwrap().href(), "c.png");
    assert!(set.get(TextureId(2)).is_none());
    assert!(!set.contains(TextureId(2)));
}

#[test]
fn empty_anchor_list_loads_only_fallback() {
    let src = source_with(&[("bg.png", png_bytes(1, 1, [9, 9, 9, 255]))]);
    let set = TextureSet::load(&src, &[], "bg.png").unwrap();
    assert_eq!(set.len(), 1);
    assert!(set.is_fallback_only());
    assert_eq!(set.get(TextureId(0)).unwrap().href(), "bg.png");
}

#[test]
fn all_failures_escalate_to_fallback() {
    let src = source_with(&[
        ("broken.png", b"nope".to_vec()),
        ("bg.png", png_bytes(1, 1, [1, 2, 3, 255])),
    ]);
    let set = TextureSet::load(&src, &hrefs(&["broken.png", "missing.png"]), "bg.png").unwrap();
    assert!(set.is_fallback_only());
    assert_eq!(set.len(), 1);
}

#[test]
fn failing_fallback_is_fatal() {
    let src = MemoryTextureSource::new();
    let err = TextureSet::load(&src, &hrefs(&["a.png"]), "bg.png").unwrap_err();
    assert!(err.to_string().contains("fallback texture 'bg.png'"));
}

#[test]
fn texture_rejects_mismatched_buffer() {
    assert!(Texture::from_premul_rgba8("x", 2, 2, vec![0; 15]).is_err());
    assert!(Texture::from_premul_rgba8("x", 0, 2, vec![]).is_err());
    assert!(TextureSet::new(vec![]).is_err());
}

#[test]
fn texel_lookup_clamps_to_edges() {
    let px = vec![
        1, 1, 1, 255, 2, 2, 2, 255, //
        3, 3, 3, 255, 4, 4, 4, 255,
    ];
    let tex = Texture::from_premul_rgba8("t", 2, 2, px).unwrap();
    assert_eq!(tex.texel_clamped(-5, -5), [1, 1, 1, 255]);
    assert_eq!(tex.texel_clamped(9, 0), [2, 2, 2, 255]);
    assert_eq!(tex.texel_clamped(1, 9), [4, 4, 4, 255]);
}

use super::*;

fn frame() -> Frame {
    Frame {
        width: 2,
        height: 1,
        data: vec![64, 0, 0, 128, 0, 0, 255, 255],
        premultiplied: true,
    }
}

#[test]
fn into_straight_divides_by_alpha_once() {
    let f = frame().into_straight();
    assert!(!f.premultiplied);
    assert_eq!(f.data, vec![128, 0, 0, 128, 0, 0, 255, 255]);
    let again = f.clone().into_straight();
    assert_eq!(again.data, f.data);
}

#[test]
fn mismatched_dimensions_fail_to_convert() {
    let mut f = frame();
    f.width = 3;
    assert!(f.to_rgba_image().is_err());
}

#[test]
fn save_png_round_trips_straight_pixels() {
    let dir = std::env::temp_dir().join(format!("backdrop_frame_{}", std::process::id()));
    let path = dir.join("nested").join("out.png");
    frame().save_png(&path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [128, 0, 0, 128]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 255, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}

use super::*;

fn approx(a: &ColorMatrix, b: &ColorMatrix) -> bool {
    a.0.iter().zip(b.0.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
}

#[test]
fn identity_leaves_pixels_unchanged() {
    let mut buf = vec![10, 20, 30, 40, 255, 128, 0, 255, 0, 0, 0, 0];
    let before = buf.clone();
    ColorMatrix::IDENTITY.apply_rgba8_premul(&mut buf);
    assert_eq!(buf, before);
}

#[test]
fn contrast_pivots_around_mid_gray() {
    let m = ColorMatrix::brightness_contrast(1.0, 2.0);
    let mut buf = vec![255, 0, 128, 255];
    m.apply_rgba8_premul(&mut buf);
    // 1.0 -> 1.5 clamps, 0.0 -> -0.5 clamps, 128/255 stays near 0.5.
    assert_eq!(buf[0], 255);
    assert_eq!(buf[1], 0);
    assert!((i32::from(buf[2]) - 129).abs() <= 1);
    assert_eq!(buf[3], 255);
}

#[test]
fn unit_brightness_and_contrast_is_identity() {
    assert!(approx(
        &ColorMatrix::brightness_contrast(1.0, 1.0),
        &ColorMatrix::IDENTITY
    ));
}

#[test]
fn saturation_zero_is_grayscale_and_one_is_identity() {
    assert!(approx(&ColorMatrix::saturation(1.0), &ColorMatrix::IDENTITY));

    let mut buf = vec![255, 0, 0, 255];
    ColorMatrix::saturation(0.0).apply_rgba8_premul(&mut buf);
    assert_eq!(buf[0], buf[1]);
    assert_eq!(buf[1], buf[2]);
    assert_eq!(buf[0], 76);
}

#[test]
fn saturation_keeps_gray_gray() {
    let mut buf = vec![100, 100, 100, 255];
    ColorMatrix::saturation(4.0).apply_rgba8_premul(&mut buf);
    for c in &buf[..3] {
        assert!((i32::from(*c) - 100).abs() <= 1);
    }
}

#[test]
fn tint_multiplies_channels() {
    let mut buf = vec![255, 255, 255, 255];
    ColorMatrix::tint(Rgb8(255, 217, 179)).apply_rgba8_premul(&mut buf);
    assert_eq!(buf, vec![255, 217, 179, 255]);
}

#[test]
fn matrix_is_applied_in_straight_alpha() {
    // Half-transparent white stays half-transparent with tinted color scaled by alpha.
    let mut buf = vec![128, 128, 128, 128];
    ColorMatrix::tint(Rgb8(255, 0, 0)).apply_rgba8_premul(&mut buf);
    assert_eq!(buf, vec![128, 0, 0, 128]);
}

use super::*;

fn approx(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn centered_sprite_maps_uv_center_to_position() {
    let s = Sprite::centered(TextureId(0), Point::new(100.0, 50.0), 40.0);
    let xf = s.to_screen();
    assert!(approx(xf * Point::new(0.5, 0.5), Point::new(100.0, 50.0)));
    assert!(approx(xf * Point::new(0.0, 0.0), Point::new(80.0, 30.0)));
    assert!(approx(xf * Point::new(1.0, 1.0), Point::new(120.0, 70.0)));
}

#[test]
fn rotation_turns_around_anchor() {
    let mut s = Sprite::centered(TextureId(0), Point::new(0.0, 0.0), 2.0);
    s.rotation = std::f64::consts::FRAC_PI_2;
    let p = s.to_screen() * Point::new(1.0, 0.5);
    assert!(approx(p, Point::new(0.0, 1.0)));
}

#[test]
fn rebound_keeps_geometry_and_hides() {
    let mut s = Sprite::centered(TextureId(0), Point::new(3.0, 4.0), 10.0);
    s.rotation = 1.25;
    let o = s.rebound(TextureId(7));
    assert_eq!(o.position, s.position);
    assert_eq!(o.rotation, s.rotation);
    assert_eq!(o.size, s.size);
    assert_eq!(o.anchor, s.anchor);
    assert_eq!(o.alpha, 0.0);
    assert_eq!(o.texture, TextureId(7));
}

use super::*;

fn viewport() -> Viewport {
    Viewport::new(1000.0, 800.0).unwrap()
}

#[test]
fn initial_layout_sizes_and_positions() {
    let set = LayerSet::layout(viewport(), TextureId(3));

    let base = set.sprite(LayerRole::Base);
    assert_eq!(base.size, 1250.0);
    assert_eq!(base.position, Point::new(500.0, 400.0));

    let secondary = set.sprite(LayerRole::Secondary);
    assert_eq!(secondary.size, 800.0);
    assert_eq!(secondary.position, Point::new(400.0, 320.0));

    assert_eq!(set.sprite(LayerRole::OrbitA).size, 500.0);
    assert_eq!(set.sprite(LayerRole::OrbitB).size, 250.0);
    assert_eq!(set.sprite(LayerRole::OrbitB).position, Point::new(500.0, 400.0));

    for s in set.sprites() {
        assert_eq!(s.anchor, Vec2::new(0.5, 0.5));
        assert_eq!(s.alpha, 1.0);
        assert_eq!(s.texture, TextureId(3));
    }
}

#[test]
fn update_applies_per_role_spin() {
    let mut set = LayerSet::layout(viewport(), TextureId(0));
    let n = 1.5;
    set.update(n, viewport());
    assert!((set.sprite(LayerRole::Base).rotation - 0.003 * n).abs() < 1e-12);
    assert!((set.sprite(LayerRole::Secondary).rotation + 0.008 * n).abs() < 1e-12);
    assert!((set.sprite(LayerRole::OrbitA).rotation + 0.006 * n).abs() < 1e-12);
    assert!((set.sprite(LayerRole::OrbitB).rotation - 0.004 * n).abs() < 1e-12);
    // Secondary never translates.
    assert_eq!(
        set.sprite(LayerRole::Secondary).position,
        Point::new(400.0, 320.0)
    );
}

#[test]
fn orbit_b_at_zero_rotation_sits_at_offset_plus_radius() {
    let mut set = LayerSet::layout(viewport(), TextureId(0));
    set.update(0.0, viewport());
    // center (500, 400) + offset (50, 50) + (width / 4, 0)
    assert_eq!(set.sprite(LayerRole::OrbitB).position, Point::new(800.0, 450.0));
    assert_eq!(set.sprite(LayerRole::OrbitA).position, Point::new(750.0, 400.0));
}

#[test]
fn orbit_a_follows_three_quarter_phase() {
    let mut set = LayerSet::layout(viewport(), TextureId(0));
    for _ in 0..40 {
        set.update(1.0, viewport());
    }
    let a = set.sprite(LayerRole::OrbitA);
    let phase = a.rotation * 0.75;
    let expect = Point::new(500.0 + 250.0 * phase.cos(), 400.0 + 250.0 * phase.sin());
    assert!((a.position - expect).hypot() < 1e-9);
}

#[test]
fn motion_is_deterministic() {
    let mut a = LayerSet::layout(viewport(), TextureId(0));
    let mut b = LayerSet::layout(viewport(), TextureId(0));
    for _ in 0..100 {
        a.update(1.125, viewport());
        b.update(1.125, viewport());
    }
    assert_eq!(a, b);
}

#[test]
fn rebound_mirrors_geometry() {
    let mut set = LayerSet::layout(viewport(), TextureId(0));
    set.update(2.0, viewport());
    let overlay = set.rebound(TextureId(1));
    assert_eq!(overlay.texture(), TextureId(1));
    assert_eq!(overlay.alpha(), 0.0);
    for (a, b) in set.sprites().iter().zip(overlay.sprites()) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.rotation, b.rotation);
        assert_eq!(a.size, b.size);
    }
}

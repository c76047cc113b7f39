use super::*;
use crate::assets::texture::{Texture, TextureId, TextureSet};
use crate::config::BackdropConfig;
use crate::foundation::core::{Rect, Viewport};

fn backdrop() -> Backdrop {
    let viewport = Viewport::new(1000.0, 800.0).unwrap();
    let textures = (0..3)
        .map(|i| {
            Texture::from_premul_rgba8(format!("t{i}.png"), 1, 1, vec![0, 0, 0, 255]).unwrap()
        })
        .collect();
    let anchors = (0..3u32)
        .map(|i| {
            let cy = 400.0 + 1000.0 * f64::from(i);
            Rect::new(450.0, cy - 50.0, 550.0, cy + 50.0)
        })
        .collect();
    Backdrop::new(
        &BackdropConfig::default(),
        viewport,
        1.0,
        TextureSet::new(textures).unwrap(),
        anchors,
    )
    .unwrap()
}

fn scroll(at_ms: f64, y: f64) -> ScrollEventDef {
    ScrollEventDef { at_ms, x: 0.0, y }
}

#[test]
fn run_until_steps_whole_refresh_intervals() {
    let mut host = Host::new(backdrop(), 60.0, &[]).unwrap();
    host.run_until(1000.0);
    assert!((host.now_ms() - 1000.0).abs() < 1e-6);
    host.run_until(1010.0);
    assert!((host.now_ms() - 1000.0).abs() < 1e-6);
}

#[test]
fn scroll_event_is_dispatched_before_its_frame() {
    let mut host = Host::new(backdrop(), 60.0, &[scroll(505.0, 1000.0)]).unwrap();
    host.run_until(490.0);
    assert!(!host.backdrop().crossfade().is_active());

    host.run_until(530.0);
    assert_eq!(host.backdrop().crossfade().target(), Some(TextureId(1)));
    let elapsed = match host.backdrop().crossfade().state() {
        crate::scene::crossfade::CrossfadeState::Active(tr) => tr.elapsed_ms(),
        crate::scene::crossfade::CrossfadeState::Idle => panic!("expected an active crossfade"),
    };
    assert!(elapsed > 0.0);
}

#[test]
fn out_of_order_script_is_replayed_in_time_order() {
    let events = [scroll(1200.0, 2000.0), scroll(100.0, 1000.0)];
    let mut host = Host::new(backdrop(), 60.0, &events).unwrap();
    host.run_until(200.0);
    assert_eq!(host.backdrop().crossfade().target(), Some(TextureId(1)));

    host.run_until(6000.0);
    let b = host.into_backdrop();
    // The second request arrived mid-fade and was dropped.
    assert_eq!(b.layers().texture(), TextureId(1));
    assert!(!b.crossfade().is_active());
}

#[test]
fn full_fade_completes_on_schedule() {
    let mut host = Host::new(backdrop(), 60.0, &[scroll(0.0, 1000.0)]).unwrap();
    host.run_until(4950.0);
    assert!(host.backdrop().crossfade().is_active());
    host.run_until(5050.0);
    assert!(!host.backdrop().crossfade().is_active());
    assert_eq!(host.backdrop().layers().texture(), TextureId(1));
}

#[test]
fn invalid_refresh_rate_is_rejected() {
    assert!(Host::new(backdrop(), 0.0, &[]).is_err());
    assert!(Host::new(backdrop(), f64::NAN, &[]).is_err());
}

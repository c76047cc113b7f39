use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn smoothstep_hits_endpoints_and_midpoint() {
    assert_eq!(smoothstep01(0.0), 0.0);
    assert_eq!(smoothstep01(1.0), 1.0);
    assert_eq!(smoothstep01(0.5), 0.5);
    assert_eq!(smoothstep01(-3.0), 0.0);
    assert_eq!(smoothstep01(7.0), 1.0);
}

#[test]
fn rgba8_len_detects_overflow() {
    assert_eq!(rgba8_len(2, 3), Some(24));
    assert_eq!(rgba8_len(0, 3), Some(0));
    assert_eq!(rgba8_len(u32::MAX, u32::MAX), None);
}

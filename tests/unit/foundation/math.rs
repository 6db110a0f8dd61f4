use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"glass");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_bytes(b"gl");
    b.write_bytes(b"ass");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn fnv_distinguishes_dimensions() {
    let mut a = Fnv1a64::new_default();
    a.write_u32(4);
    a.write_u32(8);
    let mut b = Fnv1a64::new_default();
    b.write_u32(8);
    b.write_u32(4);
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn smoothstep_clamps_and_hits_endpoints() {
    assert_eq!(smoothstep(0.0, 1.0, -3.0), 0.0);
    assert_eq!(smoothstep(0.0, 1.0, 0.0), 0.0);
    assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
    assert_eq!(smoothstep(0.0, 1.0, 1.0), 1.0);
    assert_eq!(smoothstep(0.0, 1.0, 7.0), 1.0);
}

#[test]
fn smoothstep_reversed_edges_fall() {
    assert_eq!(smoothstep(4.0, 0.0, -1.0), 1.0);
    assert_eq!(smoothstep(4.0, 0.0, 4.0), 0.0);
    assert!(smoothstep(4.0, 0.0, 1.0) > smoothstep(4.0, 0.0, 3.0));
}

#[test]
fn smoothstep_degenerate_span_is_a_step() {
    assert_eq!(smoothstep(2.0, 2.0, 1.9), 0.0);
    assert_eq!(smoothstep(2.0, 2.0, 2.0), 1.0);
}

#[test]
fn clamp_byte_saturates() {
    assert_eq!(clamp_byte(-4.0), 0);
    assert_eq!(clamp_byte(127.5), 128);
    assert_eq!(clamp_byte(300.0), 255);
    assert_eq!(clamp_byte(f64::NAN), 0);
}

#[test]
fn css_numbers_trim_trailing_zeros() {
    assert_eq!(fmt_css_number(9.0), "9");
    assert_eq!(fmt_css_number(0.175), "0.175");
    assert_eq!(fmt_css_number(0.35), "0.35");
    assert_eq!(fmt_css_number(-0.0001), "0");
}

use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"finger");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_u8(b'f');
    b.write_bytes(b"inger");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn fnv_str_is_length_prefixed() {
    let mut a = Fnv1a64::new_default();
    a.write_str("ab");
    a.write_str("c");
    let mut b = Fnv1a64::new_default();
    b.write_str("a");
    b.write_str("bc");
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn rng_below_stays_in_bounds() {
    let mut rng = Rng64::new(7);
    for _ in 0..1000 {
        assert!(rng.below(4) < 4);
        let x = rng.next_f64_01();
        assert!((0.0..1.0).contains(&x));
    }
    assert_eq!(rng.below(0), 0);
}

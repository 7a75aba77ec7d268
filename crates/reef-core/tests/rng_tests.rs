use reef_core::rng::{SeededRng, TextureRng};

#[test]
fn same_seed_produces_identical_streams() {
    for seed in [0u32, 1, 42, 99_998, u32::MAX] {
        let mut a = SeededRng::new(seed);
        let mut b = SeededRng::new(seed);
        for i in 0..1000 {
            assert_eq!(a.next_u32(), b.next_u32(), "diverged at draw {i} seed {seed}");
        }
    }
}

#[test]
fn different_seeds_diverge() {
    let mut a = SeededRng::new(1);
    let mut b = SeededRng::new(2);
    let same = (0..100).filter(|_| a.next_u32() == b.next_u32()).count();
    assert!(same < 5, "streams with different seeds look identical");
}

#[test]
fn next_f32_stays_in_unit_interval() {
    let mut rng = SeededRng::new(7);
    for _ in 0..10_000 {
        let v = rng.next_f32();
        assert!((0.0..1.0).contains(&v), "draw out of range: {v}");
    }
}

#[test]
fn next_range_respects_bounds() {
    let mut rng = SeededRng::new(13);
    for _ in 0..1000 {
        let v = rng.next_range(-2.5, 4.0);
        assert!((-2.5..4.0).contains(&v));
    }
}

#[test]
fn next_index_never_exceeds_len() {
    let mut rng = SeededRng::new(99);
    for n in 1..20usize {
        for _ in 0..200 {
            assert!(rng.next_index(n) < n);
        }
    }
}

#[test]
fn next_seed_fits_instance_seed_range() {
    let mut rng = SeededRng::new(42);
    for _ in 0..1000 {
        assert!(rng.next_seed() < 99_999);
    }
}

#[test]
fn texture_rng_is_deterministic() {
    let mut a = TextureRng::new(42);
    let mut b = TextureRng::new(42);
    for _ in 0..500 {
        assert_eq!(a.next_f32().to_bits(), b.next_f32().to_bits());
    }
    for _ in 0..500 {
        let v = a.next_f32();
        assert!((0.0..1.0).contains(&v));
    }
}

use super::*;

#[test]
fn rng_is_deterministic_per_seed() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
    let mut c = Rng64::new(124);
    assert_ne!(Rng64::new(123).next_u64(), c.next_u64());
}

#[test]
fn unit_samples_stay_in_half_open_interval() {
    let mut rng = Rng64::new(7);
    for _ in 0..10_000 {
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn angle_maps_the_unit_sample() {
    let mut s = ScriptedRandom::new([0.25]);
    assert!((s.angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    assert_eq!(s.drawn(), 1);
}

#[test]
fn scripted_cycles_and_clamps() {
    let mut s = ScriptedRandom::new([0.1, 1.0, -3.0]);
    assert_eq!(s.next_f64(), 0.1);
    assert!(s.next_f64() < 1.0);
    assert_eq!(s.next_f64(), 0.0);
    assert_eq!(s.next_f64(), 0.1);

    let mut empty = ScriptedRandom::default();
    assert_eq!(empty.next_f64(), 0.0);
}

#[test]
fn mutable_reference_is_a_source() {
    fn draw(mut rng: impl RandomSource) -> f64 {
        rng.next_f64()
    }
    let mut s = ScriptedRandom::new([0.75]);
    assert_eq!(draw(&mut s), 0.75);
    assert_eq!(s.drawn(), 1);
}

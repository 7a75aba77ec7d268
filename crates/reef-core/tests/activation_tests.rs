use rand::rngs::SmallRng;
use rand::SeedableRng;
use reef_core::activation::{ActivationController, GroundEffect, DORMANT_THRESHOLD};
use reef_core::sections::{is_effect_bearing, SECTIONS};

const DT: f32 = 1.0 / 60.0;

fn make_effect() -> GroundEffect {
    let mut rng = SmallRng::seed_from_u64(7);
    GroundEffect::new(&SECTIONS[0], &mut rng)
}

#[test]
fn progress_converges_up_then_back_down() {
    let mut effect = make_effect();
    let mut t = 0.0;
    for _ in 0..600 {
        effect.update(true, t, DT);
        t += DT;
    }
    assert!(
        (effect.progress - 1.0).abs() < 1e-2,
        "did not converge up: {}",
        effect.progress
    );

    for _ in 0..600 {
        effect.update(false, t, DT);
        t += DT;
    }
    assert!(
        effect.progress < 1e-2,
        "did not converge down: {}",
        effect.progress
    );
}

#[test]
fn dormant_effect_hides_all_sprites() {
    let mut effect = make_effect();
    effect.update(false, 0.0, DT);
    assert!(effect.progress < DORMANT_THRESHOLD);
    for s in effect.bubble_states.iter().chain(effect.dust_states.iter()) {
        assert!(!s.visible);
    }
}

#[test]
fn dust_appears_after_progress_threshold() {
    let mut effect = make_effect();
    let mut t = 0.0;
    // a few frames in, progress is still below the dust threshold
    for _ in 0..2 {
        effect.update(true, t, DT);
        t += DT;
    }
    assert!(effect.progress < 0.15);
    assert!(effect.dust_states.iter().all(|s| !s.visible));

    for _ in 0..300 {
        effect.update(true, t, DT);
        t += DT;
    }
    assert!(effect.dust_states.iter().all(|s| s.visible));
    for s in &effect.dust_states {
        assert!(s.opacity <= 0.35 + 1e-5);
    }
}

#[test]
fn bubble_opacity_stays_bounded() {
    let mut effect = make_effect();
    let mut t = 0.0;
    for _ in 0..1000 {
        effect.update(true, t, DT);
        t += DT;
        for s in &effect.bubble_states {
            assert!(s.opacity >= 0.0 && s.opacity <= 0.7 + 1e-5);
        }
    }
}

#[test]
fn anchor_drops_to_seabed_behind_the_section() {
    let effect = make_effect();
    assert_eq!(effect.anchor.x, SECTIONS[0].position.x);
    assert_eq!(effect.anchor.y, -2.0);
    assert_eq!(effect.anchor.z, SECTIONS[0].position.z - 12.0);
}

#[test]
fn controller_drives_only_effect_bearing_sections() {
    let mut rng = SmallRng::seed_from_u64(1);
    let controller = ActivationController::new(&mut rng);
    let expected = SECTIONS.iter().filter(|s| is_effect_bearing(s.id)).count();
    assert_eq!(controller.effects().count(), expected);
}

#[test]
fn only_the_active_section_ramps_up() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut controller = ActivationController::new(&mut rng);
    let mut t = 0.0;
    for _ in 0..300 {
        controller.update(0, t, DT);
        t += DT;
    }
    let progresses: Vec<f32> = controller.effects().map(|e| e.progress).collect();
    assert!(progresses[0] > 0.9, "active section stalled at {}", progresses[0]);
    for (i, p) in progresses.iter().enumerate().skip(1) {
        assert!(*p < 0.05, "inactive effect {i} ramped to {p}");
    }
}

use glam::Vec3;
use reef_core::camera::{
    display_pose, view_matrix, CameraPose, Ease, SectionRig, RIG_LOOK_DROP, SETTLE_DURATION,
    SWEEP_DURATION,
};
use reef_core::sections::SECTIONS;
use reef_core::timeline::{self, TIMELINE_DURATION};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn ease_curves_hit_their_endpoints() {
    for ease in [Ease::QuadIn, Ease::QuadOut, Ease::QuadInOut, Ease::CubicInOut] {
        assert!(approx(ease.apply(0.0), 0.0), "{ease:?} start");
        assert!(approx(ease.apply(1.0), 1.0), "{ease:?} end");
        assert!(approx(ease.apply(-1.0), 0.0), "{ease:?} clamps below");
        assert!(approx(ease.apply(2.0), 1.0), "{ease:?} clamps above");
    }
}

#[test]
fn timeline_evaluation_is_pure() {
    for p in [0.0, 0.1, 0.33, 0.5, 0.77, 1.0] {
        let a = timeline::evaluate_progress(p);
        let b = timeline::evaluate_progress(p);
        assert_eq!(a, b, "progress {p} not idempotent");
    }
}

#[test]
fn timeline_endpoints_match_first_and_last_keyframes() {
    let start = timeline::evaluate_progress(0.0);
    assert_eq!(start.position, Vec3::new(0.0, 3.5, 0.0));
    assert!(approx(start.yaw, 0.0));

    let end = timeline::evaluate_progress(1.0);
    assert_eq!(end.position, Vec3::new(0.0, 3.5, -62.0));
    assert!(approx(end.yaw, 0.0));
}

#[test]
fn timeline_holds_between_intro_segments() {
    // 0.7..0.75 is a hold at the first segment's end pose
    let held = timeline::evaluate(0.72);
    assert!(approx(held.position.x, -6.0));
    assert!(approx(held.position.z, -3.0));
    assert!(approx(held.yaw, -0.04));
}

#[test]
fn timeline_z_never_moves_backwards() {
    let mut prev_z = timeline::evaluate(0.0).position.z;
    let steps = 200;
    for i in 1..=steps {
        let t = TIMELINE_DURATION * i as f32 / steps as f32;
        let z = timeline::evaluate(t).position.z;
        assert!(z <= prev_z + 1e-4, "z regressed at t {t}: {prev_z} -> {z}");
        prev_z = z;
    }
}

#[test]
fn scroll_timeline_playhead_chases_target() {
    let mut tl = timeline::ScrollTimeline::new();
    for _ in 0..600 {
        tl.update(1.0, 1.0 / 60.0);
    }
    assert!(tl.playhead() > 0.95, "playhead stalled at {}", tl.playhead());
}

#[test]
fn rig_reaches_requested_section_and_settles() {
    let mut rig = SectionRig::new();
    rig.request_section(1, 0.0);
    assert!(rig.is_moving());

    // mid-sweep the yaw leans into the turn (section 1 is to the right)
    let mid = rig.pose(SWEEP_DURATION / 2.0);
    assert!(mid.yaw > 0.0, "expected positive sweep yaw, got {}", mid.yaw);

    let done = rig.pose(SWEEP_DURATION + SETTLE_DURATION + 0.01);
    assert_eq!(done.position, SECTIONS[1].position);
    assert!(approx(done.yaw, 0.0));
    assert!(!rig.is_moving());
}

#[test]
fn superseding_a_sweep_does_not_snap() {
    let mut rig = SectionRig::new();
    rig.request_section(1, 0.0);
    let at_interrupt = rig.pose(0.7);

    rig.request_section(2, 0.7);
    let resumed = rig.pose(0.7);
    assert_eq!(resumed.position, at_interrupt.position, "position snapped");
    assert!(approx(resumed.yaw, at_interrupt.yaw), "yaw snapped");
    assert_eq!(rig.active_section(), 2);
}

#[test]
fn out_of_range_request_is_ignored() {
    let mut rig = SectionRig::new();
    rig.request_section(SECTIONS.len(), 0.0);
    assert_eq!(rig.active_section(), 0);
    assert!(!rig.is_moving());
}

#[test]
fn display_pose_layers_bob_and_lean() {
    let base = CameraPose::new(Vec3::new(2.0, 3.5, -10.0), 0.1);
    let pose = display_pose(base, 1.25, RIG_LOOK_DROP);
    assert!(approx(pose.lean, 0.04));
    assert!((pose.eye.x - base.position.x).abs() <= 0.1 + 1e-5);
    assert!((pose.eye.y - base.position.y).abs() <= 0.05 + 1e-5);
    assert_eq!(pose.eye.z, base.position.z);
    assert!(approx(pose.look_target.y, base.position.y - RIG_LOOK_DROP));
    assert!(approx(pose.look_target.z, base.position.z - 25.0));

    let view = view_matrix(&pose);
    assert!(view.is_finite());
}

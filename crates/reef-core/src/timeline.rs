//! Continuous drive mode: a fixed cinematic zigzag evaluated from scroll
//! progress. Evaluation is pure; segment start poses are baked into the
//! table, so any progress value can be sampled without replaying history.

use crate::camera::{CameraPose, Ease};
use glam::Vec3;

/// How far below eye level the scroll camera looks.
pub const TIMELINE_LOOK_DROP: f32 = 4.0;

/// Scrub catch-up time: the playhead eases toward the scroll position over
/// this many seconds instead of tracking it rigidly.
pub const SCRUB_LAG_SEC: f32 = 1.2;

pub const CRUISE_HEIGHT: f32 = 3.5;

#[derive(Clone, Copy, Debug)]
struct Segment {
    start: f32,
    duration: f32,
    to_x: f32,
    to_z: f32,
    to_yaw: f32,
    ease: Ease,
}

/// The zigzag path. Each segment starts where the previous one ended; the
/// small hold between the first two is the intro-text handoff.
const SEGMENTS: [Segment; 7] = [
    Segment { start: 0.2, duration: 0.5, to_x: -6.0, to_z: -3.0, to_yaw: -0.04, ease: Ease::QuadIn },
    Segment { start: 0.75, duration: 0.9, to_x: -18.0, to_z: -10.0, to_yaw: -0.12, ease: Ease::QuadInOut },
    Segment { start: 1.65, duration: 1.0, to_x: 20.0, to_z: -22.0, to_yaw: 0.12, ease: Ease::QuadInOut },
    Segment { start: 2.65, duration: 1.0, to_x: -15.0, to_z: -34.0, to_yaw: -0.10, ease: Ease::QuadInOut },
    Segment { start: 3.65, duration: 1.0, to_x: 18.0, to_z: -46.0, to_yaw: 0.11, ease: Ease::QuadInOut },
    Segment { start: 4.65, duration: 1.0, to_x: -12.0, to_z: -54.0, to_yaw: -0.08, ease: Ease::QuadInOut },
    Segment { start: 5.65, duration: 1.0, to_x: 0.0, to_z: -62.0, to_yaw: 0.0, ease: Ease::CubicInOut },
];

/// Total timeline length in timeline units.
pub const TIMELINE_DURATION: f32 = 6.65;

const INITIAL: (f32, f32, f32) = (0.0, 0.0, 0.0); // x, z, yaw

fn pose(x: f32, z: f32, yaw: f32) -> CameraPose {
    CameraPose::new(Vec3::new(x, CRUISE_HEIGHT, z), yaw)
}

/// Sample the base pose at a timeline position. Clamped at both ends;
/// positions inside a hold return the previous segment's end pose.
pub fn evaluate(time: f32) -> CameraPose {
    let (mut fx, mut fz, mut fyaw) = INITIAL;
    for seg in &SEGMENTS {
        if time < seg.start {
            break;
        }
        let t = (time - seg.start) / seg.duration;
        if t >= 1.0 {
            fx = seg.to_x;
            fz = seg.to_z;
            fyaw = seg.to_yaw;
            continue;
        }
        let e = seg.ease.apply(t);
        return pose(
            fx + (seg.to_x - fx) * e,
            fz + (seg.to_z - fz) * e,
            fyaw + (seg.to_yaw - fyaw) * e,
        );
    }
    pose(fx, fz, fyaw)
}

/// Sample from normalized scroll progress in [0, 1].
pub fn evaluate_progress(progress: f32) -> CameraPose {
    evaluate(progress.clamp(0.0, 1.0) * TIMELINE_DURATION)
}

/// Smooths raw scroll progress so the camera glides instead of tracking
/// every scroll tick.
pub struct ScrollTimeline {
    playhead: f32,
}

impl ScrollTimeline {
    pub fn new() -> ScrollTimeline {
        ScrollTimeline { playhead: 0.0 }
    }

    /// Advance the playhead toward the target progress.
    pub fn update(&mut self, target_progress: f32, dt: f32) -> CameraPose {
        let target = target_progress.clamp(0.0, 1.0);
        let rate = (dt / SCRUB_LAG_SEC).min(1.0);
        self.playhead += (target - self.playhead) * rate;
        evaluate_progress(self.playhead)
    }

    pub fn playhead(&self) -> f32 {
        self.playhead
    }
}

impl Default for ScrollTimeline {
    fn default() -> Self {
        ScrollTimeline::new()
    }
}

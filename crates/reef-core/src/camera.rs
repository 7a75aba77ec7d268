//! Camera pose model shared by both drive modes, plus the discrete
//! section-to-section rig.
//!
//! A drive mode produces a base [`CameraPose`] (position + yaw intent); the
//! per-frame breathing bob, look target and drone lean are layered on top by
//! [`display_pose`], so the two modes stay interchangeable.

use crate::sections::SECTIONS;
use glam::{Mat4, Vec3};

/// Easing curves used by the camera animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicInOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::QuadIn => t * t,
            Ease::QuadOut => t * (2.0 - t),
            Ease::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Animated base pose. Yaw here is travel intent, not a final camera angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub yaw: f32,
}

impl CameraPose {
    pub fn new(position: Vec3, yaw: f32) -> CameraPose {
        CameraPose { position, yaw }
    }

    pub fn lerp(self, other: CameraPose, t: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(other.position, t),
            yaw: self.yaw + (other.yaw - self.yaw) * t,
        }
    }
}

/// Fully resolved per-frame camera: eye, look target and the lean applied
/// after the look-at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayPose {
    pub eye: Vec3,
    pub look_target: Vec3,
    pub lean: f32,
}

/// Layer the underwater breathing bob and drone lean on a base pose.
/// `look_drop` is how far below eye level the look target sits.
pub fn display_pose(base: CameraPose, time: f32, look_drop: f32) -> DisplayPose {
    let eye = Vec3::new(
        base.position.x + (time * 0.2).sin() * 0.1,
        base.position.y + (time * 0.35).sin() * 0.05,
        base.position.z,
    );
    // look ahead in the direction of travel, slightly down at the seabed
    let look_x = base.position.x + base.yaw * 25.0 + (time * 0.15).sin() * 0.08;
    let look_target = Vec3::new(look_x, base.position.y - look_drop, base.position.z - 25.0);
    DisplayPose {
        eye,
        look_target,
        lean: base.yaw * 0.4,
    }
}

/// View matrix for a display pose; the lean is a local yaw applied after
/// the look-at.
pub fn view_matrix(pose: &DisplayPose) -> Mat4 {
    Mat4::from_rotation_y(-pose.lean) * Mat4::look_at_rh(pose.eye, pose.look_target, Vec3::Y)
}

// Discrete sweep tuning
pub const SWEEP_DURATION: f32 = 1.4;
pub const SETTLE_DURATION: f32 = 0.35;
pub const SWEEP_YAW: f32 = 0.09;
/// Horizontal distance below which a transition gets no sweep yaw.
pub const SWEEP_YAW_MIN_DX: f32 = 2.0;
/// How far below eye level the discrete rig looks.
pub const RIG_LOOK_DROP: f32 = 3.5;

#[derive(Clone, Copy, Debug)]
enum SweepPhase {
    Idle,
    /// Diagonal sweep to the target with yaw held in the turn direction.
    Sweep { start: f32 },
    /// Position has arrived; yaw eases back to zero.
    Settle { start: f32, from_yaw: f32 },
}

/// Discrete drive mode: one sweep per section change, superseding any
/// in-flight sweep from its current interpolated pose.
pub struct SectionRig {
    active: usize,
    from: CameraPose,
    target: CameraPose,
    phase: SweepPhase,
}

impl SectionRig {
    pub fn new() -> SectionRig {
        let start = CameraPose::new(SECTIONS[0].position, 0.0);
        SectionRig {
            active: 0,
            from: start,
            target: start,
            phase: SweepPhase::Idle,
        }
    }

    pub fn active_section(&self) -> usize {
        self.active
    }

    /// Begin a sweep to a section. Out-of-range indices are ignored. If a
    /// sweep is already running, the new one starts from the current
    /// interpolated pose so the camera never snaps.
    pub fn request_section(&mut self, index: usize, now: f32) {
        if index >= SECTIONS.len() {
            return;
        }
        let current = self.pose(now);
        self.active = index;
        let target = SECTIONS[index].position;
        let dx = target.x - current.position.x;
        let sweep_yaw = if dx > SWEEP_YAW_MIN_DX {
            SWEEP_YAW
        } else if dx < -SWEEP_YAW_MIN_DX {
            -SWEEP_YAW
        } else {
            0.0
        };
        self.from = current;
        self.target = CameraPose::new(target, sweep_yaw);
        self.phase = SweepPhase::Sweep { start: now };
    }

    /// Evaluate the base pose at a time, advancing the phase machine.
    pub fn pose(&mut self, now: f32) -> CameraPose {
        match self.phase {
            SweepPhase::Idle => self.target,
            SweepPhase::Sweep { start } => {
                let t = (now - start) / SWEEP_DURATION;
                if t >= 1.0 {
                    self.phase = SweepPhase::Settle {
                        start: start + SWEEP_DURATION,
                        from_yaw: self.target.yaw,
                    };
                    self.pose(now)
                } else {
                    self.from.lerp(self.target, Ease::CubicInOut.apply(t))
                }
            }
            SweepPhase::Settle { start, from_yaw } => {
                let t = (now - start) / SETTLE_DURATION;
                if t >= 1.0 {
                    self.target.yaw = 0.0;
                    self.phase = SweepPhase::Idle;
                    self.target
                } else {
                    let yaw = from_yaw * (1.0 - Ease::QuadOut.apply(t));
                    CameraPose::new(self.target.position, yaw)
                }
            }
        }
    }

    pub fn is_moving(&self) -> bool {
        !matches!(self.phase, SweepPhase::Idle)
    }
}

impl Default for SectionRig {
    fn default() -> Self {
        SectionRig::new()
    }
}

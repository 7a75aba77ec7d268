//! Section configuration — the single source of truth consumed by
//! navigation, the camera rig, the activation controller and the overlay.
//!
//! LEFT = negative x, RIGHT = positive x; the camera travels diagonally
//! between sections.

use glam::Vec3;

#[derive(Clone, Copy, Debug)]
pub struct SectionDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub position: Vec3,
}

pub const SECTIONS: [SectionDescriptor; 6] = [
    SectionDescriptor {
        id: "introduction",
        label: "Introduction",
        position: Vec3::new(-6.0, 2.0, 0.0),
    },
    SectionDescriptor {
        id: "stacks",
        label: "Stacks",
        position: Vec3::new(6.0, 2.0, -20.0),
    },
    SectionDescriptor {
        id: "projects",
        label: "Projects",
        position: Vec3::new(-6.0, 2.0, -40.0),
    },
    SectionDescriptor {
        id: "github",
        label: "Github",
        position: Vec3::new(6.0, 2.0, -60.0),
    },
    SectionDescriptor {
        id: "social",
        label: "Social",
        position: Vec3::new(-6.0, 2.0, -80.0),
    },
    SectionDescriptor {
        id: "contact",
        label: "Contact",
        position: Vec3::new(6.0, 2.0, -100.0),
    },
];

/// Sections that get the ground-bubble activation effect. Github is excluded;
/// it is handled by its own overlay treatment.
pub const EFFECT_SECTION_IDS: [&str; 5] =
    ["introduction", "stacks", "projects", "social", "contact"];

#[inline]
pub fn is_effect_bearing(id: &str) -> bool {
    EFFECT_SECTION_IDS.contains(&id)
}

pub mod activation;
pub mod ambient;
pub mod camera;
pub mod constants;
pub mod content;
pub mod coral;
pub mod floor;
pub mod layout;
pub mod lighting;
pub mod mesh;
pub mod nav;
pub mod palette;
pub mod readiness;
pub mod rng;
pub mod sections;
pub mod timeline;

pub static REEF_WGSL: &str = include_str!("../shaders/reef.wgsl");

pub use camera::{CameraPose, DisplayPose, SectionRig};
pub use coral::{CoralKind, CoralMesh};
pub use layout::DecorationInstance;
pub use nav::NavController;
pub use rng::SeededRng;
pub use sections::{SectionDescriptor, SECTIONS};

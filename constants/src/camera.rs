/// Vertical field of view shared by all viewport cameras.
pub const VIEWPORT_FOV_DEGREES: f32 = 75.0;

pub const VIEWPORT_NEAR: f32 = 0.1;
pub const VIEWPORT_FAR: f32 = 1000.0;

/// Distance from the origin along +Z for timeline stage cameras.
pub const TIMELINE_CAMERA_DISTANCE: f32 = 4.0;

/// Skill badges are small, so their camera sits closer.
pub const SKILL_CAMERA_DISTANCE: f32 = 2.5;

pub const HERO_CAMERA_DISTANCE: f32 = 5.0;

/// Fallback container size (CSS pixels) used before the page reports a layout.
pub const TIMELINE_CONTAINER_SIZE: (f32, f32) = (600.0, 500.0);
pub const SKILL_CONTAINER_SIZE: (f32, f32) = (150.0, 150.0);

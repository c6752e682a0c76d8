//! Per-frame viewport systems.
//!
//! Idle motion, scroll-driven model rotation, keeping camera regions glued to their
//! page containers, and teardown when the page goes away.

/// Viewport teardown on page unload.
pub mod cleanup;

/// Continuous spin and bob for badges and the hero model.
pub mod idle_motion;

/// Scroll delta to model yaw for timeline viewports.
pub mod scroll_rotation;

/// Container rectangle to camera viewport clipping and activation.
pub mod viewport_tracking;

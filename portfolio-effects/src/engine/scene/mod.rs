//! Viewport scene graphs: cameras, lighting rigs and the models they frame.
//!
//! Every 3D container on the page becomes a viewport with its own camera, render
//! layer and scene root. The registry is the single source of truth for which
//! viewports exist and what they are showing.

/// Side-by-side model offsets and bounding-box helpers.
pub mod layout;

/// Key and fill directional lights plus the shared ambient term.
pub mod lighting;

/// Registry of live viewports and their model load state.
pub mod registry;

/// Procedural wireframe badges for the skills grid.
pub mod skill_badge;

/// Viewport construction: camera, root and rig bound to a page container.
///
/// Also builds every viewport the current page layout asks for once the app is running.
pub mod viewport;

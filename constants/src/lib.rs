//! Design constants shared by the portfolio effects engine.
//!
//! Everything here is immutable at runtime: lighting rig values, camera framing,
//! the per-model placement table, skill badge shapes, scroll tunables and the
//! journey background palette.

/// Perspective camera framing for every viewport kind.
pub mod camera;

/// Lighting rig colours, intensities and directions.
pub mod lighting;

/// Journey section background anchors and the default page colour.
pub mod palette;

/// Declarative per-model placement and the timeline stage model table.
pub mod placement;

/// Scroll, visibility and navigation tunables.
pub mod scroll;

/// Skill badge primitives keyed by `data-skill`.
pub mod skills;

//! Asynchronous glTF model loading for timeline and hero viewports.
//!
//! Requests are tagged with the viewport's load generation; the poller attaches
//! models whose request is still current and discards the rest.

/// Model requests, load polling and scene graph insertion.
pub mod model_loader;

/// Loading progress counters for diagnostics.
pub mod progress;

/// Layer propagation and centroid recentring for spawned glTF scenes.
pub mod recentre;

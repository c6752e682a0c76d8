//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, runtime settings
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the page bridge, viewport building, model loading
/// and scroll effect systems.
pub mod app_setup;

/// Application state machine; leaves `Loading` once settings are resolved.
pub mod app_state;

/// Runtime tunables from `effects.json` or an inline page block.
pub mod settings;

/// Platform-specific window configuration for native and WASM builds.
///
/// Binds the transparent overlay canvas on the web and vsync on every target.
pub mod window_config;

//! Bridge between the host page's DOM and the Bevy world.
//!
//! The page is the only source of layout and scroll information, and the only place
//! visual effects outside the 3D canvas end up. Browser callbacks never touch the
//! ECS directly: they push [`web_bridge::PageMessage`]s into a shared queue which is
//! drained once per frame into typed Bevy events. Effects travel the other way as
//! [`dom_writer::DomCommand`]s, queued during the frame and flushed to the DOM at the
//! end of it.
//!
//! ## Message Flow
//!
//! ```text
//! Browser (main thread)                 Bevy frame
//!   scroll / resize ──┐
//!   IntersectionObserver ──┼─> PageMessageQueue ─drain─> ScrollFrameEvent
//!   nav click / pagehide ──┘                             VisibilityEvent
//!                                                        NavClickEvent ...
//!
//!   style / class writes <─flush─ DomWriter <─ scroll + scene systems
//! ```
//!
//! Scroll bursts collapse naturally: the queue keeps only the newest scroll
//! snapshot, so at most one scroll frame is processed per rendered frame.
//!
//! ## Native Builds
//!
//! There is no DOM natively. The queue and writer still exist so every system runs
//! unchanged; the layout is seeded with a demo arrangement of containers and DOM
//! writes are discarded after being logged at trace level.

/// Queued DOM writes and the end-of-frame flush.
pub mod dom_writer;

/// Page geometry snapshots: container rectangles, section bounds, scroll metrics.
pub mod geometry;

/// DOM listener registration (wasm only).
#[cfg(target_arch = "wasm32")]
pub mod listeners;

/// Shared message queue, typed page events and the bridge plugin.
pub mod web_bridge;

use thiserror::Error;

/// Failures while talking to the DOM. None of these are fatal; callers log and move on.
#[derive(Debug, Error)]
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub enum PageBridgeError {
    #[error("browser window is not available")]
    NoWindow,
    #[error("document is not available")]
    NoDocument,
    #[error("no element matches `{0}`")]
    MissingElement(String),
    #[error("DOM call failed: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for PageBridgeError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

use bevy::prelude::*;
use bevy::window::PresentMode;

/// Canvas the page reserves for the effects overlay.
#[cfg(target_arch = "wasm32")]
pub const CANVAS_SELECTOR: &str = "#fx-canvas";

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some(CANVAS_SELECTOR.into()),
            fit_canvas_to_parent: true,
            // Page scrolling and clicks must reach the document.
            prevent_default_event_handling: false,
            transparent: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Portfolio effects".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

/// Transparent over the page; the default page colour natively.
pub fn surface_clear_colour() -> Color {
    #[cfg(target_arch = "wasm32")]
    {
        Color::NONE
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let [r, g, b] = constants::palette::DEFAULT_BACKGROUND;
        Color::srgb_u8(r, g, b)
    }
}

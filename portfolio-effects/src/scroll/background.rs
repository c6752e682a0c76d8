use crate::engine::core::settings::EffectsSettings;
use crate::page::dom_writer::DomWriter;
use crate::page::geometry::SectionBounds;
use crate::page::web_bridge::ScrollFrameEvent;
use bevy::prelude::*;
use constants::palette::{BACKGROUND_CSS_VARIABLE, DEFAULT_BACKGROUND, JOURNEY_ANCHORS};

pub type Rgb = [u8; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundUpdate {
    /// Inside the journey window.
    Interpolated(Rgb),
    /// Above the window: back to the page default.
    Reset,
    /// Below the window: keep whatever was last written.
    Unchanged,
}

pub fn interpolate_colour(from: Rgb, to: Rgb, factor: f32) -> Rgb {
    std::array::from_fn(|i| {
        let (a, b) = (from[i] as f32, to[i] as f32);
        (a + factor * (b - a)).round().clamp(0.0, 255.0) as u8
    })
}

/// Colour at `progress` (0 to 1) along evenly spaced `anchors`.
pub fn journey_colour(progress: f32, anchors: &[Rgb]) -> Rgb {
    let Some(last) = anchors.len().checked_sub(1) else {
        return DEFAULT_BACKGROUND;
    };
    let index = progress.clamp(0.0, 1.0) * last as f32;
    let current = (index.floor() as usize).min(last);
    let next = (current + 1).min(last);
    interpolate_colour(anchors[current], anchors[next], index - current as f32)
}

/// Background for the journey section at `scroll_y`, with `margin` pixels of lead-in
/// above and run-out below.
pub fn journey_background(
    scroll_y: f32,
    journey: &SectionBounds,
    margin: f32,
    anchors: &[Rgb],
) -> BackgroundUpdate {
    let window_top = journey.top - margin;
    if scroll_y < window_top {
        return BackgroundUpdate::Reset;
    }
    if scroll_y > journey.bottom() + margin {
        return BackgroundUpdate::Unchanged;
    }
    let progress = ((scroll_y - window_top) / (journey.height + 2.0 * margin)).clamp(0.0, 1.0);
    BackgroundUpdate::Interpolated(journey_colour(progress, anchors))
}

pub fn css_rgb([r, g, b]: Rgb) -> String {
    format!("rgb({r}, {g}, {b})")
}

pub fn css_hex([r, g, b]: Rgb) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

pub fn update_journey_background(
    mut events: EventReader<ScrollFrameEvent>,
    settings: Res<EffectsSettings>,
    mut writer: ResMut<DomWriter>,
) {
    let Some(ScrollFrameEvent(snapshot)) = events.read().last() else {
        return;
    };
    // Pages without a timeline keep their background.
    let Some(journey) = snapshot.journey.as_ref() else {
        return;
    };

    match journey_background(
        snapshot.scroll_y,
        journey,
        settings.journey_margin_px,
        &JOURNEY_ANCHORS,
    ) {
        BackgroundUpdate::Interpolated(colour) => {
            writer.set_css_variable(BACKGROUND_CSS_VARIABLE, css_rgb(colour));
        }
        BackgroundUpdate::Reset => {
            writer.set_css_variable(BACKGROUND_CSS_VARIABLE, css_hex(DEFAULT_BACKGROUND));
        }
        BackgroundUpdate::Unchanged => {}
    }
}

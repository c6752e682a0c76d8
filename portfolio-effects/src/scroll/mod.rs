//! Scroll-driven page effects.
//!
//! Everything here reacts to page events from the bridge and answers with DOM writes:
//! visibility fades, hero parallax, the progress bar, nav link highlighting, the
//! journey background colour and expiry of `animate-*` pulses started through
//! [`pulse::PulseTimers::trigger_animation`]. Scroll deltas are also forwarded to the
//! 3D viewports as [`ScrollRotationEvent`]s.

/// Journey section background colour interpolation.
pub mod background;

/// Nav link highlighting with click pinning.
pub mod nav_highlight;

/// Hero parallax, progress bar and scroll delta tracking.
pub mod parallax;

/// Timed `animate-*` class pulses.
pub mod pulse;

/// Per-role reactions to visibility ratio changes.
pub mod visibility;

use crate::engine::core::app_state::AppState;
use crate::engine::systems::scroll_rotation::ScrollRotationEvent;
use bevy::prelude::*;
use nav_highlight::NavHighlight;
use parallax::ScrollState;
use pulse::PulseTimers;

pub struct ScrollEffectsPlugin;

impl Plugin for ScrollEffectsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScrollState>()
            .init_resource::<NavHighlight>()
            .init_resource::<PulseTimers>()
            .add_event::<ScrollRotationEvent>()
            .add_systems(OnEnter(AppState::Running), parallax::install_page_chrome)
            // Page events can arrive while settings are still loading; handle them
            // straight away so none are lost.
            .add_systems(
                Update,
                (
                    visibility::apply_visibility_effects,
                    parallax::apply_scroll_effects,
                    nav_highlight::update_nav_highlight,
                    background::update_journey_background,
                    pulse::expire_pulses,
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::core::settings::EffectsSettings;
    use crate::page::dom_writer::{DomCommand, DomWriter};
    use crate::page::web_bridge::{NavClickEvent, ScrollFrameEvent, VisibilityEvent};
    use bevy::state::app::StatesPlugin;
    use constants::scroll::NAV_ACTIVE_CLASS;

    #[test]
    fn nav_click_only_moves_the_active_link() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<AppState>()
            .init_resource::<EffectsSettings>()
            .init_resource::<DomWriter>()
            .add_event::<ScrollFrameEvent>()
            .add_event::<VisibilityEvent>()
            .add_event::<NavClickEvent>()
            .add_plugins(ScrollEffectsPlugin);

        app.world_mut().send_event(NavClickEvent {
            section: "journey".into(),
        });
        app.update();

        let writes = app.world_mut().resource_mut::<DomWriter>().take();
        assert!(writes.iter().any(|command| matches!(
            command,
            DomCommand::SetClass { class, enabled: true, .. } if class == NAV_ACTIVE_CLASS
        )));
        assert!(!writes.iter().any(|command| matches!(
            command,
            DomCommand::SetClass { class, .. } if class.starts_with("animate-")
        )));
        assert!(app.world().resource::<pulse::PulseTimers>().is_empty());
    }
}

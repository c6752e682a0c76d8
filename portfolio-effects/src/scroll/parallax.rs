use crate::engine::core::settings::EffectsSettings;
use crate::engine::systems::scroll_rotation::ScrollRotationEvent;
use crate::page::dom_writer::{DomTarget, DomWriter};
use crate::page::geometry::ScrollSnapshot;
use crate::page::web_bridge::ScrollFrameEvent;
use bevy::prelude::*;
use constants::palette::{PROGRESS_BAR_CLASS, PROGRESS_BAR_STYLE};
use constants::scroll::LOADED_CLASS;

/// Last scroll offset seen, for turning absolute positions into deltas.
#[derive(Resource, Default, Debug)]
pub struct ScrollState {
    last_scroll_y: Option<f32>,
}

impl ScrollState {
    /// Record `scroll_y` and return the distance scrolled since the previous call.
    /// The first call only establishes the baseline.
    pub fn advance(&mut self, scroll_y: f32) -> f32 {
        let delta = self.last_scroll_y.map_or(0.0, |last| scroll_y - last);
        self.last_scroll_y = Some(scroll_y);
        delta
    }
}

/// Share of the scrollable distance covered, 0 to 100.
pub fn progress_percent(snapshot: &ScrollSnapshot) -> f32 {
    let scrollable = snapshot.document_height - snapshot.viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (snapshot.scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

pub fn hero_parallax(scroll_y: f32, rate: f32) -> String {
    format!("translateY({}px)", scroll_y * rate)
}

/// Progress bar and the `loaded` body class.
pub fn install_page_chrome(mut writer: ResMut<DomWriter>) {
    writer.append_div(PROGRESS_BAR_CLASS, PROGRESS_BAR_STYLE);
    writer.set_class(DomTarget::Body, LOADED_CLASS, true);
}

/// One pass per frame: only the newest snapshot matters.
pub fn apply_scroll_effects(
    mut events: EventReader<ScrollFrameEvent>,
    mut state: ResMut<ScrollState>,
    settings: Res<EffectsSettings>,
    mut writer: ResMut<DomWriter>,
    mut rotations: EventWriter<ScrollRotationEvent>,
) {
    let Some(ScrollFrameEvent(snapshot)) = events.read().last() else {
        return;
    };

    writer.set_style(
        DomTarget::Selector(".hero".into()),
        "transform",
        hero_parallax(snapshot.scroll_y, settings.parallax_rate),
    );
    writer.set_style(
        DomTarget::Selector(format!(".{PROGRESS_BAR_CLASS}")),
        "width",
        format!("{}%", progress_percent(snapshot)),
    );

    let delta = state.advance(snapshot.scroll_y);
    if delta != 0.0 {
        rotations.write(ScrollRotationEvent { delta });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::dom_writer::DomCommand;

    fn snapshot(scroll_y: f32) -> ScrollSnapshot {
        ScrollSnapshot {
            scroll_y,
            viewport_height: 800.0,
            document_height: 3000.0,
            ..default()
        }
    }

    #[test]
    fn progress_spans_top_to_bottom() {
        assert_eq!(progress_percent(&snapshot(0.0)), 0.0);
        assert_eq!(progress_percent(&snapshot(1100.0)), 50.0);
        assert_eq!(progress_percent(&snapshot(2200.0)), 100.0);
    }

    #[test]
    fn page_shorter_than_window_has_no_progress() {
        let short = ScrollSnapshot {
            scroll_y: 0.0,
            viewport_height: 800.0,
            document_height: 600.0,
            ..default()
        };
        assert_eq!(progress_percent(&short), 0.0);
    }

    #[test]
    fn hero_moves_up_at_half_speed() {
        assert_eq!(hero_parallax(200.0, -0.5), "translateY(-100px)");
    }

    #[test]
    fn first_scroll_sets_baseline() {
        let mut state = ScrollState::default();
        assert_eq!(state.advance(400.0), 0.0);
        assert_eq!(state.advance(450.0), 50.0);
        assert_eq!(state.advance(420.0), -30.0);
    }

    #[test]
    fn burst_produces_one_rotation_from_newest_snapshot() {
        let mut app = App::new();
        app.add_event::<ScrollFrameEvent>()
            .add_event::<ScrollRotationEvent>()
            .init_resource::<ScrollState>()
            .init_resource::<EffectsSettings>()
            .init_resource::<DomWriter>()
            .add_systems(Update, apply_scroll_effects);

        app.world_mut().resource_mut::<ScrollState>().advance(100.0);
        app.world_mut().send_event(ScrollFrameEvent(snapshot(120.0)));
        app.world_mut().send_event(ScrollFrameEvent(snapshot(160.0)));
        app.update();

        let rotations = app.world().resource::<Events<ScrollRotationEvent>>();
        let deltas: Vec<f32> = rotations.get_cursor().read(rotations).map(|e| e.delta).collect();
        assert_eq!(deltas, vec![60.0]);

        let writes = app.world().resource::<DomWriter>().pending().to_vec();
        assert_eq!(writes.len(), 2);
        assert!(writes.contains(&DomCommand::SetStyle {
            target: DomTarget::Selector(".scroll-progress".into()),
            property: "width",
            value: format!("{}%", 160.0f32 / 2200.0 * 100.0),
        }));
    }
}

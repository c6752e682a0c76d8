use crate::engine::core::settings::EffectsSettings;
use crate::engine::scene::registry::ViewportRegistry;
use bevy::prelude::*;

/// Page scrolled by `delta` CSS pixels since the previous scroll frame.
#[derive(Event, Debug, Clone, Copy)]
pub struct ScrollRotationEvent {
    pub delta: f32,
}

/// Spin every scroll-reactive primary model about its own vertical axis.
pub fn apply_scroll_rotation(
    registry: &ViewportRegistry,
    transforms: &mut Query<&mut Transform>,
    delta: f32,
    factor: f32,
) {
    let angle = delta * factor;
    for model in registry.scroll_reactive_models() {
        if let Ok(mut transform) = transforms.get_mut(model) {
            transform.rotate_local_y(angle);
        }
    }
}

pub fn rotate_models_on_scroll(
    mut events: EventReader<ScrollRotationEvent>,
    registry: Res<ViewportRegistry>,
    settings: Res<EffectsSettings>,
    mut transforms: Query<&mut Transform>,
) {
    let delta: f32 = events.read().map(|e| e.delta).sum();
    if delta.abs() < f32::EPSILON {
        return;
    }
    apply_scroll_rotation(&registry, &mut transforms, delta, settings.scroll_rotation_factor);
}

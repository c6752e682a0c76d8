use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use constants::lighting::{
    AMBIENT_BRIGHTNESS_PER_UNIT, AMBIENT_COLOUR, AMBIENT_INTENSITY, DIRECTIONAL_LUX_PER_UNIT,
    LIGHTING_RIG, LightSpec,
};

/// Marks a light owned by a viewport rig.
#[derive(Component)]
pub struct ViewportLight;

pub fn srgb(colour: [u8; 3]) -> Color {
    let [r, g, b] = colour;
    Color::srgb_u8(r, g, b)
}

/// Ambient light is identical for every viewport, so one global resource serves all.
pub fn ambient_light() -> AmbientLight {
    AmbientLight {
        color: srgb(AMBIENT_COLOUR),
        brightness: AMBIENT_INTENSITY * AMBIENT_BRIGHTNESS_PER_UNIT,
        ..default()
    }
}

pub fn directional_light(spec: &LightSpec) -> (DirectionalLight, Transform) {
    (
        DirectionalLight {
            color: srgb(spec.colour),
            illuminance: spec.intensity * DIRECTIONAL_LUX_PER_UNIT,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(spec.from).looking_at(Vec3::ZERO, Vec3::Y),
    )
}

/// Spawn the key and fill lights plus `extra` on `layer`, parented to `root`.
pub fn spawn_lighting_rig(
    commands: &mut Commands,
    root: Entity,
    layer: usize,
    extra: &[LightSpec],
) -> Vec<Entity> {
    LIGHTING_RIG
        .iter()
        .chain(extra)
        .map(|spec| {
            let (light, transform) = directional_light(spec);
            commands
                .spawn((
                    light,
                    transform,
                    RenderLayers::layer(layer),
                    ViewportLight,
                    ChildOf(root),
                ))
                .id()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_light_points_at_origin() {
        let (light, transform) = directional_light(&LIGHTING_RIG[0]);
        assert_eq!(light.illuminance, 0.8 * DIRECTIONAL_LUX_PER_UNIT);

        let forward = transform.forward();
        let expected = (-Vec3::new(-1.0, 1.0, 1.0)).normalize();
        assert!(forward.dot(expected) > 0.999);
    }
}

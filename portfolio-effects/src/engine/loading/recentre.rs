use crate::engine::loading::model_loader::ViewportScene;
use crate::engine::scene::layout::{bounds_centroid, box_corners};
use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy::render::view::RenderLayers;
use bevy::scene::SceneInstanceReady;

/// Recentre this scene on its bounding-box centroid once it has spawned.
#[derive(Component)]
pub struct RecentreOnReady;

/// Scene spawned; waiting for mesh bounds to become available.
#[derive(Component, Default)]
pub struct NeedsRecentre {
    attempts: u8,
}

const MAX_RECENTRE_ATTEMPTS: u8 = 30;

/// glTF scenes spawn on the default layer. Move every spawned entity onto the
/// viewport's layer so only its own camera sees it.
pub fn on_viewport_scene_ready(
    trigger: Trigger<SceneInstanceReady>,
    scenes: Query<(&RenderLayers, Has<RecentreOnReady>), With<ViewportScene>>,
    children: Query<&Children>,
    mut commands: Commands,
) {
    let scene = trigger.target();
    let Ok((layers, recentre)) = scenes.get(scene) else {
        return;
    };

    for descendant in children.iter_descendants(scene) {
        commands.entity(descendant).insert(layers.clone());
    }

    if recentre {
        commands
            .entity(scene)
            .remove::<RecentreOnReady>()
            .insert(NeedsRecentre::default());
    }
}

/// Offset the scene so the centroid of its meshes sits on the parent's origin; the
/// parent then rotates the model about its visual centre.
pub fn recentre_scenes(
    mut commands: Commands,
    mut scenes: Query<(Entity, &mut Transform, &GlobalTransform, &mut NeedsRecentre)>,
    children: Query<&Children>,
    bounds: Query<(&Aabb, &GlobalTransform)>,
) {
    for (scene, mut transform, scene_global, mut state) in &mut scenes {
        let to_local = scene_global.affine().inverse();
        let corners = children
            .iter_descendants(scene)
            .filter_map(|e| bounds.get(e).ok())
            .flat_map(|(aabb, global)| {
                box_corners(aabb.center.into(), aabb.half_extents.into())
                    .map(|c| to_local.transform_point3(global.transform_point(c)))
            });

        match bounds_centroid(corners) {
            Some(centroid) => {
                transform.translation -= centroid;
                debug!("Recentred scene {:?} by {:?}", scene, -centroid);
                commands.entity(scene).remove::<NeedsRecentre>();
            }
            None => {
                state.attempts += 1;
                if state.attempts >= MAX_RECENTRE_ATTEMPTS {
                    warn!("Scene {:?} has no mesh bounds, leaving it uncentred", scene);
                    commands.entity(scene).remove::<NeedsRecentre>();
                }
            }
        }
    }
}

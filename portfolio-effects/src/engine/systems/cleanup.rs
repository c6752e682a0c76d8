use crate::engine::loading::model_loader::PendingModels;
use crate::engine::scene::registry::ViewportRegistry;
use crate::page::web_bridge::PageUnloadEvent;
use bevy::prelude::*;

/// Despawn every viewport's camera and scene graph and forget in-flight loads.
/// Safe to call any number of times.
pub fn cleanup_viewports(
    commands: &mut Commands,
    registry: &mut ViewportRegistry,
    pending: &mut PendingModels,
) -> usize {
    let viewports = registry.drain();
    let released = viewports.len();
    for (id, record) in viewports {
        if let Ok(mut camera) = commands.get_entity(record.camera) {
            camera.despawn();
        }
        // Lights and models hang below the root.
        if let Ok(mut root) = commands.get_entity(record.root) {
            root.despawn();
        }
        debug!("Released viewport {}", id);
    }
    pending.requests.clear();
    released
}

pub fn cleanup_on_unload(
    mut events: EventReader<PageUnloadEvent>,
    mut commands: Commands,
    mut registry: ResMut<ViewportRegistry>,
    mut pending: ResMut<PendingModels>,
) {
    if events.read().count() == 0 {
        return;
    }
    let released = cleanup_viewports(&mut commands, &mut registry, &mut pending);
    info!("Page unloading, released {} viewports", released);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::viewport::{ViewportCamera, ViewportConfig, create_viewport};
    use crate::page::geometry::{ContainerKey, PageLayout};
    use crate::engine::scene::registry::ViewportId;
    use bevy::ecs::system::RunSystemOnce;

    fn app_with_two_viewports() -> App {
        let mut app = App::new();
        app.init_resource::<ViewportRegistry>()
            .init_resource::<PendingModels>()
            .insert_resource(PageLayout::demo(1280.0, 720.0))
            .add_event::<PageUnloadEvent>()
            .add_systems(Update, cleanup_on_unload);

        app.world_mut()
            .run_system_once(
                |mut commands: Commands, mut registry: ResMut<ViewportRegistry>, layout: Res<PageLayout>| {
                    for stage in 0..2 {
                        create_viewport(
                            &mut commands,
                            &mut registry,
                            &layout,
                            &ContainerKey::TimelineStage(stage),
                            ViewportConfig {
                                id: ViewportId::timeline(stage),
                                camera_distance: 4.0,
                                lit: true,
                                extra_lights: Vec::new(),
                                scroll_reactive: true,
                                idle_motion: None,
                            },
                        );
                    }
                },
            )
            .expect("system runs");
        app
    }

    fn entity_count(app: &mut App) -> usize {
        let world = app.world_mut();
        world.query::<Entity>().iter(world).count()
    }

    #[test]
    fn unload_releases_everything() {
        let mut app = app_with_two_viewports();
        assert_eq!(app.world().resource::<ViewportRegistry>().len(), 2);

        app.world_mut().send_event(PageUnloadEvent);
        app.update();

        assert!(app.world().resource::<ViewportRegistry>().is_empty());
        let world = app.world_mut();
        assert_eq!(world.query::<&ViewportCamera>().iter(world).count(), 0);
        assert_eq!(world.query::<&DirectionalLight>().iter(world).count(), 0);
    }

    #[test]
    fn cleanup_twice_is_harmless() {
        let mut app = app_with_two_viewports();

        let run_cleanup = |app: &mut App| {
            app.world_mut()
                .run_system_once(
                    |mut commands: Commands,
                     mut registry: ResMut<ViewportRegistry>,
                     mut pending: ResMut<PendingModels>| {
                        cleanup_viewports(&mut commands, &mut registry, &mut pending)
                    },
                )
                .expect("system runs")
        };

        assert_eq!(run_cleanup(&mut app), 2);
        let after_first = entity_count(&mut app);
        assert_eq!(run_cleanup(&mut app), 0);
        assert_eq!(entity_count(&mut app), after_first);
    }
}

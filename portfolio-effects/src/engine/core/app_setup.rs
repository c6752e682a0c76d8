use bevy::asset::AssetMetaCheck;
use bevy::pbr::wireframe::{WireframeConfig, WireframePlugin};
use bevy::prelude::*;
use bevy::render::view::VisibilitySystems;
use bevy::transform::TransformSystem;
use bevy_common_assets::json::JsonAssetPlugin;
// Crate engine modules
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::settings::{EffectsSettings, SettingsLoader, start_loading_settings};
use crate::engine::core::window_config::{create_window_config, surface_clear_colour};
use crate::engine::loading::model_loader::{PendingModels, poll_model_loads};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::recentre::{on_viewport_scene_ready, recentre_scenes};
use crate::engine::scene::lighting::ambient_light;
use crate::engine::scene::registry::ViewportRegistry;
use crate::engine::scene::viewport::{ViewportsBuilt, build_page_viewports, spawn_surface_clear_camera};
use crate::engine::systems::{
    cleanup::cleanup_on_unload, idle_motion::apply_idle_motion,
    scroll_rotation::rotate_models_on_scroll, viewport_tracking::track_viewport_containers,
};
// Page bridge and scroll effects
use crate::page::web_bridge::PageBridgePlugin;
use crate::scroll::ScrollEffectsPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers EffectsSettings as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<EffectsSettings>::new(&["json"]))
        .add_plugins(WireframePlugin::default())
        .insert_resource(WireframeConfig {
            global: false,
            default_color: Color::WHITE,
        })
        .add_plugins(PageBridgePlugin)
        .add_plugins(ScrollEffectsPlugin);

    // Initialise resources early
    app.init_resource::<EffectsSettings>()
        .init_resource::<SettingsLoader>()
        .init_resource::<ViewportRegistry>()
        .init_resource::<ViewportsBuilt>()
        .init_resource::<PendingModels>()
        .init_resource::<LoadingProgress>()
        .insert_resource(ClearColor(surface_clear_colour()))
        .insert_resource(ambient_light());

    app.add_observer(on_viewport_scene_ready);

    // State-based system scheduling
    app.add_systems(Startup, (start_loading_settings, spawn_surface_clear_camera))
        .add_systems(
            Update,
            transition_to_running.run_if(in_state(AppState::Loading)),
        );

    let runtime_systems = (
        build_page_viewports,
        poll_model_loads,
        track_viewport_containers,
        rotate_models_on_scroll,
        apply_idle_motion,
        cleanup_on_unload,
    )
        .chain();

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)))
        .add_systems(
            PostUpdate,
            recentre_scenes
                .after(TransformSystem::TransformPropagate)
                .after(VisibilitySystems::CalculateBounds),
        );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

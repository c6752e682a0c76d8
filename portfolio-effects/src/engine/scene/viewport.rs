use crate::engine::core::window_config::surface_clear_colour;
use crate::engine::loading::model_loader::ModelLoader;
use crate::engine::scene::lighting::spawn_lighting_rig;
use crate::engine::scene::registry::{ModelLoadState, ViewportId, ViewportRecord, ViewportRegistry};
use crate::engine::scene::skill_badge::spawn_skill_badge;
use crate::engine::systems::idle_motion::IdleMotion;
use crate::page::geometry::{ContainerInfo, ContainerKey, PageLayout};
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::render::view::RenderLayers;
use constants::camera::{
    HERO_CAMERA_DISTANCE, SKILL_CAMERA_DISTANCE, TIMELINE_CAMERA_DISTANCE, VIEWPORT_FAR,
    VIEWPORT_FOV_DEGREES, VIEWPORT_NEAR,
};
use constants::lighting::LightSpec;
use constants::placement::{HERO_MODEL, models_for_stage, placement_for};
use constants::skills::{HERO_BOB_AMPLITUDE, HERO_BOB_FREQUENCY, HERO_SPIN, badge_for};

/// Per-viewport creation options.
#[derive(Debug, Clone)]
pub struct ViewportConfig {
    pub id: ViewportId,
    pub camera_distance: f32,
    /// Spawn the key/fill lighting rig. Unlit badge viewports skip it.
    pub lit: bool,
    pub extra_lights: Vec<LightSpec>,
    /// Primary model rotates with page scroll.
    pub scroll_reactive: bool,
    pub idle_motion: Option<IdleMotion>,
}

#[derive(Component, Debug, Clone)]
pub struct ViewportCamera {
    pub id: ViewportId,
    pub container: ContainerKey,
}

#[derive(Component, Debug, Clone)]
pub struct ViewportRoot(pub ViewportId);

/// Full-surface camera that clears the canvas once per frame before any viewport draws.
#[derive(Component)]
pub struct SurfaceClearCamera;

pub fn spawn_surface_clear_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Camera {
            order: -1,
            clear_color: ClearColorConfig::Custom(surface_clear_colour()),
            ..default()
        },
        RenderLayers::none(),
        SurfaceClearCamera,
    ));
}

pub fn perspective_for(aspect_ratio: f32) -> PerspectiveProjection {
    PerspectiveProjection {
        fov: VIEWPORT_FOV_DEGREES.to_radians(),
        aspect_ratio,
        near: VIEWPORT_NEAR,
        far: VIEWPORT_FAR,
    }
}

/// Build a viewport over `container`. Returns `None` without side effects when the
/// container is not on this page.
pub fn create_viewport(
    commands: &mut Commands,
    registry: &mut ViewportRegistry,
    layout: &PageLayout,
    container: &ContainerKey,
    config: ViewportConfig,
) -> Option<ViewportId> {
    let Some(info) = layout.resolve(container) else {
        debug!("No container {:?} on this page, skipping {}", container, config.id);
        return None;
    };
    if let Some(existing) = registry.get(&config.id) {
        if existing.container != *container {
            warn!(
                "Viewport {} belongs to {:?}, not {:?}",
                config.id, existing.container, container
            );
            return None;
        }
        debug!("Viewport {} already exists", config.id);
        return Some(config.id);
    }

    let layer = registry.allocate_layer();
    let render_layers = RenderLayers::layer(layer);

    let root = commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            render_layers.clone(),
            ViewportRoot(config.id.clone()),
            Name::new(format!("{}_root", config.id)),
        ))
        .id();

    let camera = commands
        .spawn((
            Camera3d::default(),
            Camera {
                order: layer as isize,
                // The surface clear camera already cleared the canvas.
                clear_color: ClearColorConfig::None,
                // Activated once the container's on-screen region is known.
                is_active: false,
                ..default()
            },
            Projection::Perspective(perspective_for(info.rect.aspect_ratio())),
            Transform::from_xyz(0.0, 0.0, config.camera_distance).looking_at(Vec3::ZERO, Vec3::Y),
            render_layers,
            ViewportCamera {
                id: config.id.clone(),
                container: container.clone(),
            },
            Name::new(format!("{}_camera", config.id)),
        ))
        .id();

    let lights = if config.lit {
        spawn_lighting_rig(commands, root, layer, &config.extra_lights)
    } else {
        Vec::new()
    };

    registry.insert(
        config.id.clone(),
        ViewportRecord {
            container: container.clone(),
            camera,
            root,
            lights,
            layer,
            primary_model: None,
            load_state: ModelLoadState::Empty,
            generation: 0,
            outstanding: 0,
            scroll_reactive: config.scroll_reactive,
            idle_motion: config.idle_motion,
        },
    );

    info!(
        "Viewport {} created on layer {} ({}x{} px)",
        config.id, layer, info.rect.width, info.rect.height
    );
    Some(config.id)
}

/// Set once the page's viewports have been built.
#[derive(Resource, Default)]
pub struct ViewportsBuilt(pub bool);

/// Models a timeline stage shows: the container's `data-model` override, or the
/// stage table entry.
pub fn stage_models(info: &ContainerInfo, stage: usize) -> Vec<&str> {
    match info.model.as_deref() {
        Some(model) if !model.is_empty() => vec![model],
        _ => models_for_stage(stage).to_vec(),
    }
}

/// Hero model: the container's `data-model` override, or the default hero model.
pub fn hero_model(info: &ContainerInfo) -> &str {
    match info.model.as_deref() {
        Some(model) if !model.is_empty() => model,
        _ => HERO_MODEL,
    }
}

/// Build a viewport for every container the page reported and start its content.
pub fn build_page_viewports(
    mut commands: Commands,
    layout: Res<PageLayout>,
    mut built: ResMut<ViewportsBuilt>,
    mut loader: ModelLoader,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if built.0 || layout.is_empty() {
        return;
    }
    built.0 = true;

    for info in layout.sorted() {
        match &info.key {
            ContainerKey::TimelineStage(stage) => {
                let models = stage_models(info, *stage);
                let config = ViewportConfig {
                    id: ViewportId::timeline(*stage),
                    camera_distance: TIMELINE_CAMERA_DISTANCE,
                    lit: true,
                    extra_lights: models
                        .iter()
                        .flat_map(|m| placement_for(m).extra_lights)
                        .copied()
                        .collect(),
                    scroll_reactive: true,
                    idle_motion: None,
                };
                let Some(id) = create_viewport(&mut commands, &mut loader.registry, &layout, &info.key, config)
                else {
                    continue;
                };
                if let Err(e) = loader.load_stage_models(&id, &models) {
                    warn!("{}", e);
                }
            }
            ContainerKey::SkillBadge(index) => {
                let skill = info.skill.as_deref().unwrap_or_default();
                let config = ViewportConfig {
                    id: ViewportId::skill(*index),
                    camera_distance: SKILL_CAMERA_DISTANCE,
                    lit: false,
                    extra_lights: Vec::new(),
                    scroll_reactive: false,
                    idle_motion: None,
                };
                let Some(id) = create_viewport(&mut commands, &mut loader.registry, &layout, &info.key, config)
                else {
                    continue;
                };
                spawn_skill_badge(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    &mut loader.registry,
                    &id,
                    badge_for(skill),
                );
            }
            ContainerKey::Hero if loader.settings.hero_viewport => {
                let model = hero_model(info);
                let placement = placement_for(model);
                let config = ViewportConfig {
                    id: ViewportId::hero(),
                    camera_distance: HERO_CAMERA_DISTANCE,
                    lit: true,
                    extra_lights: placement.extra_lights.to_vec(),
                    scroll_reactive: false,
                    idle_motion: Some(
                        IdleMotion::spin(HERO_SPIN).with_bob(HERO_BOB_AMPLITUDE, HERO_BOB_FREQUENCY, 0.0),
                    ),
                };
                let Some(id) = create_viewport(&mut commands, &mut loader.registry, &layout, &info.key, config)
                else {
                    continue;
                };
                if let Err(e) = loader.load_model(&id, model, placement) {
                    warn!("{}", e);
                }
            }
            ContainerKey::Hero => debug!("Hero viewport disabled"),
        }
    }

    info!("Built {} viewports", loader.registry.len());
}

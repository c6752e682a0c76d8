use crate::engine::core::settings::EffectsSettings;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::recentre::RecentreOnReady;
use crate::engine::scene::layout::even_spacing_offsets;
use crate::engine::scene::registry::{ModelLoadState, ViewportId, ViewportRecord, ViewportRegistry};
use crate::engine::systems::idle_motion::IdleMotion;
use bevy::asset::LoadState;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use constants::placement::{ModelPlacement, placement_for};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("viewport `{0}` does not exist")]
    UnknownViewport(ViewportId),
    #[error("no models requested for viewport `{0}`")]
    NothingRequested(ViewportId),
    #[error("failed to load `{path}`: {reason}")]
    Asset { path: String, reason: String },
}

/// One in-flight model request.
#[derive(Debug, Clone)]
pub struct PendingModel {
    pub viewport: ViewportId,
    pub generation: u32,
    pub path: String,
    pub handle: Handle<Scene>,
    pub placement: ModelPlacement,
    pub offset_x: f32,
    /// Part of a multi-model stage; lands under a shared group pivot.
    pub grouped: bool,
}

#[derive(Resource, Default, Debug)]
pub struct PendingModels {
    pub requests: Vec<PendingModel>,
}

impl PendingModels {
    /// Forget requests superseded by a newer load. Returns the abandoned paths.
    pub fn drop_stale(&mut self, registry: &ViewportRegistry) -> Vec<String> {
        let mut stale = Vec::new();
        self.requests.retain(|request| {
            let current = registry.is_current(&request.viewport, request.generation);
            if !current {
                stale.push(request.path.clone());
            }
            current
        });
        stale
    }
}

/// Pivot grouping the models of one timeline stage.
#[derive(Component)]
pub struct StageGroup;

/// Placement node wrapping one loaded glTF scene.
#[derive(Component, Debug)]
pub struct ModelNode {
    pub path: String,
}

/// Marks the glTF scene instance under a [`ModelNode`].
#[derive(Component)]
pub struct ViewportScene;

/// Everything needed to start a model load.
#[derive(SystemParam)]
pub struct ModelLoader<'w> {
    pub asset_server: Res<'w, AssetServer>,
    pub registry: ResMut<'w, ViewportRegistry>,
    pub pending: ResMut<'w, PendingModels>,
    pub progress: ResMut<'w, LoadingProgress>,
    pub settings: Res<'w, EffectsSettings>,
}

impl ModelLoader<'_> {
    /// Load one model into a viewport, replacing whatever it showed before.
    pub fn load_model(
        &mut self,
        id: &ViewportId,
        model: &str,
        placement: &ModelPlacement,
    ) -> Result<u32, ModelLoadError> {
        self.request(id, &[(model, *placement)], false)
    }

    /// Load every model of a timeline stage side by side, centred on the origin.
    pub fn load_stage_models(&mut self, id: &ViewportId, models: &[&str]) -> Result<u32, ModelLoadError> {
        let requests: Vec<_> = models.iter().map(|m| (*m, *placement_for(m))).collect();
        self.request(id, &requests, requests.len() > 1)
    }

    fn request(
        &mut self,
        id: &ViewportId,
        models: &[(&str, ModelPlacement)],
        grouped: bool,
    ) -> Result<u32, ModelLoadError> {
        if models.is_empty() {
            return Err(ModelLoadError::NothingRequested(id.clone()));
        }
        let generation = self
            .registry
            .begin_load(id, models.len())
            .ok_or_else(|| ModelLoadError::UnknownViewport(id.clone()))?;

        let offsets = if grouped {
            even_spacing_offsets(models.len(), self.settings.stage_model_spacing)
        } else {
            vec![0.0; models.len()]
        };

        for ((model, placement), offset_x) in models.iter().zip(offsets) {
            let path = self.settings.model_path(model);
            info!("Loading {} for {} (scale {})", path, id, placement.scale);
            let handle = self
                .asset_server
                .load(GltfAssetLabel::Scene(0).from_asset(path.clone()));
            self.progress.requested(&path);
            self.pending.requests.push(PendingModel {
                viewport: id.clone(),
                generation,
                path,
                handle,
                placement: *placement,
                offset_x,
                grouped,
            });
        }
        Ok(generation)
    }
}

pub fn placement_transform(placement: &ModelPlacement, offset_x: f32) -> Transform {
    let r = placement.rotation;
    Transform {
        translation: placement.position + Vec3::X * offset_x,
        rotation: Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
        scale: Vec3::splat(placement.scale),
    }
}

/// Insert a loaded model into its viewport's scene graph. The first model of a new
/// request replaces the previous primary model.
pub fn attach_model(commands: &mut Commands, record: &mut ViewportRecord, request: &PendingModel) -> Entity {
    let layers = RenderLayers::layer(record.layer);
    let root = record.root;
    let motion = record.idle_motion;

    if matches!(record.load_state, ModelLoadState::Pending { .. }) {
        if let Some(previous) = record.primary_model.take() {
            commands.entity(previous).despawn();
        }
    }

    let parent = if request.grouped {
        *record.primary_model.get_or_insert_with(|| {
            let mut group = commands.spawn((
                Transform::default(),
                Visibility::default(),
                layers.clone(),
                StageGroup,
                ChildOf(root),
                Name::new(format!("{}_group", request.viewport)),
            ));
            if let Some(motion) = motion {
                group.insert(motion);
            }
            group.id()
        })
    } else {
        root
    };

    let transform = placement_transform(&request.placement, request.offset_x);
    let mut node = commands.spawn((
        transform,
        Visibility::default(),
        layers.clone(),
        ModelNode {
            path: request.path.clone(),
        },
        ChildOf(parent),
        Name::new(request.path.clone()),
    ));
    if let Some(motion) = motion.filter(|_| !request.grouped) {
        node.insert(IdleMotion {
            base_y: transform.translation.y,
            ..motion
        });
    }
    let node = node.id();

    let mut scene = commands.spawn((
        SceneRoot(request.handle.clone()),
        Transform::default(),
        layers,
        ViewportScene,
        ChildOf(node),
    ));
    if request.placement.recentre {
        scene.insert(RecentreOnReady);
    }

    if !request.grouped {
        record.primary_model = Some(node);
    }
    node
}

/// Watch in-flight model loads and attach or report each one as it settles.
pub fn poll_model_loads(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut pending: ResMut<PendingModels>,
    mut registry: ResMut<ViewportRegistry>,
    mut progress: ResMut<LoadingProgress>,
) {
    if pending.requests.is_empty() {
        return;
    }

    for path in pending.drop_stale(&registry) {
        debug!("Discarding superseded load of {}", path);
        progress.abandoned(&path);
    }

    let before = progress.in_flight();
    let mut still_pending = Vec::with_capacity(pending.requests.len());

    for request in std::mem::take(&mut pending.requests) {
        match asset_server.get_load_state(&request.handle) {
            Some(LoadState::Loaded) => {
                if let Some(record) = registry.get_mut(&request.viewport) {
                    attach_model(&mut commands, record, &request);
                }
                registry.complete_load(&request.viewport, request.generation);
                progress.finished(&request.path, true);
                info!("✓ Loaded {} into {}", request.path, request.viewport);
            }
            Some(LoadState::Failed(err)) => {
                let error = ModelLoadError::Asset {
                    path: request.path.clone(),
                    reason: err.to_string(),
                };
                error!("{}; {} stays empty", error, request.viewport);
                registry.fail_load(&request.viewport, request.generation, error.to_string());
                progress.finished(&request.path, false);
                release_failed_viewport(&mut commands, &mut registry, &request.viewport);
            }
            _ => still_pending.push(request),
        }
    }
    pending.requests = still_pending;

    if progress.in_flight() != before {
        info!(
            "Models: {}/{} settled ({:.0}%), {} failed",
            progress.models_loaded + progress.models_failed,
            progress.models_requested,
            progress.percent(),
            progress.models_failed
        );
    }
}

/// A viewport whose whole request failed shows no model at all.
fn release_failed_viewport(commands: &mut Commands, registry: &mut ViewportRegistry, id: &ViewportId) {
    let Some(record) = registry.get_mut(id) else {
        return;
    };
    if matches!(record.load_state, ModelLoadState::Failed(_)) {
        if let Some(previous) = record.primary_model.take() {
            commands.entity(previous).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::viewport::{ViewportConfig, create_viewport};
    use crate::page::geometry::{ContainerInfo, ContainerKey, PageLayout, PageRect};
    use bevy::ecs::system::RunSystemOnce;
    use constants::placement::DEFAULT_PLACEMENT;
    use std::time::Duration;

    fn request(viewport: &ViewportId, generation: u32, grouped: bool, offset_x: f32) -> PendingModel {
        PendingModel {
            viewport: viewport.clone(),
            generation,
            path: "models/work-model.glb".into(),
            handle: Handle::default(),
            placement: *placement_for("work-model.glb"),
            offset_x,
            grouped,
        }
    }

    fn app_with_viewport(id: &ViewportId) -> App {
        let mut app = App::new();
        let root = app.world_mut().spawn(Transform::default()).id();
        let mut registry = ViewportRegistry::default();
        registry.insert(
            id.clone(),
            ViewportRecord {
                container: ContainerKey::TimelineStage(0),
                camera: Entity::PLACEHOLDER,
                root,
                lights: Vec::new(),
                layer: 1,
                primary_model: None,
                load_state: ModelLoadState::Empty,
                generation: 0,
                outstanding: 0,
                scroll_reactive: true,
                idle_motion: None,
            },
        );
        app.insert_resource(registry);
        app
    }

    fn attach(app: &mut App, request: PendingModel) {
        app.world_mut()
            .run_system_once(move |mut commands: Commands, mut registry: ResMut<ViewportRegistry>| {
                let id = request.viewport.clone();
                if let Some(record) = registry.get_mut(&id) {
                    attach_model(&mut commands, record, &request);
                }
                registry.complete_load(&id, request.generation);
            })
            .expect("system runs");
    }

    #[test]
    fn placement_applies_scale_offset_and_tilt() {
        let education = placement_for("education-model.glb");
        let transform = placement_transform(education, -0.6);

        assert_eq!(transform.scale, Vec3::splat(1.2));
        assert!(transform.translation.abs_diff_eq(Vec3::new(-0.6, 0.5, 0.0), 1e-6));
        let (tilt, _, _) = transform.rotation.to_euler(EulerRot::XYZ);
        assert!((tilt - std::f32::consts::FRAC_PI_6).abs() < 1e-5);

        assert_eq!(placement_transform(&DEFAULT_PLACEMENT, 0.0).scale, Vec3::splat(0.8));
    }

    #[test]
    fn stage_models_share_one_group_pivot() {
        let id = ViewportId::timeline(0);
        let mut app = app_with_viewport(&id);
        let generation = app
            .world_mut()
            .resource_mut::<ViewportRegistry>()
            .begin_load(&id, 2)
            .unwrap();

        attach(&mut app, request(&id, generation, true, -0.6));
        attach(&mut app, request(&id, generation, true, 0.6));

        let record = app.world().resource::<ViewportRegistry>().get(&id).unwrap().clone();
        let group = record.primary_model.unwrap();
        assert!(app.world().get::<StageGroup>(group).is_some());
        assert_eq!(record.load_state, ModelLoadState::Loaded);

        let world = app.world_mut();
        let mut xs: Vec<f32> = world
            .query_filtered::<(&Transform, &ChildOf), With<ModelNode>>()
            .iter(world)
            .filter(|(_, parent)| parent.parent() == group)
            .map(|(t, _)| t.translation.x)
            .collect();
        xs.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(xs, vec![-0.6, 0.6]);
    }

    #[test]
    fn newer_request_replaces_previous_model() {
        let id = ViewportId::timeline(1);
        let mut app = app_with_viewport(&id);

        let first = app
            .world_mut()
            .resource_mut::<ViewportRegistry>()
            .begin_load(&id, 1)
            .unwrap();
        attach(&mut app, request(&id, first, false, 0.0));
        let old = app.world().resource::<ViewportRegistry>().get(&id).unwrap().primary_model.unwrap();

        let second = app
            .world_mut()
            .resource_mut::<ViewportRegistry>()
            .begin_load(&id, 1)
            .unwrap();
        attach(&mut app, request(&id, second, false, 0.0));

        let new = app.world().resource::<ViewportRegistry>().get(&id).unwrap().primary_model.unwrap();
        assert_ne!(old, new);
        assert!(app.world().get_entity(old).is_err());
        let world = app.world_mut();
        assert_eq!(world.query::<&ModelNode>().iter(world).count(), 1);
    }

    #[test]
    fn superseded_requests_are_dropped() {
        let id = ViewportId::timeline(2);
        let mut app = app_with_viewport(&id);
        let (first, second) = {
            let mut registry = app.world_mut().resource_mut::<ViewportRegistry>();
            let first = registry.begin_load(&id, 1).unwrap();
            (first, registry.begin_load(&id, 1).unwrap())
        };

        let mut pending = PendingModels::default();
        pending.requests.push(request(&id, first, false, 0.0));
        pending.requests.push(request(&id, second, false, 0.0));

        let stale = pending.drop_stale(app.world().resource::<ViewportRegistry>());
        assert_eq!(stale.len(), 1);
        assert_eq!(pending.requests.len(), 1);
        assert_eq!(pending.requests[0].generation, second);
    }

    fn stage(index: usize) -> ContainerInfo {
        ContainerInfo {
            key: ContainerKey::TimelineStage(index),
            rect: PageRect::new(0.0, index as f32 * 500.0, 600.0, 500.0),
            skill: None,
            model: None,
        }
    }

    /// Two lit timeline viewports with a real asset server behind them.
    fn loading_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Scene>()
            .init_resource::<ViewportRegistry>()
            .init_resource::<PendingModels>()
            .init_resource::<LoadingProgress>()
            .init_resource::<EffectsSettings>()
            .insert_resource(PageLayout::from_containers([stage(0), stage(1)]))
            .add_systems(Update, poll_model_loads);

        app.world_mut()
            .run_system_once(
                |mut commands: Commands, mut registry: ResMut<ViewportRegistry>, layout: Res<PageLayout>| {
                    for index in 0..2 {
                        let config = ViewportConfig {
                            id: ViewportId::timeline(index),
                            camera_distance: 4.0,
                            lit: true,
                            extra_lights: Vec::new(),
                            scroll_reactive: true,
                            idle_motion: None,
                        };
                        create_viewport(&mut commands, &mut registry, &layout, &stage(index).key, config);
                    }
                },
            )
            .expect("system runs");
        app
    }

    #[test]
    fn failed_load_leaves_only_that_viewport_empty() {
        let failing = ViewportId::timeline(0);
        let other = ViewportId::timeline(1);
        let mut app = loading_app();

        // An earlier model that the failed request should take down with it.
        let earlier = app.world_mut().spawn(Transform::default()).id();
        {
            let mut registry = app.world_mut().resource_mut::<ViewportRegistry>();
            let record = registry.get_mut(&failing).unwrap();
            record.primary_model = Some(earlier);
            record.load_state = ModelLoadState::Loaded;
            registry.begin_load(&other, 1).unwrap();
        }

        app.world_mut()
            .run_system_once(move |mut loader: ModelLoader| {
                loader.load_model(&ViewportId::timeline(0), "missing-model.glb", &DEFAULT_PLACEMENT)
            })
            .expect("system runs")
            .unwrap();

        for _ in 0..500 {
            app.update();
            if app.world().resource::<PendingModels>().requests.is_empty() {
                break;
            }
            std::thread::sleep(Duration::from_millis(2));
        }

        let registry = app.world().resource::<ViewportRegistry>();
        let failed = registry.get(&failing).unwrap().clone();
        let untouched = registry.get(&other).unwrap().clone();
        assert!(matches!(failed.load_state, ModelLoadState::Failed(_)), "{:?}", failed.load_state);
        assert_eq!(failed.primary_model, None);
        assert_eq!(failed.lights.len(), 2);
        assert!(app.world().get_entity(earlier).is_err());
        for light in &failed.lights {
            assert!(app.world().get_entity(*light).is_ok());
        }

        assert_eq!(untouched.load_state, ModelLoadState::Pending { generation: 1 });
        assert!(app.world().get::<Camera>(untouched.camera).is_some());
        assert!(app.world().get::<Camera>(failed.camera).is_some());

        let progress = app.world().resource::<LoadingProgress>();
        assert_eq!(progress.models_failed, 1);
        assert_eq!(progress.in_flight(), 0);
    }
}

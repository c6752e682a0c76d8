use crate::engine::systems::idle_motion::IdleMotion;
use crate::page::geometry::ContainerKey;
use bevy::prelude::*;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewportId(pub String);

impl ViewportId {
    pub fn timeline(stage: usize) -> Self {
        Self(format!("timeline-{stage}"))
    }

    /// Keyed by container position, so badges that share a skill stay apart.
    pub fn skill(index: usize) -> Self {
        Self(format!("skill-{index}"))
    }

    pub fn hero() -> Self {
        Self("hero".to_string())
    }
}

impl fmt::Display for ViewportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of the most recent model request for a viewport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModelLoadState {
    #[default]
    Empty,
    Pending { generation: u32 },
    Loaded,
    Failed(String),
}

/// Everything the coordinator owns for one viewport.
#[derive(Debug, Clone)]
pub struct ViewportRecord {
    pub container: ContainerKey,
    pub camera: Entity,
    /// Scene graph root; models, badge meshes and lights hang below it.
    pub root: Entity,
    pub lights: Vec<Entity>,
    pub layer: usize,
    /// Primary model or model group; rotated by scroll.
    pub primary_model: Option<Entity>,
    pub load_state: ModelLoadState,
    /// Bumped on every model request; completions carrying an older value are stale.
    pub generation: u32,
    /// Model requests of the current generation that have not completed yet.
    pub outstanding: usize,
    pub scroll_reactive: bool,
    /// Continuous motion given to each primary model once it loads.
    pub idle_motion: Option<IdleMotion>,
}

/// Public registry of live viewports, keyed by id.
#[derive(Resource, Debug, Default)]
pub struct ViewportRegistry {
    viewports: BTreeMap<ViewportId, ViewportRecord>,
    next_layer: usize,
}

impl ViewportRegistry {
    pub fn get(&self, id: &ViewportId) -> Option<&ViewportRecord> {
        self.viewports.get(id)
    }

    pub fn get_mut(&mut self, id: &ViewportId) -> Option<&mut ViewportRecord> {
        self.viewports.get_mut(id)
    }

    pub fn contains(&self, id: &ViewportId) -> bool {
        self.viewports.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ViewportId, &ViewportRecord)> {
        self.viewports.iter()
    }

    pub fn len(&self) -> usize {
        self.viewports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewports.is_empty()
    }

    /// Render layer 0 is the default layer; each viewport gets its own from 1 upwards.
    pub(crate) fn allocate_layer(&mut self) -> usize {
        self.next_layer += 1;
        self.next_layer
    }

    pub(crate) fn insert(&mut self, id: ViewportId, record: ViewportRecord) {
        self.viewports.insert(id, record);
    }

    pub(crate) fn drain(&mut self) -> Vec<(ViewportId, ViewportRecord)> {
        std::mem::take(&mut self.viewports).into_iter().collect()
    }

    /// Start a new model request of `count` assets. Any request still in flight for
    /// this viewport becomes stale.
    pub fn begin_load(&mut self, id: &ViewportId, count: usize) -> Option<u32> {
        let record = self.viewports.get_mut(id)?;
        record.generation = record.generation.wrapping_add(1);
        record.outstanding = count;
        record.load_state = ModelLoadState::Pending {
            generation: record.generation,
        };
        Some(record.generation)
    }

    pub fn is_current(&self, id: &ViewportId, generation: u32) -> bool {
        self.viewports
            .get(id)
            .is_some_and(|r| r.generation == generation)
    }

    /// Record a successful load of the current generation.
    pub fn complete_load(&mut self, id: &ViewportId, generation: u32) -> bool {
        let Some(record) = self.viewports.get_mut(id) else {
            return false;
        };
        if record.generation != generation {
            return false;
        }
        record.outstanding = record.outstanding.saturating_sub(1);
        record.load_state = ModelLoadState::Loaded;
        true
    }

    /// Record a failed load. The viewport only becomes `Failed` once nothing from the
    /// current request has loaded and nothing is left in flight.
    pub fn fail_load(&mut self, id: &ViewportId, generation: u32, reason: impl Into<String>) -> bool {
        let Some(record) = self.viewports.get_mut(id) else {
            return false;
        };
        if record.generation != generation {
            return false;
        }
        record.outstanding = record.outstanding.saturating_sub(1);
        if record.outstanding == 0 && matches!(record.load_state, ModelLoadState::Pending { .. }) {
            record.load_state = ModelLoadState::Failed(reason.into());
        }
        true
    }

    /// Viewports whose primary model follows page scrolling.
    pub fn scroll_reactive_models(&self) -> impl Iterator<Item = Entity> + '_ {
        self.viewports
            .values()
            .filter(|r| r.scroll_reactive)
            .filter_map(|r| r.primary_model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(scroll_reactive: bool) -> ViewportRecord {
        ViewportRecord {
            container: ContainerKey::TimelineStage(0),
            camera: Entity::PLACEHOLDER,
            root: Entity::PLACEHOLDER,
            lights: Vec::new(),
            layer: 1,
            primary_model: None,
            load_state: ModelLoadState::Empty,
            generation: 0,
            outstanding: 0,
            scroll_reactive,
            idle_motion: None,
        }
    }

    #[test]
    fn newer_request_makes_older_completion_stale() {
        let mut registry = ViewportRegistry::default();
        let id = ViewportId::timeline(0);
        registry.insert(id.clone(), record(true));

        let first = registry.begin_load(&id, 1).unwrap();
        let second = registry.begin_load(&id, 1).unwrap();
        assert_ne!(first, second);
        assert!(!registry.is_current(&id, first));

        assert!(!registry.complete_load(&id, first));
        assert_eq!(
            registry.get(&id).unwrap().load_state,
            ModelLoadState::Pending { generation: second }
        );

        assert!(registry.complete_load(&id, second));
        assert_eq!(registry.get(&id).unwrap().load_state, ModelLoadState::Loaded);
    }

    #[test]
    fn partial_failure_keeps_loaded_state() {
        let mut registry = ViewportRegistry::default();
        let id = ViewportId::timeline(1);
        registry.insert(id.clone(), record(true));

        let generation = registry.begin_load(&id, 2).unwrap();
        registry.complete_load(&id, generation);
        registry.fail_load(&id, generation, "404");

        assert_eq!(registry.get(&id).unwrap().load_state, ModelLoadState::Loaded);
    }

    #[test]
    fn failure_with_nothing_loaded_is_terminal() {
        let mut registry = ViewportRegistry::default();
        let id = ViewportId::timeline(2);
        registry.insert(id.clone(), record(true));

        let generation = registry.begin_load(&id, 1).unwrap();
        registry.fail_load(&id, generation, "missing file");

        assert_eq!(
            registry.get(&id).unwrap().load_state,
            ModelLoadState::Failed("missing file".into())
        );
    }

    #[test]
    fn unknown_viewport_cannot_load() {
        let mut registry = ViewportRegistry::default();
        assert_eq!(registry.begin_load(&ViewportId::hero(), 1), None);
    }

    #[test]
    fn only_reactive_viewports_with_models_follow_scroll() {
        let mut registry = ViewportRegistry::default();
        let model = Entity::from_raw(7);

        let mut reactive = record(true);
        reactive.primary_model = Some(model);
        registry.insert(ViewportId::timeline(0), reactive);

        registry.insert(ViewportId::timeline(1), record(true));

        let mut badge = record(false);
        badge.primary_model = Some(Entity::from_raw(8));
        registry.insert(ViewportId::skill(2), badge);

        let models: Vec<_> = registry.scroll_reactive_models().collect();
        assert_eq!(models, vec![model]);
    }
}

use bevy::prelude::*;

/// Model load bookkeeping, kept for diagnostics only.
#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub models_requested: usize,
    pub models_loaded: usize,
    pub models_failed: usize,
    /// (asset path, 0 pending / 1 loaded / -1 failed)
    pub model_loading_states: Vec<(String, i32)>,
}

impl LoadingProgress {
    pub fn requested(&mut self, path: &str) {
        self.models_requested += 1;
        self.model_loading_states.push((path.to_string(), 0));
    }

    pub fn finished(&mut self, path: &str, loaded: bool) {
        if loaded {
            self.models_loaded += 1;
        } else {
            self.models_failed += 1;
        }
        if let Some(entry) = self
            .model_loading_states
            .iter_mut()
            .find(|(p, state)| p == path && *state == 0)
        {
            entry.1 = if loaded { 1 } else { -1 };
        }
    }

    /// A stale request will never finish; forget it.
    pub fn abandoned(&mut self, path: &str) {
        self.models_requested = self.models_requested.saturating_sub(1);
        if let Some(i) = self
            .model_loading_states
            .iter()
            .position(|(p, state)| p == path && *state == 0)
        {
            self.model_loading_states.remove(i);
        }
    }

    pub fn in_flight(&self) -> usize {
        self.models_requested - self.models_loaded - self.models_failed
    }

    pub fn percent(&self) -> f32 {
        if self.models_requested == 0 {
            return 100.0;
        }
        (self.models_loaded + self.models_failed) as f32 / self.models_requested as f32 * 100.0
    }
}

use crate::engine::core::settings::{EffectsSettings, SETTINGS_PATH, SettingsLoader};
use bevy::asset::LoadState;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Leave `Loading` once the settings file has either loaded or failed.
pub fn transition_to_running(
    loader: Res<SettingsLoader>,
    asset_server: Res<AssetServer>,
    settings_assets: Res<Assets<EffectsSettings>>,
    mut settings: ResMut<EffectsSettings>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(handle) = loader.handle.as_ref() else {
        return;
    };

    match asset_server.get_load_state(handle) {
        Some(LoadState::Loaded) => {
            if loader.inline_applied {
                info!("Inline effects settings override {}", SETTINGS_PATH);
            } else if let Some(loaded) = settings_assets.get(handle) {
                *settings = loaded.clone();
                info!("✓ Effects settings loaded");
            }
        }
        Some(LoadState::Failed(err)) => {
            warn!("Effects settings unavailable, using defaults: {}", err);
        }
        _ => return,
    }

    info!("→ Transitioning to Running state");
    next_state.set(AppState::Running);
}

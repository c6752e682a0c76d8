use bevy::prelude::*;
use constants::palette::JOURNEY_MARGIN_PX;
use constants::placement::{MODEL_ASSET_DIR, STAGE_MODEL_SPACING};
use constants::scroll::{
    NAV_CLICK_COOLDOWN_SECS, NAV_PROBE_FRACTION, PARALLAX_RATE, SCROLL_ROTATION_FACTOR,
};
use serde::Deserialize;

/// Path of the optional settings file, relative to the asset root.
pub const SETTINGS_PATH: &str = "effects.json";

/// Runtime tunables. Every field is optional in JSON; missing fields keep the design
/// constants.
#[derive(Asset, TypePath, Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EffectsSettings {
    pub scroll_rotation_factor: f32,
    pub parallax_rate: f32,
    pub nav_probe_fraction: f32,
    pub nav_click_cooldown_secs: f64,
    pub journey_margin_px: f32,
    pub stage_model_spacing: f32,
    pub model_asset_dir: String,
    /// The hero viewport is built only when enabled.
    pub hero_viewport: bool,
}

impl Default for EffectsSettings {
    fn default() -> Self {
        Self {
            scroll_rotation_factor: SCROLL_ROTATION_FACTOR,
            parallax_rate: PARALLAX_RATE,
            nav_probe_fraction: NAV_PROBE_FRACTION,
            nav_click_cooldown_secs: NAV_CLICK_COOLDOWN_SECS,
            journey_margin_px: JOURNEY_MARGIN_PX,
            stage_model_spacing: STAGE_MODEL_SPACING,
            model_asset_dir: MODEL_ASSET_DIR.to_string(),
            hero_viewport: false,
        }
    }
}

impl EffectsSettings {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn model_path(&self, model: &str) -> String {
        let dir = self.model_asset_dir.trim_end_matches('/');
        if dir.is_empty() {
            model.to_string()
        } else {
            format!("{dir}/{model}")
        }
    }
}

#[derive(Resource, Default)]
pub struct SettingsLoader {
    pub handle: Option<Handle<EffectsSettings>>,
    /// Inline page settings were applied; they take precedence over the file.
    pub inline_applied: bool,
}

pub fn start_loading_settings(mut loader: ResMut<SettingsLoader>, asset_server: Res<AssetServer>) {
    loader.handle = Some(asset_server.load(SETTINGS_PATH));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_keep_defaults() {
        let settings = EffectsSettings::from_json_str(r#"{"hero_viewport": true}"#).unwrap();
        assert!(settings.hero_viewport);
        assert_eq!(settings.scroll_rotation_factor, 0.01);
        assert_eq!(settings.nav_click_cooldown_secs, 2.0);
        assert_eq!(settings.stage_model_spacing, 1.2);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(EffectsSettings::from_json_str("{ nope").is_err());
    }

    #[test]
    fn model_path_joins_directory() {
        let mut settings = EffectsSettings::default();
        assert_eq!(settings.model_path("work-model.glb"), "models/work-model.glb");

        settings.model_asset_dir = String::new();
        assert_eq!(settings.model_path("work-model.glb"), "work-model.glb");
    }
}

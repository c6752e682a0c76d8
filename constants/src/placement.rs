use crate::lighting::LightSpec;
use bevy::math::Vec3;
use std::f32::consts::FRAC_PI_6;

/// How a loaded model sits inside its viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPlacement {
    pub model: &'static str,
    pub scale: f32,
    pub position: Vec3,
    /// Euler XYZ, radians.
    pub rotation: Vec3,
    /// Lights added to the viewport's rig when this model is shown. Bevy renders at
    /// most ten directional lights across all viewports, so keep these rare.
    pub extra_lights: &'static [LightSpec],
    /// Re-centre the model's pivot on its bounding-box centroid once it has loaded.
    pub recentre: bool,
}

/// Used for any model id missing from [`MODEL_PLACEMENTS`].
pub const DEFAULT_PLACEMENT: ModelPlacement = ModelPlacement {
    model: "",
    scale: 0.8,
    position: Vec3::new(0.0, -0.5, 0.0),
    rotation: Vec3::ZERO,
    extra_lights: &[],
    recentre: false,
};

pub const MODEL_PLACEMENTS: &[ModelPlacement] = &[
    ModelPlacement {
        model: "education-model.glb",
        scale: 1.2,
        position: Vec3::new(0.0, 0.5, 0.0),
        // Tilted 30 degrees backwards.
        rotation: Vec3::new(FRAC_PI_6, 0.0, 0.0),
        extra_lights: &[],
        recentre: false,
    },
    ModelPlacement {
        model: "work-model.glb",
        scale: 0.6,
        position: Vec3::new(0.0, -0.5, 0.0),
        rotation: Vec3::ZERO,
        extra_lights: &[],
        recentre: false,
    },
    ModelPlacement {
        model: "current-model.glb",
        scale: 0.6,
        position: Vec3::new(0.0, -0.5, 0.0),
        rotation: Vec3::ZERO,
        extra_lights: &[],
        recentre: true,
    },
    ModelPlacement {
        model: "hero-model.glb",
        scale: 1.0,
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        extra_lights: &[],
        recentre: true,
    },
];

pub fn placement_for(model: &str) -> &'static ModelPlacement {
    MODEL_PLACEMENTS
        .iter()
        .find(|p| p.model == model)
        .unwrap_or(&DEFAULT_PLACEMENT)
}

/// Models shown for each timeline stage, by stage index.
pub const STAGE_MODELS: &[&[&str]] = &[
    &["education-model.glb"],
    &["work-model.glb"],
    &["current-model.glb"],
    // Test automation stage reuses the work model.
    &["work-model.glb"],
];

pub const FALLBACK_STAGE_MODELS: &[&str] = &["education-model.glb"];

pub fn models_for_stage(stage: usize) -> &'static [&'static str] {
    STAGE_MODELS.get(stage).copied().unwrap_or(FALLBACK_STAGE_MODELS)
}

/// Horizontal distance between models that share one stage.
pub const STAGE_MODEL_SPACING: f32 = 1.2;

pub const HERO_MODEL: &str = "hero-model.glb";

/// Asset directory models are requested from, relative to the asset root.
pub const MODEL_ASSET_DIR: &str = "models";

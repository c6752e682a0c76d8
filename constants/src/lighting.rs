use bevy::math::Vec3;

/// A directional light, described the way the page designs specify it: an sRGB colour,
/// a unitless intensity and the position the light shines from (towards the origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSpec {
    pub colour: [u8; 3],
    pub intensity: f32,
    pub from: Vec3,
}

pub const AMBIENT_COLOUR: [u8; 3] = [0x40, 0x40, 0x40];
pub const AMBIENT_INTENSITY: f32 = 0.6;

/// Main light for shading and depth.
pub const KEY_LIGHT: LightSpec = LightSpec {
    colour: [0xff, 0xff, 0xff],
    intensity: 0.8,
    from: Vec3::new(-1.0, 1.0, 1.0),
};

/// Fill light from the opposite side.
pub const FILL_LIGHT: LightSpec = LightSpec {
    colour: [0x40, 0x40, 0x40],
    intensity: 0.4,
    from: Vec3::new(1.0, 0.5, -1.0),
};

pub const LIGHTING_RIG: [LightSpec; 2] = [KEY_LIGHT, FILL_LIGHT];

/// Conversion from design intensity to Bevy directional illuminance (lux).
pub const DIRECTIONAL_LUX_PER_UNIT: f32 = 10_000.0;

/// Conversion from design intensity to Bevy ambient brightness (cd/m^2).
pub const AMBIENT_BRIGHTNESS_PER_UNIT: f32 = 500.0;

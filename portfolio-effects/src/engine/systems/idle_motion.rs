use bevy::prelude::*;

/// Continuous per-frame motion: spin in radians per second around each local axis and
/// an optional vertical bob around `base_y`.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct IdleMotion {
    pub spin: Vec3,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub base_y: f32,
}

impl IdleMotion {
    pub fn spin(spin: Vec3) -> Self {
        Self { spin, ..default() }
    }

    pub fn with_bob(mut self, amplitude: f32, frequency: f32, base_y: f32) -> Self {
        self.bob_amplitude = amplitude;
        self.bob_frequency = frequency;
        self.base_y = base_y;
        self
    }

    pub fn advance(&self, transform: &mut Transform, delta_secs: f32, elapsed_secs: f32) {
        transform.rotate_local_x(self.spin.x * delta_secs);
        transform.rotate_local_y(self.spin.y * delta_secs);
        transform.rotate_local_z(self.spin.z * delta_secs);

        if self.bob_amplitude != 0.0 {
            transform.translation.y =
                self.base_y + (elapsed_secs * self.bob_frequency).sin() * self.bob_amplitude;
        }
    }
}

pub fn apply_idle_motion(time: Res<Time>, mut query: Query<(&IdleMotion, &mut Transform)>) {
    let delta = time.delta_secs();
    let elapsed = time.elapsed_secs();
    for (motion, mut transform) in &mut query {
        motion.advance(&mut transform, delta, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn spin_accumulates_over_frames() {
        let motion = IdleMotion::spin(Vec3::new(0.0, FRAC_PI_2, 0.0));
        let mut transform = Transform::default();

        for _ in 0..10 {
            motion.advance(&mut transform, 0.1, 0.0);
        }

        let (_, yaw, _) = transform.rotation.to_euler(EulerRot::XYZ);
        assert!((yaw - FRAC_PI_2).abs() < 1e-4);
        assert_eq!(transform.translation, Vec3::ZERO);
    }

    #[test]
    fn bob_stays_within_amplitude() {
        let motion = IdleMotion::default().with_bob(0.1, 0.5, 1.0);
        let mut transform = Transform::default();

        for step in 0..100 {
            motion.advance(&mut transform, 0.016, step as f32 * 0.25);
            assert!((transform.translation.y - 1.0).abs() <= 0.1 + 1e-6);
        }
    }
}

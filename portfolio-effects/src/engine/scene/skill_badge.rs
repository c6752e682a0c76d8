use crate::engine::scene::lighting::srgb;
use crate::engine::scene::registry::{ModelLoadState, ViewportId, ViewportRegistry};
use crate::engine::systems::idle_motion::IdleMotion;
use bevy::math::primitives::{Cuboid, Sphere, Tetrahedron};
use bevy::pbr::wireframe::{Wireframe, WireframeColor};
use bevy::prelude::*;
use bevy::render::alpha::AlphaMode;
use bevy::render::view::RenderLayers;
use constants::skills::{BADGE_SPIN, BadgeShape, SkillBadge};

#[derive(Component)]
pub struct SkillBadgeMesh;

pub fn badge_mesh(shape: BadgeShape) -> Mesh {
    match shape {
        BadgeShape::Sphere {
            radius,
            sectors,
            stacks,
        } => Sphere::new(radius).mesh().uv(sectors, stacks),
        BadgeShape::Cube { size } => Cuboid::from_length(size).into(),
        BadgeShape::Icosahedron { radius } => match Sphere::new(radius).mesh().ico(0) {
            Ok(mesh) => mesh,
            Err(e) => {
                warn!("Icosahedron badge unavailable, using a sphere: {}", e);
                Sphere::new(radius).mesh().uv(12, 8)
            }
        },
        BadgeShape::Tetrahedron { radius } => tetrahedron(radius).into(),
    }
}

/// Regular tetrahedron centred on the origin with the given circumradius.
pub fn tetrahedron(radius: f32) -> Tetrahedron {
    let unit = Tetrahedron::default();
    let scale = radius / unit.vertices[0].length();
    Tetrahedron {
        vertices: unit.vertices.map(|v| v * scale),
    }
}

/// Fill is fully transparent; only the wireframe edges show, in the badge colour.
fn badge_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgba(0.0, 0.0, 0.0, 0.0),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    }
}

/// Spawn a spinning wireframe badge into a skill viewport. Badges are procedural, so
/// the viewport is `Loaded` as soon as the mesh exists.
pub fn spawn_skill_badge(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    registry: &mut ViewportRegistry,
    id: &ViewportId,
    badge: &SkillBadge,
) -> Option<Entity> {
    let record = registry.get_mut(id)?;

    let mesh = commands
        .spawn((
            Mesh3d(meshes.add(badge_mesh(badge.shape))),
            MeshMaterial3d(materials.add(badge_material())),
            Transform::default(),
            Wireframe,
            WireframeColor {
                color: srgb(badge.colour),
            },
            IdleMotion::spin(BADGE_SPIN),
            RenderLayers::layer(record.layer),
            SkillBadgeMesh,
            ChildOf(record.root),
            Name::new(format!("{id}_badge")),
        ))
        .id();

    record.primary_model = Some(mesh);
    record.load_state = ModelLoadState::Loaded;
    Some(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_builds_a_mesh() {
        let shapes = [
            BadgeShape::Sphere {
                radius: 0.8,
                sectors: 12,
                stacks: 8,
            },
            BadgeShape::Cube { size: 1.0 },
            BadgeShape::Icosahedron { radius: 0.8 },
            BadgeShape::Tetrahedron { radius: 1.0 },
        ];
        for shape in shapes {
            assert!(badge_mesh(shape).count_vertices() > 0, "{shape:?}");
        }
    }

    #[test]
    fn cube_badge_has_one_face_per_side() {
        // 4 vertices per face so each face keeps its own normal.
        assert_eq!(badge_mesh(BadgeShape::Cube { size: 1.0 }).count_vertices(), 24);
    }

    #[test]
    fn tetrahedron_vertices_sit_on_the_requested_radius() {
        for vertex in tetrahedron(1.0).vertices {
            assert!((vertex.length() - 1.0).abs() < 1e-5, "{vertex}");
        }
        for vertex in tetrahedron(0.5).vertices {
            assert!((vertex.length() - 0.5).abs() < 1e-5, "{vertex}");
        }
    }
}

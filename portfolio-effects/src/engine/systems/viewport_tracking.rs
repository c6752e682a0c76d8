use crate::engine::scene::viewport::ViewportCamera;
use crate::page::geometry::{PageLayout, PageRect};
use bevy::prelude::*;
use bevy::render::camera::{SubCameraView, Viewport};
use bevy::window::PrimaryWindow;

/// On-screen part of a container, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRegion {
    pub position: UVec2,
    pub size: UVec2,
    /// Where the visible part sits within the whole container.
    pub full_size: UVec2,
    pub offset: Vec2,
}

/// Clip `rect` (CSS pixels) to a surface of `surface` physical pixels. `None` when
/// nothing of the container is on screen.
pub fn clip_region(rect: &PageRect, scale: f32, surface: UVec2) -> Option<ClipRegion> {
    let min = Vec2::new(rect.x, rect.y) * scale;
    let max = Vec2::new(rect.x + rect.width, rect.y + rect.height) * scale;

    let visible_min = min.max(Vec2::ZERO).floor();
    let visible_max = max.min(surface.as_vec2()).ceil();
    if visible_max.x - visible_min.x < 1.0 || visible_max.y - visible_min.y < 1.0 {
        return None;
    }

    let position = visible_min.as_uvec2();
    let size = (visible_max - visible_min).as_uvec2();
    let full_size = (max - min).round().max(Vec2::ONE).as_uvec2();
    Some(ClipRegion {
        position,
        size,
        full_size,
        offset: visible_min - min,
    })
}

fn region_changed(camera: &Camera, region: &ClipRegion) -> bool {
    let viewport_moved = camera.viewport.as_ref().is_none_or(|v| {
        v.physical_position != region.position || v.physical_size != region.size
    });
    let sub_view_moved = camera.sub_camera_view.as_ref().is_none_or(|s| {
        s.full_size != region.full_size || s.size != region.size || s.offset != region.offset
    });
    viewport_moved || sub_view_moved
}

/// Keep each viewport camera drawing over its container as the page scrolls and
/// resizes. Cameras of off-screen or vanished containers are switched off.
pub fn track_viewport_containers(
    layout: Res<PageLayout>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&ViewportCamera, &mut Camera)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let surface = UVec2::new(window.physical_width(), window.physical_height());
    let scale = window.scale_factor();

    for (viewport, mut camera) in &mut cameras {
        let region = layout
            .resolve(&viewport.container)
            .and_then(|info| clip_region(&info.rect, scale, surface));

        match region {
            Some(region) => {
                if region_changed(&camera, &region) {
                    camera.viewport = Some(Viewport {
                        physical_position: region.position,
                        physical_size: region.size,
                        ..default()
                    });
                    camera.sub_camera_view = Some(SubCameraView {
                        full_size: region.full_size,
                        offset: region.offset,
                        size: region.size,
                    });
                }
                if !camera.is_active {
                    camera.is_active = true;
                }
            }
            None => {
                if camera.is_active {
                    trace!("{} container off screen", viewport.id);
                    camera.is_active = false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: UVec2 = UVec2::new(1280, 720);

    #[test]
    fn fully_visible_container_keeps_its_size() {
        let region = clip_region(&PageRect::new(100.0, 50.0, 600.0, 500.0), 1.0, SURFACE).unwrap();
        assert_eq!(region.position, UVec2::new(100, 50));
        assert_eq!(region.size, UVec2::new(600, 500));
        assert_eq!(region.full_size, region.size);
        assert_eq!(region.offset, Vec2::ZERO);
    }

    #[test]
    fn container_scrolled_past_the_top_is_clipped() {
        let region = clip_region(&PageRect::new(0.0, -200.0, 600.0, 500.0), 1.0, SURFACE).unwrap();
        assert_eq!(region.position, UVec2::new(0, 0));
        assert_eq!(region.size, UVec2::new(600, 300));
        assert_eq!(region.full_size, UVec2::new(600, 500));
        assert_eq!(region.offset, Vec2::new(0.0, 200.0));
    }

    #[test]
    fn scale_factor_maps_to_physical_pixels() {
        let region =
            clip_region(&PageRect::new(10.0, 10.0, 150.0, 150.0), 2.0, UVec2::new(2560, 1440)).unwrap();
        assert_eq!(region.position, UVec2::new(20, 20));
        assert_eq!(region.size, UVec2::new(300, 300));
    }

    #[test]
    fn off_screen_container_has_no_region() {
        assert_eq!(clip_region(&PageRect::new(0.0, 900.0, 600.0, 500.0), 1.0, SURFACE), None);
        assert_eq!(clip_region(&PageRect::new(0.0, -600.0, 600.0, 500.0), 1.0, SURFACE), None);
        assert_eq!(clip_region(&PageRect::new(0.0, 0.0, 0.0, 0.0), 1.0, SURFACE), None);
    }
}

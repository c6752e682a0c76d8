use bevy::prelude::*;

/// X offsets for `count` models laid out side by side, `spacing` apart and centred on 0.
pub fn even_spacing_offsets(count: usize, spacing: f32) -> Vec<f32> {
    let centre = (count as f32 - 1.0) * 0.5;
    (0..count).map(|i| (i as f32 - centre) * spacing).collect()
}

/// Centre of the axis-aligned box enclosing `points`.
pub fn bounds_centroid(points: impl IntoIterator<Item = Vec3>) -> Option<Vec3> {
    let mut points = points.into_iter();
    let first = points.next()?;
    let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
    Some((min + max) * 0.5)
}

/// The eight corners of a box given by centre and half extents.
pub fn box_corners(centre: Vec3, half_extents: Vec3) -> [Vec3; 8] {
    let mut corners = [Vec3::ZERO; 8];
    for (i, corner) in corners.iter_mut().enumerate() {
        let sign = Vec3::new(
            if i & 1 == 0 { -1.0 } else { 1.0 },
            if i & 2 == 0 { -1.0 } else { 1.0 },
            if i & 4 == 0 { -1.0 } else { 1.0 },
        );
        *corner = centre + half_extents * sign;
    }
    corners
}

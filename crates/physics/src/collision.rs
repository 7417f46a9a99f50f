//! Primitive overlap tests.

use engine_core::Aabb;
use glam::Vec3;

/// Sphere vs axis-aligned box.
///
/// Finds the point of the box closest to the sphere center by clamping each axis, then
/// compares the distance to the radius. Strictly less-than: a sphere that only touches the
/// surface does not collide.
pub fn sphere_intersects_aabb(center: Vec3, radius: f32, box_min: Vec3, box_max: Vec3) -> bool {
    let closest = center.clamp(box_min.min(box_max), box_min.max(box_max));
    closest.distance_squared(center) < radius * radius
}

/// [`sphere_intersects_aabb`] for an [`Aabb`].
pub fn sphere_intersects_box(center: Vec3, radius: f32, aabb: &Aabb) -> bool {
    aabb.closest_point(center).distance_squared(center) < radius * radius
}

/// Point-radius proximity used for projectile hits (strict less-than).
pub fn within_radius(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Index of the first candidate within `radius` of `point`, in iteration order.
pub fn first_within_radius<I>(point: Vec3, radius: f32, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = Vec3>,
{
    candidates
        .into_iter()
        .position(|candidate| within_radius(point, candidate, radius))
}

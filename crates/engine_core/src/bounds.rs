//! Axis-aligned bounding boxes.

use glam::{Mat4, Vec3};

/// An axis-aligned bounding box described by its minimum and maximum corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        }
    }
}

impl Aabb {
    /// Create a box from two opposite corners. Corners may be given in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box enclosing every point. Returns `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Vertical (Y) extent.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Transform the box into another space and re-derive the enclosing axis-aligned box.
    ///
    /// Rotations and negative scales reorder corners, so min/max are recomputed from all
    /// eight transformed corners rather than from the two original extremes.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let corners = self.corners().map(|c| matrix.transform_point3(c));
        // Eight corners, never empty.
        Self::from_points(corners).unwrap_or(*self)
    }

    /// Point inside (or on the surface of) the box closest to `point`.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Box grown to also enclose `other`.
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn new_orders_corners() {
        let b = Aabb::new(Vec3::new(2.0, -1.0, 5.0), Vec3::new(-2.0, 3.0, 1.0));
        assert_eq!(b.min, Vec3::new(-2.0, -1.0, 1.0));
        assert_eq!(b.max, Vec3::new(2.0, 3.0, 5.0));
        assert_eq!(b.height(), 4.0);
    }

    #[test]
    fn from_points_empty_is_none() {
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    /// A 90° yaw swaps X and Z extents; naive min/max transform would invert them.
    #[test]
    fn transformed_recomputes_min_max_after_rotation() {
        let b = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 1.0));
        let m = Mat4::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let t = b.transformed(&m);
        assert!(t.min.cmple(t.max).all());
        assert!((t.size().x - 1.0).abs() < 1e-4);
        assert!((t.size().z - 4.0).abs() < 1e-4);
        assert!((t.size().y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn transformed_with_scale_and_translation() {
        let b = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let m = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 3.0, -1.0),
            Quat::IDENTITY,
            Vec3::new(10.0, 0.0, 0.0),
        );
        let t = b.transformed(&m);
        assert_eq!(t.min, Vec3::new(8.0, -3.0, -1.0));
        assert_eq!(t.max, Vec3::new(12.0, 3.0, 1.0));
    }

    #[test]
    fn closest_point_clamps_per_axis() {
        let b = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert_eq!(b.closest_point(Vec3::new(2.0, 0.5, -3.0)), Vec3::new(1.0, 0.5, 0.0));
        assert!(b.contains(Vec3::splat(0.5)));
        assert!(!b.contains(Vec3::new(0.5, 1.5, 0.5)));
    }
}

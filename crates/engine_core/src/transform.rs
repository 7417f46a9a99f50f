//! Transform component and utilities for spatial positioning.

use glam::{Mat4, Quat, Vec3};

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation.
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation: rotation.normalize(),
            ..Default::default()
        }
    }

    /// Same transform with a uniform scale.
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Rotate around a world-space axis. The delta is applied on the left.
    pub fn rotate_world(&mut self, axis: Vec3, angle: f32) {
        if angle == 0.0 {
            return;
        }
        let axis = axis.try_normalize().unwrap_or(Vec3::Y);
        self.rotation = (Quat::from_axis_angle(axis, angle) * self.rotation).normalize();
    }

    /// Rotate around an axis expressed in the transform's own (body) frame.
    /// The delta is applied on the right.
    pub fn rotate_local(&mut self, axis: Vec3, angle: f32) {
        if angle == 0.0 {
            return;
        }
        let axis = axis.try_normalize().unwrap_or(Vec3::X);
        self.rotation = (self.rotation * Quat::from_axis_angle(axis, angle)).normalize();
    }

    /// Rotate a vector from the body frame into world space (no translation).
    pub fn rotate_vector(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }

    /// Map a point from the body frame into world space (rotation + translation, no scale).
    pub fn local_to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    /// World yaw lands on the left and local pitch on the right of the stored rotation.
    #[test]
    fn world_and_local_rotations_compose_in_order() {
        let mut a = Transform::default();
        a.rotate_world(Vec3::Y, FRAC_PI_2);
        a.rotate_local(Vec3::X, FRAC_PI_2);

        let expected = Quat::from_rotation_y(FRAC_PI_2) * Quat::from_rotation_x(FRAC_PI_2);
        assert!(approx(a.rotate_vector(Vec3::Z), expected * Vec3::Z));
        assert!(approx(a.rotate_vector(Vec3::Z), Vec3::new(0.0, -1.0, 0.0)));
        assert!((a.rotation.length() - 1.0).abs() < 1e-5);

        // The swapped product points somewhere else entirely.
        let swapped = Quat::from_rotation_x(FRAC_PI_2) * Quat::from_rotation_y(FRAC_PI_2);
        assert!(!approx(a.rotate_vector(Vec3::Z), swapped * Vec3::Z));
    }

    #[test]
    fn zero_length_axis_does_not_produce_nan() {
        let mut t = Transform::default();
        t.rotate_world(Vec3::ZERO, 0.5);
        t.rotate_local(Vec3::ZERO, 0.5);
        assert!(t.rotation.is_finite());
        assert!((t.rotation.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn local_to_world_applies_rotation_then_translation() {
        let t = Transform::from_position_rotation(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_y(FRAC_PI_2),
        );
        assert!(approx(t.local_to_world(Vec3::Z), Vec3::new(2.0, 2.0, 3.0)));
    }

    #[test]
    fn matrix_includes_scale() {
        let t = Transform::from_position(Vec3::new(0.0, 5.0, 0.0)).with_uniform_scale(2.0);
        let p = t.to_matrix().transform_point3(Vec3::X);
        assert!(approx(p, Vec3::new(2.0, 5.0, 0.0)));
    }
}

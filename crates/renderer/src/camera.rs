//! Orbit camera: looks at a target point from a distance along yaw/pitch spherical coordinates.

use glam::{Mat4, Vec3};

/// Pitch stays inside ±89° so the view never flips over the pole.
pub const MAX_ORBIT_PITCH_DEGREES: f32 = 89.0;

/// Camera parameterized by a target point, distance, yaw and pitch.
///
/// The eye position is never stored; it is recomputed from the spherical
/// coordinates around `target` on every query, so moving the target drags the
/// camera along without any extra bookkeeping.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Point the camera looks at.
    pub target: Vec3,
    /// Distance from the target, kept within `[min_distance, max_distance]`.
    distance: f32,
    /// Yaw around the world up axis, in degrees.
    yaw: f32,
    /// Elevation above the target's horizontal plane, in degrees.
    pitch: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Degrees of rotation per pixel of mouse movement.
    pub sensitivity: f32,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 15.0,
            yaw: 90.0,
            pitch: 20.0,
            min_distance: 5.0,
            max_distance: 50.0,
            sensitivity: 0.1,
            fov_degrees: 60.0,
            near: 0.5,
            far: 5000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl OrbitCamera {
    /// Create an orbit camera with the given zoom range; the starting distance is clamped into it.
    pub fn new(distance: f32, min_distance: f32, max_distance: f32) -> Self {
        let (min_distance, max_distance) = if min_distance <= max_distance {
            (min_distance, max_distance)
        } else {
            (max_distance, min_distance)
        };
        Self {
            distance: distance.clamp(min_distance, max_distance),
            min_distance,
            max_distance,
            ..Default::default()
        }
    }

    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Orbit in response to cursor movement (pixels). Dragging up raises the camera.
    pub fn process_mouse(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw = (self.yaw + delta_x * self.sensitivity) % 360.0;
        self.set_pitch(self.pitch - delta_y * self.sensitivity);
    }

    /// Zoom in response to scroll lines. Scrolling up moves closer.
    pub fn process_scroll(&mut self, lines: f32) {
        self.set_distance(self.distance - lines);
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(self.min_distance, self.max_distance);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-MAX_ORBIT_PITCH_DEGREES, MAX_ORBIT_PITCH_DEGREES);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw % 360.0;
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Eye position derived from the spherical coordinates around `target`.
    pub fn position(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.target
            + self.distance
                * Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
    }

    /// Get the view matrix. Recomputes the eye from the current target every call.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

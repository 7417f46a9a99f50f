//! Chase camera: the orbit camera circles a point that rides along with the aircraft.

use glam::Vec3;
use input::FlightControls;
use renderer::OrbitCamera;

use crate::aircraft::Aircraft;
use crate::config::CameraTuning;

/// Orbit camera configured from tuning. `sensitivity` is the global mouse multiplier.
pub fn create_camera(tuning: &CameraTuning, sensitivity: f32) -> OrbitCamera {
    let mut camera = OrbitCamera::new(tuning.distance, tuning.min_distance, tuning.max_distance);
    camera.set_yaw(tuning.yaw_degrees);
    camera.set_pitch(tuning.pitch_degrees);
    camera.sensitivity = tuning.orbit_sensitivity * sensitivity;
    camera.fov_degrees = tuning.fov_degrees;
    camera.far = tuning.far;
    camera
}

/// The aircraft's visual center: `position + orientation * offset`.
pub fn follow_target(aircraft: &Aircraft, visual_offset: Vec3) -> Vec3 {
    aircraft.transform.local_to_world(visual_offset)
}

/// Player orbit and zoom. Independent of the aircraft's heading.
pub fn apply_orbit_input(camera: &mut OrbitCamera, controls: &FlightControls) {
    if controls.look_delta != glam::Vec2::ZERO {
        camera.process_mouse(controls.look_delta.x, controls.look_delta.y);
    }
    if controls.zoom != 0.0 {
        camera.process_scroll(controls.zoom);
    }
}

/// Re-aim the camera at the aircraft's visual center.
pub fn follow(camera: &mut OrbitCamera, aircraft: &Aircraft, tuning: &CameraTuning) {
    camera.target = follow_target(aircraft, tuning.visual_offset);
}

//! Player aircraft: quaternion orientation, throttle, control surfaces, collision-gated movement.

use engine_core::Transform;
use glam::{Quat, Vec3};
use input::FlightControls;
use physics::CityColliders;
use serde::{Deserialize, Serialize};

use crate::config::FlightTuning;

/// Rudder deflection limits in degrees.
pub const RUDDER_RANGE: (f32, f32) = (-25.0, 25.0);
/// Flap deflection limits in degrees.
pub const FLAP_RANGE: (f32, f32) = (-15.0, 40.0);

/// Which local axes of the aircraft model point forward and up. Asset dependent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelBasis {
    pub forward: Vec3,
    pub up: Vec3,
}

impl Default for ModelBasis {
    fn default() -> Self {
        Self {
            forward: Vec3::Z,
            up: Vec3::Y,
        }
    }
}

impl ModelBasis {
    pub fn forward(&self) -> Vec3 {
        self.forward.try_normalize().unwrap_or(Vec3::Z)
    }

    pub fn up(&self) -> Vec3 {
        self.up.try_normalize().unwrap_or(Vec3::Y)
    }

    /// `forward × up`. Falls back to -X when the configured axes are parallel.
    pub fn right(&self) -> Vec3 {
        self.forward()
            .cross(self.up())
            .try_normalize()
            .unwrap_or(Vec3::NEG_X)
    }
}

/// A hinged surface (rudder, flaps) that deflects while its input is held and
/// eases back to neutral when released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSurface {
    angle: f32,
    min: f32,
    max: f32,
}

impl ControlSurface {
    pub fn new((min, max): (f32, f32)) -> Self {
        Self { angle: 0.0, min, max }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// `input` > 0 deflects toward `max`, < 0 toward `min`, 0 relaxes toward neutral.
    pub fn update(&mut self, input: f32, tuning: &FlightTuning, dt: f32) {
        if input > 0.0 {
            self.angle += tuning.surface_rate * dt;
        } else if input < 0.0 {
            self.angle -= tuning.surface_rate * dt;
        } else if self.angle.abs() <= tuning.surface_dead_zone {
            self.angle = 0.0;
        } else {
            let step = (tuning.surface_relax_rate * dt).min(self.angle.abs());
            self.angle -= step * self.angle.signum();
            if self.angle.abs() <= tuning.surface_dead_zone {
                self.angle = 0.0;
            }
        }
        self.angle = self.angle.clamp(self.min, self.max);
    }
}

/// Result of trying to move the aircraft for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// The candidate position hit the city; the aircraft stayed put.
    Blocked,
}

/// The player's aircraft.
#[derive(Debug, Clone)]
pub struct Aircraft {
    /// Position and orientation. Only [`Aircraft::update`] writes the position.
    pub transform: Transform,
    pub speed: f32,
    pub rudder: ControlSurface,
    pub flaps: ControlSurface,
    /// Degrees in `[0, 360)`.
    pub propeller_angle: f32,
    basis: ModelBasis,
}

impl Aircraft {
    pub fn new(tuning: &FlightTuning, basis: ModelBasis) -> Self {
        Self {
            transform: Transform::from_position(tuning.initial_position),
            speed: tuning.initial_speed.clamp(0.0, tuning.max_speed.max(0.0)),
            rudder: ControlSurface::new(RUDDER_RANGE),
            flaps: ControlSurface::new(FLAP_RANGE),
            propeller_angle: 0.0,
            basis,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn orientation(&self) -> Quat {
        self.transform.rotation
    }

    pub fn basis(&self) -> &ModelBasis {
        &self.basis
    }

    /// World-space nose direction, recomputed from the orientation on every call.
    pub fn forward(&self) -> Vec3 {
        self.transform.rotate_vector(self.basis.forward())
    }

    pub fn up(&self) -> Vec3 {
        self.transform.rotate_vector(self.basis.up())
    }

    pub fn right(&self) -> Vec3 {
        self.transform.rotate_vector(self.basis.right())
    }

    /// Compose `yaw_delta * orientation * pitch_delta`.
    ///
    /// Yaw turns about world up and is applied on the left; pitch turns about the
    /// aircraft's own right axis and is applied on the right. Positive yaw turns
    /// left, positive pitch raises the nose.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        self.transform.rotate_world(Vec3::Y, yaw);
        self.transform.rotate_local(self.basis.right(), pitch);
    }

    /// One flight step: throttle, rotation, control surfaces, propeller, then movement.
    pub fn update(
        &mut self,
        controls: &FlightControls,
        tuning: &FlightTuning,
        city: &CityColliders,
        dt: f32,
    ) -> MoveOutcome {
        self.speed = (self.speed + controls.throttle_axis() * tuning.acceleration * dt)
            .clamp(0.0, tuning.max_speed.max(0.0));

        let turn = tuning.turn_rate * dt;
        self.rotate(controls.yaw_axis() * turn, controls.pitch_axis() * turn);

        self.rudder.update(controls.yaw_axis(), tuning, dt);
        self.flaps.update(controls.pitch_axis(), tuning, dt);

        self.propeller_angle =
            (self.propeller_angle + self.speed * tuning.propeller_rate * dt).rem_euclid(360.0);

        self.try_move(self.speed * dt, tuning.collision_radius, city)
    }

    /// Move `distance` along the nose unless the new position would overlap the city.
    pub fn try_move(&mut self, distance: f32, radius: f32, city: &CityColliders) -> MoveOutcome {
        let candidate = self.transform.position + self.forward() * distance;
        if city.blocks_sphere(candidate, radius) {
            return MoveOutcome::Blocked;
        }
        self.transform.position = candidate;
        MoveOutcome::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::Aabb;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn tuning() -> FlightTuning {
        FlightTuning {
            initial_position: Vec3::ZERO,
            initial_speed: 10.0,
            ..Default::default()
        }
    }

    fn random_controls(rng: &mut StdRng) -> FlightControls {
        FlightControls {
            throttle_up: rng.gen(),
            throttle_down: rng.gen(),
            yaw_left: rng.gen(),
            yaw_right: rng.gen(),
            pitch_up: rng.gen(),
            pitch_down: rng.gen(),
            ..Default::default()
        }
    }

    #[test]
    fn default_basis_is_right_handed() {
        let basis = ModelBasis::default();
        assert_eq!(basis.right(), Vec3::NEG_X);
        let parallel = ModelBasis {
            forward: Vec3::Y,
            up: Vec3::Y,
        };
        assert!(parallel.right().is_finite());
    }

    #[test]
    fn orientation_stays_unit_length() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut aircraft = Aircraft::new(&tuning(), ModelBasis::default());
        for _ in 0..10_000 {
            aircraft.rotate(rng.gen_range(-0.2..0.2), rng.gen_range(-0.2..0.2));
            let len = aircraft.orientation().length();
            assert!((0.999..=1.001).contains(&len), "length {}", len);
        }
    }

    #[test]
    fn yaw_is_world_space_and_pitch_is_body_space() {
        let mut aircraft = Aircraft::new(&tuning(), ModelBasis::default());
        aircraft.rotate(0.0, 0.3);
        let pitched = aircraft.orientation();
        aircraft.rotate(0.5, 0.0);
        let expected = Quat::from_rotation_y(0.5) * pitched;
        assert!(aircraft.orientation().abs_diff_eq(expected, 1e-5));

        let mut aircraft = Aircraft::new(&tuning(), ModelBasis::default());
        aircraft.rotate(0.5, 0.0);
        aircraft.rotate(0.0, 0.3);
        let expected = Quat::from_rotation_y(0.5) * Quat::from_axis_angle(Vec3::NEG_X, 0.3);
        assert!(aircraft.orientation().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn positive_pitch_raises_nose_and_positive_yaw_turns_left() {
        let mut aircraft = Aircraft::new(&tuning(), ModelBasis::default());
        aircraft.rotate(0.0, 0.2);
        assert!(aircraft.forward().y > 0.0);
        let mut aircraft = Aircraft::new(&tuning(), ModelBasis::default());
        aircraft.rotate(0.2, 0.0);
        // Left of a +Z-facing, +Y-up aircraft is +X.
        assert!(aircraft.forward().x > 0.0);
    }

    #[test]
    fn speed_never_goes_negative() {
        let mut aircraft = Aircraft::new(&tuning(), ModelBasis::default());
        let brake = FlightControls {
            throttle_down: true,
            ..Default::default()
        };
        let city = CityColliders::default();
        for _ in 0..1000 {
            aircraft.update(&brake, &tuning(), &city, 1.0 / 60.0);
            assert!(aircraft.speed >= 0.0);
        }
        assert_eq!(aircraft.speed, 0.0);
    }

    #[test]
    fn speed_is_capped() {
        let t = tuning();
        let mut aircraft = Aircraft::new(&t, ModelBasis::default());
        let boost = FlightControls {
            throttle_up: true,
            ..Default::default()
        };
        for _ in 0..2000 {
            aircraft.update(&boost, &t, &CityColliders::default(), 0.05);
        }
        assert_eq!(aircraft.speed, t.max_speed);
    }

    #[test]
    fn surfaces_stay_in_range_for_any_inputs() {
        let mut rng = StdRng::seed_from_u64(5);
        let t = tuning();
        let mut aircraft = Aircraft::new(&t, ModelBasis::default());
        let city = CityColliders::default();
        for _ in 0..5000 {
            let controls = random_controls(&mut rng);
            aircraft.update(&controls, &t, &city, rng.gen_range(0.001..0.1));
            assert!((-25.0..=25.0).contains(&aircraft.rudder.angle()));
            assert!((-15.0..=40.0).contains(&aircraft.flaps.angle()));
            assert!((0.0..360.0).contains(&aircraft.propeller_angle));
        }
    }

    #[test]
    fn surfaces_deflect_then_relax_to_neutral() {
        let t = tuning();
        let mut flaps = ControlSurface::new(FLAP_RANGE);
        for _ in 0..100 {
            flaps.update(1.0, &t, 0.1);
        }
        assert_eq!(flaps.angle(), 40.0);
        for _ in 0..100 {
            flaps.update(-1.0, &t, 0.1);
        }
        assert_eq!(flaps.angle(), -15.0);
        for _ in 0..100 {
            flaps.update(0.0, &t, 0.1);
        }
        assert_eq!(flaps.angle(), 0.0);
    }

    #[test]
    fn small_deflection_snaps_to_neutral() {
        let t = tuning();
        let mut rudder = ControlSurface::new(RUDDER_RANGE);
        rudder.update(1.0, &t, 0.004);
        assert!(rudder.angle() > 0.0 && rudder.angle() <= t.surface_dead_zone);
        rudder.update(0.0, &t, 0.001);
        assert_eq!(rudder.angle(), 0.0);
    }

    #[test]
    fn moves_along_forward() {
        let t = tuning();
        let mut aircraft = Aircraft::new(&t, ModelBasis::default());
        let outcome = aircraft.update(&FlightControls::default(), &t, &CityColliders::default(), 0.5);
        assert_eq!(outcome, MoveOutcome::Moved);
        assert!((aircraft.position() - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn blocked_move_leaves_position_unchanged() {
        let t = tuning();
        let wall = Aabb::new(Vec3::new(-50.0, -50.0, 6.0), Vec3::new(50.0, 50.0, 10.0));
        let city = CityColliders::from_world_boxes(vec![wall]);
        let mut aircraft = Aircraft::new(&t, ModelBasis::default());
        aircraft.transform.rotation = Quat::from_rotation_y(0.1).normalize();
        let before = aircraft.position();
        let outcome = aircraft.update(&FlightControls::default(), &t, &city, 0.5);
        assert_eq!(outcome, MoveOutcome::Blocked);
        assert_eq!(aircraft.position(), before);
        // Blocked again on the next step; still no partial movement.
        assert_eq!(
            aircraft.update(&FlightControls::default(), &t, &city, 0.5),
            MoveOutcome::Blocked
        );
        assert_eq!(aircraft.position(), before);
    }
}

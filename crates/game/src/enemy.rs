//! Enemy aircraft: cruise toward a random target, pick a new one on arrival.

use engine_core::Transform;
use glam::{Mat4, Quat, Vec3};

use crate::config::EnemyTuning;
use crate::random::RandomSource;

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub position: Vec3,
    /// Point the enemy is flying toward.
    pub target: Vec3,
    /// Fixed at spawn.
    pub speed: f32,
    /// Heading about world up, radians. Follows the horizontal movement direction.
    pub yaw: f32,
    /// Degrees in `[0, 360)`.
    pub propeller_angle: f32,
}

impl Enemy {
    pub fn new(position: Vec3, target: Vec3, speed: f32) -> Self {
        let mut enemy = Self {
            position,
            target,
            speed: speed.max(0.0),
            yaw: 0.0,
            propeller_angle: 0.0,
        };
        enemy.face(target - position);
        enemy
    }

    /// Distance to the target ignoring altitude.
    pub fn horizontal_distance_to_target(&self) -> f32 {
        horizontal(self.target - self.position).length()
    }

    /// One step: retarget on arrival, move toward the target, turn to face the movement.
    pub fn update<R: RandomSource + ?Sized>(&mut self, tuning: &EnemyTuning, rng: &mut R, dt: f32) {
        if self.horizontal_distance_to_target() < tuning.retarget_distance {
            self.target = random_target(tuning, rng);
        }

        let to_target = self.target - self.position;
        let distance = to_target.length();
        // Never overshoot the target.
        let step = (self.speed * dt).min(distance);
        if let Some(direction) = to_target.try_normalize() {
            self.position += direction * step;
            self.face(direction);
        }

        self.propeller_angle =
            (self.propeller_angle + self.speed * tuning.propeller_rate * dt).rem_euclid(360.0);
    }

    /// Model matrix: yaw about world up, then uniform scale.
    pub fn model_matrix(&self, scale: f32) -> Mat4 {
        Transform::from_position_rotation(self.position, Quat::from_rotation_y(self.yaw))
            .with_uniform_scale(scale)
            .to_matrix()
    }

    /// Keep the previous heading when the direction has no horizontal component.
    fn face(&mut self, direction: Vec3) {
        if let Some(flat) = horizontal(direction).try_normalize() {
            self.yaw = flat.x.atan2(flat.z);
        }
    }
}

/// Random point over the target area at a random altitude in the configured band.
pub fn random_target<R: RandomSource + ?Sized>(tuning: &EnemyTuning, rng: &mut R) -> Vec3 {
    let p = rng.point_in_disk(tuning.target_area_radius);
    let altitude = rng.range(tuning.target_altitude_min, tuning.target_altitude_max);
    Vec3::new(p.x, altitude, p.y)
}

fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tuning() -> EnemyTuning {
        EnemyTuning::default()
    }

    #[test]
    fn approaches_target_horizontally() {
        let t = tuning();
        let mut rng = StdRng::seed_from_u64(2);
        let mut enemy = Enemy::new(Vec3::new(100.0, 500.0, 0.0), Vec3::ZERO, 40.0);
        let mut previous = enemy.horizontal_distance_to_target();
        let initial_target = enemy.target;
        for _ in 0..50 {
            enemy.update(&t, &mut rng, 0.1);
            if enemy.target != initial_target {
                break;
            }
            let d = enemy.horizontal_distance_to_target();
            assert!(d < previous, "{} !< {}", d, previous);
            previous = d;
        }
    }

    #[test]
    fn closes_altitude_along_the_way() {
        let t = tuning();
        let mut rng = StdRng::seed_from_u64(2);
        let mut enemy = Enemy::new(Vec3::new(300.0, 400.0, 0.0), Vec3::new(0.0, 0.0, 0.0), 50.0);
        enemy.update(&t, &mut rng, 1.0);
        // 50 units along the (-3, -4, 0) direction.
        assert!((enemy.position - Vec3::new(270.0, 360.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn retargets_on_horizontal_arrival_only() {
        let t = tuning();
        let mut rng = StdRng::seed_from_u64(4);
        // Far below the target but horizontally within the threshold.
        let old_target = Vec3::new(5.0, 300.0, 5.0);
        let mut enemy = Enemy::new(Vec3::new(0.0, 0.0, 0.0), old_target, 40.0);
        let before = enemy.position;
        enemy.update(&t, &mut rng, 0.1);
        assert_ne!(enemy.target, old_target);
        assert!(enemy.position.distance(before) <= 40.0 * 0.1 + 1e-4);
    }

    #[test]
    fn keeps_target_while_far_away() {
        let t = tuning();
        let mut rng = StdRng::seed_from_u64(4);
        let target = Vec3::new(200.0, 0.0, 0.0);
        let mut enemy = Enemy::new(Vec3::ZERO, target, 40.0);
        enemy.update(&t, &mut rng, 0.1);
        assert_eq!(enemy.target, target);
        assert!((enemy.position - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn does_not_overshoot() {
        let t = EnemyTuning {
            retarget_distance: 0.0,
            ..tuning()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let target = Vec3::new(0.0, 0.0, 1.0);
        let mut enemy = Enemy::new(Vec3::ZERO, target, 100.0);
        enemy.update(&t, &mut rng, 1.0);
        assert_eq!(enemy.position, target);
        // Sitting on the target: zero direction must not produce NaN.
        enemy.update(&t, &mut rng, 1.0);
        assert!(enemy.position.is_finite());
        assert!(enemy.yaw.is_finite());
    }

    #[test]
    fn faces_movement_direction() {
        let t = tuning();
        let mut rng = StdRng::seed_from_u64(0);
        let mut enemy = Enemy::new(Vec3::ZERO, Vec3::new(300.0, 0.0, 0.0), 10.0);
        enemy.update(&t, &mut rng, 0.1);
        assert!((enemy.yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        let nose = enemy.model_matrix(1.0).transform_vector3(Vec3::Z);
        assert!((nose - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn random_target_uses_configured_band() {
        let t = tuning();
        let mut rng = ScriptedRandom::new(&[0.25, 1.0, 0.5]);
        let target = random_target(&t, &mut rng);
        // Angle a quarter turn, full radius, mid altitude.
        assert!((target - Vec3::new(0.0, 140.0, 400.0)).length() < 1e-2);
    }
}

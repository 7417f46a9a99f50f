//! Wing guns: paired projectiles, flight, expiry and hits on enemies.

use engine_core::Lifetime;
use glam::Vec3;
use physics::first_within_radius;

use crate::aircraft::Aircraft;
use crate::config::CombatTuning;
use crate::effects::Explosion;
use crate::enemy::Enemy;

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec3,
    /// Fixed at spawn.
    pub velocity: Vec3,
    pub life: Lifetime,
}

impl Projectile {
    pub fn new(position: Vec3, velocity: Vec3, seconds: f32) -> Self {
        Self {
            position,
            velocity,
            life: Lifetime::new(seconds),
        }
    }

    /// Integrate and age. Returns `true` once expired.
    pub fn update(&mut self, dt: f32) -> bool {
        self.position += self.velocity * dt;
        self.life.update(dt)
    }
}

/// Two projectiles, one per wing, mirrored about the aircraft's centerline.
pub fn fire_pair(aircraft: &Aircraft, tuning: &CombatTuning) -> [Projectile; 2] {
    let forward = aircraft.forward();
    let muzzle = aircraft.position()
        + forward * tuning.forward_offset
        + aircraft.up() * tuning.vertical_offset;
    let lateral = aircraft.right() * tuning.wing_offset;
    let velocity = forward * tuning.bullet_speed;
    [
        Projectile::new(muzzle + lateral, velocity, tuning.bullet_life),
        Projectile::new(muzzle - lateral, velocity, tuning.bullet_life),
    ]
}

/// Move every projectile, drop expired ones, and resolve hits.
///
/// A surviving projectile destroys the first enemy (in collection order) closer than
/// `hit_radius`; both are removed and one explosion is appended at the enemy's position.
/// Returns the number of enemies destroyed.
pub fn update_projectiles(
    projectiles: &mut Vec<Projectile>,
    enemies: &mut Vec<Enemy>,
    explosions: &mut Vec<Explosion>,
    tuning: &CombatTuning,
    dt: f32,
) -> u32 {
    let mut kills = 0;
    projectiles.retain_mut(|projectile| {
        if projectile.update(dt) {
            return false;
        }
        let hit = first_within_radius(
            projectile.position,
            tuning.hit_radius,
            enemies.iter().map(|e| e.position),
        );
        match hit {
            Some(index) => {
                let enemy = enemies.swap_remove(index);
                log::debug!(
                    "Enemy destroyed at ({:.0}, {:.0}, {:.0})",
                    enemy.position.x,
                    enemy.position.y,
                    enemy.position.z
                );
                explosions.push(Explosion::new(enemy.position, tuning.explosion_life));
                kills += 1;
                false
            }
            None => true,
        }
    });
    kills
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::ModelBasis;
    use crate::config::FlightTuning;

    fn aircraft_at_origin() -> Aircraft {
        let flight = FlightTuning {
            initial_position: Vec3::ZERO,
            ..Default::default()
        };
        Aircraft::new(&flight, ModelBasis::default())
    }

    fn still(position: Vec3, life: f32) -> Projectile {
        Projectile::new(position, Vec3::ZERO, life)
    }

    #[test]
    fn fires_a_symmetric_pair() {
        let tuning = CombatTuning {
            wing_offset: 8.0,
            forward_offset: 0.0,
            vertical_offset: 0.0,
            ..Default::default()
        };
        let pair = fire_pair(&aircraft_at_origin(), &tuning);
        let mut xs: Vec<f32> = pair.iter().map(|p| p.position.x).collect();
        xs.sort_by(f32::total_cmp);
        assert_eq!(xs, vec![-8.0, 8.0]);
        for p in &pair {
            assert_eq!(p.position.y, 0.0);
            assert_eq!(p.position.z, 0.0);
            assert!((p.velocity - Vec3::new(0.0, 0.0, tuning.bullet_speed)).length() < 1e-3);
            assert_eq!(p.life.remaining, tuning.bullet_life);
        }
    }

    #[test]
    fn offsets_follow_the_aircraft_frame() {
        let tuning = CombatTuning::default();
        let mut aircraft = aircraft_at_origin();
        aircraft.rotate(std::f32::consts::FRAC_PI_2, 0.0);
        let [a, b] = fire_pair(&aircraft, &tuning);
        // Facing +X after a left turn: guns spread along Z, muzzles ahead along X.
        assert!((a.position.z.abs() - tuning.wing_offset).abs() < 1e-3);
        assert!((a.position.z + b.position.z).abs() < 1e-3);
        assert!((a.position.x - tuning.forward_offset).abs() < 1e-3);
        assert!(a.velocity.x > 0.0);
    }

    #[test]
    fn ttl_is_ceil_of_life_over_dt() {
        for (life, dt) in [(1.0, 0.3), (2.0, 0.25), (1.0, 0.1), (0.5, 0.2)] {
            let mut projectiles = vec![still(Vec3::ZERO, life)];
            let mut updates = 0;
            while !projectiles.is_empty() {
                update_projectiles(
                    &mut projectiles,
                    &mut Vec::new(),
                    &mut Vec::new(),
                    &CombatTuning::default(),
                    dt,
                );
                updates += 1;
                assert!(updates < 10_000);
            }
            assert_eq!(updates, (life / dt).ceil() as u32, "life {} dt {}", life, dt);
        }
    }

    #[test]
    fn hit_removes_enemy_and_spawns_one_explosion() {
        let tuning = CombatTuning {
            hit_radius: 20.0,
            ..Default::default()
        };
        let enemy_position = Vec3::new(50.0, 100.0, 50.0);
        let mut enemies = vec![Enemy::new(enemy_position, Vec3::ZERO, 40.0)];
        let mut projectiles = vec![still(enemy_position + Vec3::new(19.0, 0.0, 0.0), 3.0)];
        let mut explosions = Vec::new();
        let kills = update_projectiles(&mut projectiles, &mut enemies, &mut explosions, &tuning, 0.016);
        assert_eq!(kills, 1);
        assert!(enemies.is_empty());
        assert!(projectiles.is_empty());
        assert_eq!(explosions.len(), 1);
        assert_eq!(explosions[0].position, enemy_position);
    }

    #[test]
    fn one_projectile_destroys_at_most_one_enemy() {
        let tuning = CombatTuning::default();
        let mut enemies = vec![
            Enemy::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, 10.0),
            Enemy::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::ZERO, 10.0),
        ];
        let mut projectiles = vec![still(Vec3::ZERO, 3.0)];
        let mut explosions = Vec::new();
        update_projectiles(&mut projectiles, &mut enemies, &mut explosions, &tuning, 0.016);
        assert_eq!(enemies.len(), 1);
        // First match in collection order wins.
        assert_eq!(enemies[0].position, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(explosions.len(), 1);
    }

    #[test]
    fn boundary_distance_is_a_miss() {
        let tuning = CombatTuning {
            hit_radius: 20.0,
            ..Default::default()
        };
        let mut enemies = vec![Enemy::new(Vec3::new(20.0, 0.0, 0.0), Vec3::ZERO, 10.0)];
        let mut projectiles = vec![still(Vec3::ZERO, 3.0)];
        let mut explosions = Vec::new();
        update_projectiles(&mut projectiles, &mut enemies, &mut explosions, &tuning, 0.016);
        assert_eq!(enemies.len(), 1);
        assert_eq!(projectiles.len(), 1);
        assert!(explosions.is_empty());
    }
}

//! Timed enemy spawning on a ring around the city.

use glam::Vec3;

use crate::config::EnemyTuning;
use crate::enemy::{random_target, Enemy};
use crate::random::RandomSource;

/// Spawns one enemy per interval while the population is below the cap.
#[derive(Debug, Clone, Default)]
pub struct EnemySpawner {
    /// Seconds since the last spawn. Keeps counting while the cap is reached, so a
    /// replacement appears as soon as an enemy is destroyed.
    pub spawn_timer: f32,
    /// Enemies spawned so far.
    pub total_spawned: u32,
}

impl EnemySpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the timer and spawn at most one enemy. Returns `true` if one was spawned.
    pub fn update<R: RandomSource + ?Sized>(
        &mut self,
        enemies: &mut Vec<Enemy>,
        tuning: &EnemyTuning,
        rng: &mut R,
        dt: f32,
    ) -> bool {
        self.spawn_timer += dt;
        if self.spawn_timer < tuning.spawn_interval || enemies.len() >= tuning.max_enemies {
            return false;
        }
        self.spawn_timer = 0.0;

        let enemy = spawn_enemy(tuning, rng);
        log::debug!(
            "Enemy spawned at ({:.0}, {:.0}, {:.0}), speed {:.1}",
            enemy.position.x,
            enemy.position.y,
            enemy.position.z,
            enemy.speed
        );
        enemies.push(enemy);
        self.total_spawned += 1;
        true
    }
}

/// One enemy on the spawn ring, with a random cruise speed and target.
pub fn spawn_enemy<R: RandomSource + ?Sized>(tuning: &EnemyTuning, rng: &mut R) -> Enemy {
    let angle = rng.angle();
    let radius = rng.range(tuning.spawn_radius_min, tuning.spawn_radius_max);
    let position = Vec3::new(
        radius * angle.cos(),
        tuning.spawn_altitude,
        radius * angle.sin(),
    );
    let speed = rng.range(tuning.speed_min, tuning.speed_max);
    let target = random_target(tuning, rng);
    Enemy::new(position, target, speed)
}

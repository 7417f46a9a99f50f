//! Explosion effects spawned where enemies die.

use engine_core::Lifetime;
use glam::Vec3;

/// Rise-then-fall size curve: `sin(pi * progress)`, zero at both ends, peak 1 at the midpoint.
pub fn explosion_envelope(progress: f32) -> f32 {
    (std::f32::consts::PI * progress.clamp(0.0, 1.0)).sin().max(0.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    /// Fixed at spawn.
    pub position: Vec3,
    pub life: Lifetime,
}

impl Explosion {
    pub fn new(position: Vec3, seconds: f32) -> Self {
        Self {
            position,
            life: Lifetime::new(seconds),
        }
    }

    /// Age by `dt`. Returns `true` once expired.
    pub fn update(&mut self, dt: f32) -> bool {
        self.life.update(dt)
    }

    pub fn scale(&self, max_scale: f32) -> f32 {
        max_scale * explosion_envelope(self.life.progress())
    }
}

/// Age every explosion and drop the expired ones.
pub fn update_explosions(explosions: &mut Vec<Explosion>, dt: f32) {
    explosions.retain_mut(|e| !e.update(dt));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_is_a_single_hump() {
        assert_eq!(explosion_envelope(0.0), 0.0);
        assert!(explosion_envelope(0.9999) < 1e-3);
        assert_eq!(explosion_envelope(1.0), 0.0);
        assert!((explosion_envelope(0.5) - 1.0).abs() < 1e-6);
        let samples: Vec<f32> = (0..=100).map(|i| explosion_envelope(i as f32 / 100.0)).collect();
        assert!(samples.iter().all(|&s| s >= 0.0));
        assert!(samples[..=50].windows(2).all(|w| w[1] >= w[0]));
        assert!(samples[50..].windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn envelope_clamps_out_of_range_progress() {
        assert_eq!(explosion_envelope(-1.0), 0.0);
        assert_eq!(explosion_envelope(2.0), 0.0);
    }

    #[test]
    fn scale_follows_age() {
        let mut e = Explosion::new(Vec3::ZERO, 2.0);
        assert_eq!(e.scale(20.0), 0.0);
        e.update(1.0);
        assert!((e.scale(20.0) - 20.0).abs() < 1e-4);
    }

    #[test]
    fn expired_explosions_are_removed() {
        let mut explosions = vec![Explosion::new(Vec3::ZERO, 0.5), Explosion::new(Vec3::ONE, 1.5)];
        update_explosions(&mut explosions, 0.5);
        assert_eq!(explosions.len(), 1);
        assert_eq!(explosions[0].position, Vec3::ONE);
        update_explosions(&mut explosions, 1.0);
        assert!(explosions.is_empty());
    }
}

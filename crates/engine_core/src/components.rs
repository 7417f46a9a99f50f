//! Small components shared by short-lived entities.

/// Fraction of a step below which a remaining lifetime counts as spent. Absorbs the float
/// error of repeatedly subtracting a fixed step (e.g. ten steps of 0.1 from 1.0), so a
/// lifetime of `L` lasts `ceil(L / dt)` updates. Lifetimes within `dt / 1000` above a whole
/// number of steps round down to that number.
pub const LIFETIME_STEP_TOLERANCE: f32 = 1e-3;

/// Lifetime component for temporary entities (projectiles, explosions).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    pub remaining: f32,
    pub total: f32,
}

impl Lifetime {
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds,
            total: seconds,
        }
    }

    /// Count down by `dt`. Returns `true` once expired.
    pub fn update(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        if self.remaining <= dt * LIFETIME_STEP_TOLERANCE {
            self.remaining = self.remaining.min(0.0);
        }
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Elapsed fraction of the total lifetime, clamped to `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.total <= 0.0 {
            return 1.0;
        }
        (1.0 - self.remaining / self.total).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetime_expires_after_whole_steps() {
        let mut life = Lifetime::new(1.0);
        let mut steps = 0;
        while !life.update(0.1) {
            steps += 1;
            assert!(steps < 100);
        }
        assert_eq!(steps + 1, 10);
    }

    fn updates_until_expired(seconds: f32, dt: f32) -> u32 {
        let mut life = Lifetime::new(seconds);
        let mut updates = 1;
        while !life.update(dt) {
            updates += 1;
            assert!(updates < 10_000);
        }
        updates
    }

    #[test]
    fn tolerance_scales_with_step() {
        // Half a thousandth of a second left over is more than a small step's tolerance.
        assert_eq!(updates_until_expired(0.10005, 0.01), 11);
        assert_eq!(updates_until_expired(0.1, 0.01), 10);
        assert_eq!(updates_until_expired(1.2, 1.0 / 120.0), 144);
        assert_eq!(updates_until_expired(3.0, 0.1), 30);
    }

    #[test]
    fn progress_runs_from_zero_to_one() {
        let mut life = Lifetime::new(2.0);
        assert_eq!(life.progress(), 0.0);
        life.update(1.0);
        assert!((life.progress() - 0.5).abs() < 1e-6);
        life.update(5.0);
        assert_eq!(life.progress(), 1.0);
    }

    #[test]
    fn zero_total_is_already_finished() {
        let life = Lifetime::new(0.0);
        assert!(life.is_expired());
        assert_eq!(life.progress(), 1.0);
    }
}

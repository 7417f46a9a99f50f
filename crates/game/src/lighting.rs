//! Day/night cycle: a time-of-day clock driving sun direction, light and sky colors.

use glam::Vec3;
use renderer::Lighting;

use crate::config::DayNightTuning;

const NOON: f32 = 12.0;
const MIDNIGHT: f32 = 0.0;

const DAY_SUN: Vec3 = Vec3::new(1.0, 0.95, 0.85);
const NIGHT_MOON: Vec3 = Vec3::new(0.18, 0.22, 0.35);
const DAY_AMBIENT: Vec3 = Vec3::new(0.3, 0.3, 0.32);
const NIGHT_AMBIENT: Vec3 = Vec3::new(0.04, 0.05, 0.09);
const DAY_SKY: Vec3 = Vec3::new(0.45, 0.65, 0.9);
const NIGHT_SKY: Vec3 = Vec3::new(0.02, 0.02, 0.06);
const DUSK_SKY: Vec3 = Vec3::new(0.85, 0.45, 0.3);

#[derive(Debug, Clone)]
pub struct DayNightCycle {
    /// Hours in `[0, 24)`.
    hours: f32,
    hours_per_second: f32,
}

impl DayNightCycle {
    pub fn new(tuning: &DayNightTuning) -> Self {
        Self {
            hours: tuning.start_hour.rem_euclid(24.0),
            hours_per_second: tuning.hours_per_second,
        }
    }

    pub fn hours(&self) -> f32 {
        self.hours
    }

    pub fn advance(&mut self, dt: f32) {
        self.hours = (self.hours + self.hours_per_second * dt).rem_euclid(24.0);
    }

    pub fn is_day(&self) -> bool {
        self.sun_elevation() > 0.0
    }

    /// Jump to midnight during the day and to noon at night.
    pub fn toggle(&mut self) {
        self.hours = if self.is_day() { MIDNIGHT } else { NOON };
        log::info!("Time of day set to {:02.0}:00", self.hours);
    }

    /// Sine of the sun's angle above the horizon: 1 at noon, -1 at midnight.
    pub fn sun_elevation(&self) -> f32 {
        self.sun_angle().sin()
    }

    /// 0 in full night, 1 in full day, blended around sunrise and sunset.
    pub fn daylight(&self) -> f32 {
        (self.sun_elevation() * 3.0 + 0.5).clamp(0.0, 1.0)
    }

    pub fn lighting(&self) -> Lighting {
        let angle = self.sun_angle();
        let to_sun = Vec3::new(angle.cos(), angle.sin(), 0.35)
            .try_normalize()
            .unwrap_or(Vec3::Y);
        // At night the moon sits opposite the sun.
        let to_light = if to_sun.y >= 0.0 { to_sun } else { -to_sun };

        let day = self.daylight();
        // Warm horizon glow peaks when the sun is near the horizon.
        let dusk = (1.0 - (self.sun_elevation().abs() * 4.0)).clamp(0.0, 1.0) * 0.6;
        let sky = NIGHT_SKY.lerp(DAY_SKY, day).lerp(DUSK_SKY, dusk);

        Lighting {
            sun_direction: -to_light,
            sun_color: NIGHT_MOON.lerp(DAY_SUN, day),
            ambient: NIGHT_AMBIENT.lerp(DAY_AMBIENT, day),
            sky_color: sky,
        }
    }

    /// 06:00 on the horizon, 12:00 overhead, 18:00 setting.
    fn sun_angle(&self) -> f32 {
        (self.hours - 6.0) / 12.0 * std::f32::consts::PI
    }
}

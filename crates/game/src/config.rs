//! Game configuration (window, assets, tuning). Loaded from config.ron at startup.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::aircraft::ModelBasis;
use crate::parts::PartNames;

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Enable vsync (recommended to avoid tearing).
    #[serde(default = "default_true")]
    pub vsync: bool,
    /// Start in fullscreen.
    #[serde(default)]
    pub fullscreen: bool,
    /// Mouse sensitivity multiplier (1.0 = default).
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Seed for enemy spawning. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Simulation rate in Hz.
    #[serde(default = "default_fixed_rate")]
    pub fixed_rate: f64,
    #[serde(default)]
    pub assets: AssetPaths,
    #[serde(default)]
    pub aircraft_basis: ModelBasis,
    #[serde(default)]
    pub part_names: PartNames,
    #[serde(default)]
    pub flight: FlightTuning,
    #[serde(default)]
    pub enemies: EnemyTuning,
    #[serde(default)]
    pub combat: CombatTuning,
    #[serde(default)]
    pub camera: CameraTuning,
    #[serde(default)]
    pub city: CityTuning,
    #[serde(default)]
    pub day_night: DayNightTuning,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_true() -> bool {
    true
}
fn default_sensitivity() -> f32 {
    1.0
}
fn default_fixed_rate() -> f64 {
    60.0
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            vsync: default_true(),
            fullscreen: false,
            sensitivity: default_sensitivity(),
            seed: None,
            fixed_rate: default_fixed_rate(),
            assets: AssetPaths::default(),
            aircraft_basis: ModelBasis::default(),
            part_names: PartNames::default(),
            flight: FlightTuning::default(),
            enemies: EnemyTuning::default(),
            combat: CombatTuning::default(),
            camera: CameraTuning::default(),
            city: CityTuning::default(),
            day_night: DayNightTuning::default(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(data) => Self::parse(&data).unwrap_or_else(|e| {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }),
            Err(_) => {
                log::info!("No config at {:?}, using defaults", path);
                Self::default()
            }
        }
    }

    /// Parse a RON document; omitted fields take their defaults.
    pub fn parse(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.ron")
}

/// Model files. Missing files fall back to built-in block geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub city_model: PathBuf,
    pub aircraft_model: PathBuf,
    pub enemy_model: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            city_model: PathBuf::from("assets/city.glb"),
            aircraft_model: PathBuf::from("assets/aircraft.glb"),
            enemy_model: PathBuf::from("assets/enemy.glb"),
        }
    }
}

/// Player aircraft handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    pub initial_position: Vec3,
    pub initial_speed: f32,
    /// Speed change per second while a throttle key is held.
    pub acceleration: f32,
    pub max_speed: f32,
    /// Yaw and pitch rate in radians per second.
    pub turn_rate: f32,
    /// Degrees per second a control surface moves toward its deployed extreme.
    pub surface_rate: f32,
    /// Degrees per second a released control surface returns to neutral.
    pub surface_relax_rate: f32,
    /// Released surfaces within this many degrees of neutral snap to it.
    pub surface_dead_zone: f32,
    /// Propeller degrees per second per unit of speed.
    pub propeller_rate: f32,
    /// Sphere radius tested against the city.
    pub collision_radius: f32,
    pub model_scale: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            initial_position: Vec3::new(0.0, 150.0, -300.0),
            initial_speed: 30.0,
            acceleration: 20.0,
            max_speed: 150.0,
            turn_rate: 1.0,
            surface_rate: 90.0,
            surface_relax_rate: 60.0,
            surface_dead_zone: 0.5,
            propeller_rate: 30.0,
            collision_radius: 3.0,
            model_scale: 1.0,
        }
    }
}

/// Enemy spawning and movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub spawn_interval: f32,
    pub max_enemies: usize,
    pub spawn_radius_min: f32,
    pub spawn_radius_max: f32,
    pub spawn_altitude: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Horizontal distance at which an enemy picks a new target.
    pub retarget_distance: f32,
    /// Targets are drawn from a disk of this radius around the origin.
    pub target_area_radius: f32,
    pub target_altitude_min: f32,
    pub target_altitude_max: f32,
    pub propeller_rate: f32,
    pub model_scale: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            spawn_interval: 3.0,
            max_enemies: 8,
            spawn_radius_min: 200.0,
            spawn_radius_max: 400.0,
            spawn_altitude: 120.0,
            speed_min: 30.0,
            speed_max: 60.0,
            retarget_distance: 30.0,
            target_area_radius: 400.0,
            target_altitude_min: 80.0,
            target_altitude_max: 200.0,
            propeller_rate: 30.0,
            model_scale: 1.0,
        }
    }
}

/// Projectiles and explosions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    pub bullet_speed: f32,
    pub bullet_life: f32,
    /// Lateral distance of each gun from the centerline.
    pub wing_offset: f32,
    pub forward_offset: f32,
    pub vertical_offset: f32,
    /// A projectile closer than this to an enemy destroys it.
    pub hit_radius: f32,
    pub explosion_life: f32,
    pub explosion_scale: f32,
    pub bullet_scale: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            bullet_speed: 400.0,
            bullet_life: 3.0,
            wing_offset: 8.0,
            forward_offset: 4.0,
            vertical_offset: -0.5,
            hit_radius: 20.0,
            explosion_life: 1.5,
            explosion_scale: 20.0,
            bullet_scale: 0.6,
        }
    }
}

/// Chase camera.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    /// Degrees per pixel of mouse movement, before the global sensitivity multiplier.
    pub orbit_sensitivity: f32,
    pub fov_degrees: f32,
    pub far: f32,
    /// Point the camera orbits, in the aircraft's local frame.
    pub visual_offset: Vec3,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            distance: 15.0,
            min_distance: 5.0,
            max_distance: 50.0,
            yaw_degrees: 90.0,
            pitch_degrees: 20.0,
            orbit_sensitivity: 0.1,
            fov_degrees: 60.0,
            far: 5000.0,
            visual_offset: Vec3::new(0.0, 3.0, 0.0),
        }
    }
}

/// City placement and the procedural fallback layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CityTuning {
    pub position: Vec3,
    pub scale: f32,
    /// Meshes taller than this (in world units) are not obstacles.
    pub max_obstacle_height: f32,
    pub grid_size: u32,
    pub block_size: f32,
    pub street_width: f32,
    pub building_height_min: f32,
    pub building_height_max: f32,
    pub layout_seed: u64,
}

impl Default for CityTuning {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: 1.0,
            max_obstacle_height: 500.0,
            grid_size: 8,
            block_size: 40.0,
            street_width: 30.0,
            building_height_min: 20.0,
            building_height_max: 110.0,
            layout_seed: 7,
        }
    }
}

/// Time-of-day clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DayNightTuning {
    pub start_hour: f32,
    /// Clock hours per real second; 0 freezes the time of day.
    pub hours_per_second: f32,
}

impl Default for DayNightTuning {
    fn default() -> Self {
        Self {
            start_hour: 12.0,
            hours_per_second: 0.02,
        }
    }
}

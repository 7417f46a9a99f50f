//! Scene state and the per-step simulation order.

use input::{FlightControls, RisingEdge};
use physics::CityColliders;
use renderer::OrbitCamera;

use crate::aircraft::{Aircraft, ModelBasis, MoveOutcome};
use crate::camera_follow;
use crate::config::{CameraTuning, CombatTuning, EnemyTuning, FlightTuning, GameConfig};
use crate::effects::{update_explosions, Explosion};
use crate::enemy::Enemy;
use crate::lighting::DayNightCycle;
use crate::random::RandomSource;
use crate::spawner::EnemySpawner;
use crate::weapons::{fire_pair, update_projectiles, Projectile};

/// Tuning the simulation reads every step.
#[derive(Debug, Clone, Default)]
pub struct SceneTuning {
    pub flight: FlightTuning,
    pub enemies: EnemyTuning,
    pub combat: CombatTuning,
    pub camera: CameraTuning,
}

impl SceneTuning {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            flight: config.flight.clone(),
            enemies: config.enemies.clone(),
            combat: config.combat.clone(),
            camera: config.camera.clone(),
        }
    }
}

/// What happened during one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub shots_fired: u32,
    pub enemies_spawned: u32,
    pub enemies_destroyed: u32,
    /// The aircraft's move was rejected by the city.
    pub blocked: bool,
}

/// Running totals since the scene started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub steps: u64,
    pub shots_fired: u32,
    pub enemies_spawned: u32,
    pub enemies_destroyed: u32,
    pub blocked_steps: u64,
}

impl SceneStats {
    fn record(&mut self, report: &FrameReport) {
        self.steps += 1;
        self.shots_fired += report.shots_fired;
        self.enemies_spawned += report.enemies_spawned;
        self.enemies_destroyed += report.enemies_destroyed;
        self.blocked_steps += u64::from(report.blocked);
    }
}

/// Everything the flight scene owns. Nothing lives outside it.
pub struct SceneState {
    pub aircraft: Aircraft,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    pub spawner: EnemySpawner,
    pub camera: OrbitCamera,
    pub city: CityColliders,
    pub day_night: DayNightCycle,
    pub tuning: SceneTuning,
    pub stats: SceneStats,
    fire_trigger: RisingEdge,
    /// A press seen by `handle_frame_input` that no step has consumed yet.
    fire_pending: bool,
}

impl SceneState {
    pub fn new(config: &GameConfig, city: CityColliders) -> Self {
        let tuning = SceneTuning::from_config(config);
        let aircraft = Aircraft::new(&tuning.flight, config.aircraft_basis);
        let mut camera = camera_follow::create_camera(&tuning.camera, config.sensitivity);
        camera_follow::follow(&mut camera, &aircraft, &tuning.camera);
        Self {
            aircraft,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            explosions: Vec::new(),
            spawner: EnemySpawner::new(),
            camera,
            city,
            day_night: DayNightCycle::new(&config.day_night),
            tuning,
            stats: SceneStats::default(),
            fire_trigger: RisingEdge::default(),
            fire_pending: false,
        }
    }

    /// Scene from explicit tuning; every other setting takes its config default.
    #[cfg(test)]
    pub fn with_tuning(tuning: SceneTuning, basis: ModelBasis, city: CityColliders) -> Self {
        let config = GameConfig {
            aircraft_basis: basis,
            flight: tuning.flight,
            enemies: tuning.enemies,
            combat: tuning.combat,
            camera: tuning.camera,
            ..Default::default()
        };
        Self::new(&config, city)
    }

    /// Once-per-frame input that must not repeat with the number of steps: camera orbit,
    /// zoom, and the day/night toggle. A fire press is held over until the next step, so
    /// taps on frames that run no step still fire.
    pub fn handle_frame_input(&mut self, controls: &FlightControls) {
        self.fire_pending |= controls.fire_pressed;
        camera_follow::apply_orbit_input(&mut self.camera, controls);
        if controls.toggle_day_night {
            self.day_night.toggle();
        }
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Order: flight, fire, enemy spawn, enemy movement, explosion ageing, projectiles
    /// and hits, camera. Explosions created by hits this step are appended after the
    /// ageing pass, so they start ageing on the next step.
    pub fn step<R: RandomSource + ?Sized>(
        &mut self,
        controls: &FlightControls,
        rng: &mut R,
        dt: f32,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        self.day_night.advance(dt);

        let outcome = self
            .aircraft
            .update(controls, &self.tuning.flight, &self.city, dt);
        report.blocked = outcome == MoveOutcome::Blocked;

        let pending = std::mem::take(&mut self.fire_pending);
        if self.fire_trigger.update(controls.fire) || pending {
            self.projectiles
                .extend(fire_pair(&self.aircraft, &self.tuning.combat));
            report.shots_fired = 2;
        }

        if self
            .spawner
            .update(&mut self.enemies, &self.tuning.enemies, &mut *rng, dt)
        {
            report.enemies_spawned = 1;
        }
        for enemy in &mut self.enemies {
            enemy.update(&self.tuning.enemies, &mut *rng, dt);
        }

        update_explosions(&mut self.explosions, dt);
        report.enemies_destroyed = update_projectiles(
            &mut self.projectiles,
            &mut self.enemies,
            &mut self.explosions,
            &self.tuning.combat,
            dt,
        );

        camera_follow::follow(&mut self.camera, &self.aircraft, &self.tuning.camera);

        self.stats.record(&report);
        report
    }
}

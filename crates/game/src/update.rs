//! Per-frame update: poll input once, then run the fixed-rate simulation steps.

use input::FlightControls;

use crate::STATS_LOG_INTERVAL;

impl crate::GameState {
    pub(crate) fn update(&mut self) {
        self.time.update();

        let controls = FlightControls::from_input(&self.input);
        if controls.quit {
            log::info!("Quit requested");
            self.running = false;
        }
        self.scene.handle_frame_input(&controls);

        let dt = self.time.fixed_timestep_seconds();
        while self.time.should_fixed_update() {
            let report = self.scene.step(&controls, &mut self.rng, dt);
            if report.enemies_destroyed > 0 {
                log::info!(
                    "Enemy down ({} total, {} airborne)",
                    self.scene.stats.enemies_destroyed,
                    self.scene.enemies.len()
                );
            }
        }

        self.stats_timer += self.time.delta_seconds();
        if self.stats_timer >= STATS_LOG_INTERVAL {
            self.stats_timer = 0.0;
            let stats = &self.scene.stats;
            log::info!(
                "{:.0}s | {:.0} fps | speed {:.1} | shots {} | kills {} | enemies {}/{} spawned | blocked steps {}",
                self.time.elapsed_seconds(),
                self.time.fps(),
                self.scene.aircraft.speed,
                stats.shots_fired,
                stats.enemies_destroyed,
                self.scene.enemies.len(),
                self.scene.spawner.total_spawned,
                stats.blocked_steps
            );
        }

        // Clear input for next frame
        self.input.begin_frame();
    }
}

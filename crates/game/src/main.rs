//! Skystrike - fly over the city and shoot down enemy aircraft.

mod aircraft;
mod camera_follow;
mod city;
mod config;
mod effects;
mod enemy;
mod events;
mod lighting;
mod parts;
mod random;
mod render;
mod scene;
mod spawner;
mod update;
mod weapons;

use anyhow::Result;
use engine_core::Time;
use input::InputState;
use rand::rngs::StdRng;
use rand::SeedableRng;
use renderer::{ModelData, Renderer};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowId},
};

use city::CityLayout;
use config::GameConfig;
use render::SceneMeshes;
use scene::SceneState;

/// Seconds between periodic stats lines in the log.
const STATS_LOG_INTERVAL: f32 = 10.0;

/// Everything alive while the window is open.
pub struct GameState {
    window: Arc<Window>,
    renderer: Renderer,
    input: InputState,
    time: Time,
    rng: StdRng,
    scene: SceneState,
    meshes: SceneMeshes,
    running: bool,
    stats_timer: f32,
}

impl GameState {
    async fn new(window: Arc<Window>, config: GameConfig) -> Result<Self> {
        let mut renderer = Renderer::new(window.clone(), config.vsync).await?;

        let city_model = ModelData::load_or_empty(&config.assets.city_model);
        let city = CityLayout::load(&city_model, &config.city);
        let aircraft_model = ModelData::load_or_empty(&config.assets.aircraft_model);
        let enemy_model = ModelData::load_or_empty(&config.assets.enemy_model);
        let meshes = SceneMeshes::build(&config, &city, &aircraft_model, &enemy_model, |g| {
            renderer.upload_mesh(g)
        });

        let mut scene = SceneState::new(&config, city.colliders);
        let (width, height) = renderer.dimensions();
        scene.camera.set_aspect(width, height);

        let rng = match config.seed {
            Some(seed) => {
                log::info!("Using spawn seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        let mut time = Time::new();
        time.set_fixed_rate(config.fixed_rate);

        Ok(Self {
            window,
            renderer,
            input: InputState::new(),
            time,
            rng,
            scene,
            meshes,
            running: true,
            stats_timer: 0.0,
        })
    }

    fn render(&mut self) -> Result<()> {
        render::run(self)
    }
}

/// Application handler for winit.
struct App {
    state: Option<GameState>,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let config = GameConfig::load();
            let mut window_attrs = Window::default_attributes()
                .with_title("Skystrike")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    config.window_width,
                    config.window_height,
                ));
            if config.fullscreen {
                window_attrs = window_attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
            }

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let state = pollster::block_on(GameState::new(window.clone(), config));
            match state {
                Ok(s) => {
                    self.state = Some(s);
                    window.request_redraw();
                }
                Err(e) => {
                    log::error!("Failed to initialize game: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                event_loop.exit();
            }
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let Some(state) = &mut self.state {
            state.handle_device_event(event);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Skystrike");
    println!("  W / Shift      - Throttle up      S / Ctrl     - Throttle down");
    println!("  A / D          - Yaw left/right   Up / Down    - Pitch up/down");
    println!("  Space / Click  - Fire             N            - Day / night");
    println!("  Mouse / Wheel  - Orbit / zoom     Escape       - Quit");

    log::info!("Starting Skystrike");

    let event_loop = EventLoop::new()?;
    // Poll so the simulation keeps stepping without waiting for input events.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}

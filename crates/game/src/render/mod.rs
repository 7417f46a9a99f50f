//! Rendering: turn the scene into instanced draw batches for the renderer.

use anyhow::Result;
use glam::{Mat4, Quat, Vec3};
use renderer::{DrawBatch, MeshGeometry, MeshHandle, ModelData};
use std::collections::HashMap;

use crate::aircraft::ModelBasis;
use crate::city::CityLayout;
use crate::config::GameConfig;
use crate::parts::{block_aircraft, PartAngles, PartRig};
use crate::scene::SceneState;
use crate::GameState;

const CITY_COLOR: Vec3 = Vec3::new(0.58, 0.58, 0.62);
const AIRCRAFT_COLOR: Vec3 = Vec3::new(0.85, 0.75, 0.3);
const ENEMY_COLOR: Vec3 = Vec3::new(0.7, 0.18, 0.15);
const BULLET_COLOR: Vec3 = Vec3::new(1.0, 0.9, 0.4);
const EXPLOSION_COLOR: Vec3 = Vec3::new(1.0, 0.5, 0.1);

/// Uploaded meshes for everything the scene draws.
pub struct SceneMeshes {
    pub city: MeshHandle,
    pub city_world: Mat4,
    pub aircraft: PartRig,
    pub enemy: PartRig,
    pub bullet: MeshHandle,
    pub explosion: MeshHandle,
}

impl SceneMeshes {
    /// Rig the models and upload every mesh through `upload`. Empty aircraft or enemy
    /// models are replaced by block geometry.
    pub fn build<F>(
        config: &GameConfig,
        city: &CityLayout,
        aircraft_model: &ModelData,
        enemy_model: &ModelData,
        mut upload: F,
    ) -> Self
    where
        F: FnMut(&MeshGeometry) -> MeshHandle,
    {
        let fallback = || block_aircraft(&config.part_names);
        let aircraft_model = if aircraft_model.is_empty() {
            log::warn!("Aircraft model unavailable, using block aircraft");
            fallback()
        } else {
            aircraft_model.clone()
        };
        let enemy_model = if enemy_model.is_empty() {
            log::warn!("Enemy model unavailable, using block aircraft");
            fallback()
        } else {
            enemy_model.clone()
        };

        Self {
            city: upload(&city.geometry),
            city_world: city.world,
            aircraft: PartRig::build(&aircraft_model, &config.part_names, &mut upload),
            enemy: PartRig::build(&enemy_model, &config.part_names, &mut upload),
            bullet: upload(&MeshGeometry::cube()),
            explosion: upload(&MeshGeometry::sphere(16, 12)),
        }
    }
}

/// Collects instances per mesh, keeping first-seen mesh order.
#[derive(Default)]
struct BatchSet {
    index: HashMap<MeshHandle, usize>,
    batches: Vec<DrawBatch>,
}

impl BatchSet {
    fn push(&mut self, mesh: MeshHandle, model: Mat4, color: Vec3, emissive: f32) {
        if mesh.is_none() {
            return;
        }
        let slot = *self.index.entry(mesh).or_insert_with(|| {
            self.batches.push(DrawBatch::new(mesh));
            self.batches.len() - 1
        });
        self.batches[slot].push(model, color, emissive);
    }
}

/// Draw batches for the current scene state.
pub fn build_batches(scene: &SceneState, meshes: &SceneMeshes) -> Vec<DrawBatch> {
    let mut set = BatchSet::default();

    set.push(meshes.city, meshes.city_world, CITY_COLOR, 0.0);

    let aircraft = &scene.aircraft;
    let aircraft_model = aircraft
        .transform
        .with_uniform_scale(scene.tuning.flight.model_scale)
        .to_matrix();
    for (mesh, model) in meshes.aircraft.instances(
        aircraft_model,
        aircraft.basis(),
        PartAngles::of_aircraft(aircraft),
    ) {
        set.push(mesh, model, AIRCRAFT_COLOR, 0.0);
    }

    // Enemy models are authored nose +Z, up +Y.
    let enemy_basis = ModelBasis::default();
    for enemy in &scene.enemies {
        let model = enemy.model_matrix(scene.tuning.enemies.model_scale);
        for (mesh, part_model) in
            meshes
                .enemy
                .instances(model, &enemy_basis, PartAngles::of_enemy(enemy))
        {
            set.push(mesh, part_model, ENEMY_COLOR, 0.0);
        }
    }

    let bullet_scale = Vec3::new(0.3, 0.3, 2.0) * scene.tuning.combat.bullet_scale;
    for p in &scene.projectiles {
        let facing = Quat::from_rotation_arc(Vec3::Z, p.velocity.try_normalize().unwrap_or(Vec3::Z));
        let model = Mat4::from_scale_rotation_translation(bullet_scale, facing, p.position);
        set.push(meshes.bullet, model, BULLET_COLOR, 1.0);
    }

    for e in &scene.explosions {
        let scale = e.scale(scene.tuning.combat.explosion_scale);
        if scale <= 0.0 {
            continue;
        }
        let model = Mat4::from_scale_rotation_translation(Vec3::splat(scale), Quat::IDENTITY, e.position);
        set.push(meshes.explosion, model, EXPLOSION_COLOR, 0.8);
    }

    set.batches
}

/// Render one frame. Called from `GameState::render()`.
pub fn run(state: &mut GameState) -> Result<()> {
    let (width, height) = state.renderer.dimensions();
    state.scene.camera.set_aspect(width, height);
    let batches = build_batches(&state.scene, &state.meshes);
    let lighting = state.scene.day_night.lighting();
    state
        .renderer
        .draw_frame(&state.scene.camera, &lighting, &batches)
}

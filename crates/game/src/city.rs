//! The static city: render geometry plus the obstacle boxes the aircraft collides with.

use engine_core::Aabb;
use glam::{Mat4, Quat, Vec3};
use physics::CityColliders;
use rand::rngs::StdRng;
use rand::SeedableRng;
use renderer::{MeshGeometry, ModelData};

use crate::config::CityTuning;
use crate::random::RandomSource;

/// Depth of the ground slab under the procedural city.
const GROUND_THICKNESS: f32 = 2.0;

pub struct CityLayout {
    /// Geometry in the city's model space.
    pub geometry: MeshGeometry,
    /// Model-space to world-space placement.
    pub world: Mat4,
    pub colliders: CityColliders,
}

impl CityLayout {
    /// City from a loaded model. Obstacles come from each mesh's bounds.
    pub fn from_model(model: &ModelData, tuning: &CityTuning) -> Self {
        let world = Mat4::from_scale_rotation_translation(
            Vec3::splat(tuning.scale),
            Quat::IDENTITY,
            tuning.position,
        );
        let colliders = CityColliders::from_mesh_bounds(
            model.meshes.iter().map(|m| &m.bounds),
            &world,
            tuning.max_obstacle_height,
        );
        Self {
            geometry: model.merged_geometry(),
            world,
            colliders,
        }
    }

    /// Grid of blocks with seeded random heights, on a ground slab.
    pub fn procedural(tuning: &CityTuning) -> Self {
        let mut rng = StdRng::seed_from_u64(tuning.layout_seed);
        let n = tuning.grid_size.max(1);
        let pitch = tuning.block_size + tuning.street_width;
        let extent = n as f32 * pitch;
        let origin = tuning.position - Vec3::new(extent, 0.0, extent) * 0.5;

        let mut boxes = Vec::with_capacity((n * n + 1) as usize);
        let margin = pitch * 2.0;
        boxes.push(Aabb::new(
            origin + Vec3::new(-margin, -GROUND_THICKNESS, -margin),
            origin + Vec3::new(extent + margin, 0.0, extent + margin),
        ));
        for row in 0..n {
            for col in 0..n {
                let height = rng.range(tuning.building_height_min, tuning.building_height_max);
                let min = origin
                    + Vec3::new(
                        col as f32 * pitch + tuning.street_width * 0.5,
                        0.0,
                        row as f32 * pitch + tuning.street_width * 0.5,
                    );
                let max = min + Vec3::new(tuning.block_size, height, tuning.block_size);
                boxes.push(Aabb::new(min, max));
            }
        }

        let mut geometry = MeshGeometry::default();
        for b in &boxes {
            geometry.append(&MeshGeometry::block(b));
        }
        log::info!("Procedural city: {} buildings", boxes.len() - 1);
        Self {
            geometry,
            world: Mat4::IDENTITY,
            colliders: CityColliders::from_world_boxes(boxes),
        }
    }

    /// Use the model when it has meshes, otherwise the procedural layout.
    pub fn load(model: &ModelData, tuning: &CityTuning) -> Self {
        if model.is_empty() {
            log::warn!("City model unavailable, generating a procedural city");
            Self::procedural(tuning)
        } else {
            Self::from_model(model, tuning)
        }
    }
}

//! Static city obstacles.

use engine_core::Aabb;
use glam::Mat4;

use crate::collision::sphere_intersects_box;

/// World-space boxes the player aircraft may not enter.
#[derive(Debug, Clone, Default)]
pub struct CityColliders {
    boxes: Vec<Aabb>,
}

impl CityColliders {
    /// Build colliders from mesh-local bounds and the city's model matrix.
    ///
    /// Each box is re-derived in world space from its transformed corners. Boxes taller than
    /// `max_obstacle_height` after the transform are skipped: in the city asset these are
    /// skyboxes, ground sheets and other scenery that is not a real obstacle.
    pub fn from_mesh_bounds<'a, I>(local_bounds: I, world: &Mat4, max_obstacle_height: f32) -> Self
    where
        I: IntoIterator<Item = &'a Aabb>,
    {
        let mut boxes = Vec::new();
        let mut skipped = 0usize;
        for local in local_bounds {
            let world_box = local.transformed(world);
            if world_box.height() > max_obstacle_height {
                skipped += 1;
                continue;
            }
            boxes.push(world_box);
        }
        log::info!(
            "City colliders: {} obstacles ({} skipped as taller than {})",
            boxes.len(),
            skipped,
            max_obstacle_height
        );
        Self { boxes }
    }

    /// Colliders from boxes already in world space.
    pub fn from_world_boxes(boxes: Vec<Aabb>) -> Self {
        Self { boxes }
    }

    /// True if a sphere at `center` overlaps any obstacle.
    pub fn blocks_sphere(&self, center: glam::Vec3, radius: f32) -> bool {
        self.boxes
            .iter()
            .any(|b| sphere_intersects_box(center, radius, b))
    }

    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

//! glTF model provider: named meshes with local bounds, baked into model space.

use crate::mesh::MeshGeometry;
use crate::vertex::Vertex;
use engine_core::Aabb;
use glam::{Mat3, Mat4, Vec3};
use std::path::Path;

/// Error type for model loading.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to load glTF file: {0}")]
    Load(#[from] gltf::Error),

    #[error("model {0} contains no triangle meshes")]
    NoMeshes(String),
}

/// One named mesh of a model. Node transforms are already applied to the geometry.
#[derive(Debug, Clone)]
pub struct ModelMesh {
    pub name: String,
    pub bounds: Aabb,
    pub geometry: MeshGeometry,
}

#[derive(Debug, Clone, Default)]
pub struct ModelData {
    pub meshes: Vec<ModelMesh>,
}

impl ModelData {
    /// Load every mesh of a `.gltf`/`.glb` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let (document, buffers, _images) = gltf::import(path)?;

        let mut meshes = Vec::new();
        let scene = document.default_scene().or_else(|| document.scenes().next());
        match scene {
            Some(scene) => {
                for node in scene.nodes() {
                    collect_node(&node, Mat4::IDENTITY, &buffers, &mut meshes);
                }
            }
            // Scene-less files: take meshes as authored.
            None => {
                for mesh in document.meshes() {
                    push_mesh(&mesh, None, Mat4::IDENTITY, &buffers, &mut meshes);
                }
            }
        }

        if meshes.is_empty() {
            return Err(ModelError::NoMeshes(path.display().to_string()));
        }
        log::info!("Loaded model {} ({} meshes)", path.display(), meshes.len());
        Ok(Self { meshes })
    }

    /// Load a model, logging and returning an empty model on failure.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(model) => model,
            Err(e) => {
                log::warn!("Model {} unavailable: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Bounds of all meshes together.
    pub fn bounds(&self) -> Option<Aabb> {
        self.meshes
            .iter()
            .map(|m| m.bounds)
            .reduce(|a, b| a.union(&b))
    }

    pub fn find(&self, name: &str) -> Option<&ModelMesh> {
        self.meshes.iter().find(|m| m.name == name)
    }

    /// All meshes merged into one geometry.
    pub fn merged_geometry(&self) -> MeshGeometry {
        let mut merged = MeshGeometry::default();
        for mesh in &self.meshes {
            merged.append(&mesh.geometry);
        }
        merged
    }
}

fn collect_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<ModelMesh>,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        push_mesh(&mesh, node.name(), world, buffers, out);
    }
    for child in node.children() {
        collect_node(&child, world, buffers, out);
    }
}

fn push_mesh(
    mesh: &gltf::Mesh,
    node_name: Option<&str>,
    transform: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<ModelMesh>,
) {
    let normal_matrix = Mat3::from_mat4(transform).inverse().transpose();
    let mut geometry = MeshGeometry::default();

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            continue;
        }
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let positions: Vec<Vec3> = positions.map(Vec3::from).collect();
        let normals: Vec<Vec3> = reader
            .read_normals()
            .map(|iter| iter.map(Vec3::from).collect())
            .unwrap_or_else(|| vec![Vec3::Y; positions.len()]);
        let indices: Vec<u32> = reader
            .read_indices()
            .map(|iter| iter.into_u32().collect())
            .unwrap_or_else(|| (0..positions.len() as u32).collect());

        let part = MeshGeometry {
            vertices: positions
                .iter()
                .zip(normals.iter().chain(std::iter::repeat(&Vec3::Y)))
                .map(|(p, n)| {
                    let n = (normal_matrix * *n).try_normalize().unwrap_or(Vec3::Y);
                    Vertex::new(transform.transform_point3(*p).to_array(), n.to_array())
                })
                .collect(),
            indices,
        };
        geometry.append(&part);
    }

    let Some(bounds) = geometry.bounds() else {
        return;
    };
    let name = node_name
        .or_else(|| mesh.name())
        .map(str::to_owned)
        .unwrap_or_else(|| format!("mesh_{}", mesh.index()));
    out.push(ModelMesh {
        name,
        bounds,
        geometry,
    });
}

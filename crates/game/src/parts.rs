//! Animated aircraft parts. Mesh names are resolved to [`AircraftPart`] once, when a
//! model is loaded; per-frame animation only matches on the enum.

use engine_core::Aabb;
use glam::{Mat4, Quat, Vec3};
use renderer::{MeshGeometry, MeshHandle, ModelData, ModelMesh};
use serde::{Deserialize, Serialize};

use crate::aircraft::{Aircraft, ModelBasis};
use crate::enemy::Enemy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AircraftPart {
    Body,
    /// Spins about the forward axis.
    Propeller,
    /// Swings about the up axis.
    Rudder,
    /// Hinges about the right axis.
    Flaps,
}

/// Mesh names (exact match) that identify each animated part. Anything else is body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartNames {
    pub propeller: Vec<String>,
    pub rudder: Vec<String>,
    pub flaps: Vec<String>,
}

impl Default for PartNames {
    fn default() -> Self {
        Self {
            propeller: vec!["Propeller".into(), "propeller".into()],
            rudder: vec!["Rudder".into(), "rudder".into()],
            flaps: vec!["Flaps".into(), "flaps".into()],
        }
    }
}

impl PartNames {
    pub fn resolve(&self, mesh_name: &str) -> AircraftPart {
        let matches = |names: &[String]| names.iter().any(|n| n == mesh_name);
        if matches(&self.propeller) {
            AircraftPart::Propeller
        } else if matches(&self.rudder) {
            AircraftPart::Rudder
        } else if matches(&self.flaps) {
            AircraftPart::Flaps
        } else {
            AircraftPart::Body
        }
    }
}

/// Current deflections, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartAngles {
    pub propeller: f32,
    pub rudder: f32,
    pub flaps: f32,
}

impl PartAngles {
    pub fn of_aircraft(aircraft: &Aircraft) -> Self {
        Self {
            propeller: aircraft.propeller_angle,
            rudder: aircraft.rudder.angle(),
            flaps: aircraft.flaps.angle(),
        }
    }

    /// Enemies only spin their propeller.
    pub fn of_enemy(enemy: &Enemy) -> Self {
        Self {
            propeller: enemy.propeller_angle,
            ..Default::default()
        }
    }
}

/// Model-space transform of one part: rotate about its hinge axis through `pivot`.
pub fn part_matrix(part: AircraftPart, pivot: Vec3, basis: &ModelBasis, angles: &PartAngles) -> Mat4 {
    let (axis, degrees) = match part {
        AircraftPart::Body => return Mat4::IDENTITY,
        AircraftPart::Propeller => (basis.forward(), angles.propeller),
        AircraftPart::Rudder => (basis.up(), angles.rudder),
        AircraftPart::Flaps => (basis.right(), angles.flaps),
    };
    Mat4::from_translation(pivot)
        * Mat4::from_quat(Quat::from_axis_angle(axis, degrees.to_radians()))
        * Mat4::from_translation(-pivot)
}

/// One uploaded mesh of a model, tagged with its part and hinge point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiggedPart {
    pub part: AircraftPart,
    pub mesh: MeshHandle,
    /// Center of the mesh's local bounds.
    pub pivot: Vec3,
}

/// All parts of a model, resolved once at load time.
#[derive(Debug, Clone, Default)]
pub struct PartRig {
    pub parts: Vec<RiggedPart>,
}

impl PartRig {
    /// Resolve mesh names and upload each mesh through `upload`.
    pub fn build<F>(model: &ModelData, names: &PartNames, mut upload: F) -> Self
    where
        F: FnMut(&MeshGeometry) -> MeshHandle,
    {
        let parts = model
            .meshes
            .iter()
            .map(|mesh| RiggedPart {
                part: names.resolve(&mesh.name),
                mesh: upload(&mesh.geometry),
                pivot: mesh.bounds.center(),
            })
            .collect::<Vec<_>>();
        let animated = parts.iter().filter(|p| p.part != AircraftPart::Body).count();
        log::info!("Rigged {} meshes ({} animated)", parts.len(), animated);
        Self { parts }
    }

    /// World matrix for every part, given the whole model's world matrix.
    pub fn instances<'a>(
        &'a self,
        model: Mat4,
        basis: &'a ModelBasis,
        angles: PartAngles,
    ) -> impl Iterator<Item = (MeshHandle, Mat4)> + 'a {
        self.parts
            .iter()
            .map(move |p| (p.mesh, model * part_matrix(p.part, p.pivot, basis, &angles)))
    }
}

/// Block-built stand-in aircraft (nose toward +Z, up +Y) used when no model file is available.
pub fn block_aircraft(names: &PartNames) -> ModelData {
    let first = |list: &[String], fallback: &str| {
        list.first().cloned().unwrap_or_else(|| fallback.to_string())
    };
    let block = |name: String, min: Vec3, max: Vec3| {
        let bounds = Aabb::new(min, max);
        ModelMesh {
            name,
            bounds,
            geometry: MeshGeometry::block(&bounds),
        }
    };

    let mut body = MeshGeometry::default();
    for (min, max) in [
        // Fuselage
        (Vec3::new(-0.6, -0.6, -4.0), Vec3::new(0.6, 0.6, 3.0)),
        // Wings
        (Vec3::new(-5.0, -0.1, -0.5), Vec3::new(5.0, 0.1, 1.5)),
        // Tailplane
        (Vec3::new(-2.0, -0.1, -4.0), Vec3::new(2.0, 0.1, -3.0)),
        // Fin
        (Vec3::new(-0.1, 0.6, -3.2), Vec3::new(0.1, 2.2, -2.6)),
    ] {
        body.append(&MeshGeometry::block(&Aabb::new(min, max)));
    }
    let body_bounds = body.bounds().unwrap_or_else(|| Aabb::new(Vec3::ZERO, Vec3::ZERO));

    ModelData {
        meshes: vec![
            ModelMesh {
                name: "Body".to_string(),
                bounds: body_bounds,
                geometry: body,
            },
            block(
                first(&names.propeller, "Propeller"),
                Vec3::new(-1.8, -0.15, 3.1),
                Vec3::new(1.8, 0.15, 3.3),
            ),
            block(
                first(&names.rudder, "Rudder"),
                Vec3::new(-0.1, 0.6, -4.2),
                Vec3::new(0.1, 2.2, -3.2),
            ),
            block(
                first(&names.flaps, "Flaps"),
                Vec3::new(-5.0, -0.1, -1.0),
                Vec3::new(5.0, 0.1, -0.5),
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_by_exact_match() {
        let names = PartNames::default();
        assert_eq!(names.resolve("Propeller"), AircraftPart::Propeller);
        assert_eq!(names.resolve("rudder"), AircraftPart::Rudder);
        assert_eq!(names.resolve("Flaps"), AircraftPart::Flaps);
        assert_eq!(names.resolve("Propeller.001"), AircraftPart::Body);
        assert_eq!(names.resolve(""), AircraftPart::Body);
    }

    #[test]
    fn body_never_moves() {
        let angles = PartAngles {
            propeller: 90.0,
            rudder: 20.0,
            flaps: 30.0,
        };
        let m = part_matrix(AircraftPart::Body, Vec3::ONE, &ModelBasis::default(), &angles);
        assert_eq!(m, Mat4::IDENTITY);
    }

    #[test]
    fn parts_rotate_about_their_pivot() {
        let basis = ModelBasis::default();
        let pivot = Vec3::new(0.0, 0.0, 3.2);
        let angles = PartAngles {
            propeller: 90.0,
            ..Default::default()
        };
        let m = part_matrix(AircraftPart::Propeller, pivot, &basis, &angles);
        // The hub stays put; a blade tip swings a quarter turn about the nose axis.
        assert!((m.transform_point3(pivot) - pivot).length() < 1e-5);
        let tip = m.transform_point3(pivot + Vec3::X);
        assert!((tip - (pivot + Vec3::Y)).length() < 1e-5);
    }

    #[test]
    fn flaps_hinge_about_the_wing_axis() {
        let basis = ModelBasis::default();
        let angles = PartAngles {
            flaps: 90.0,
            ..Default::default()
        };
        let m = part_matrix(AircraftPart::Flaps, Vec3::ZERO, &basis, &angles);
        // Right axis is -X; points on it do not move.
        assert!((m.transform_point3(Vec3::NEG_X * 4.0) - Vec3::NEG_X * 4.0).length() < 1e-5);
        assert!((m.transform_point3(Vec3::Z) - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn rig_resolves_each_mesh_once() {
        let names = PartNames::default();
        let model = block_aircraft(&names);
        let mut uploads = 0;
        let rig = PartRig::build(&model, &names, |_| {
            uploads += 1;
            MeshHandle(uploads - 1)
        });
        assert_eq!(uploads, 4);
        let parts: Vec<AircraftPart> = rig.parts.iter().map(|p| p.part).collect();
        assert_eq!(
            parts,
            vec![
                AircraftPart::Body,
                AircraftPart::Propeller,
                AircraftPart::Rudder,
                AircraftPart::Flaps
            ]
        );
        let basis = ModelBasis::default();
        let placed: Vec<_> = rig
            .instances(Mat4::from_translation(Vec3::Y * 100.0), &basis, PartAngles::default())
            .collect();
        assert_eq!(placed.len(), 4);
        assert_eq!(placed[0].1, Mat4::from_translation(Vec3::Y * 100.0));
    }
}

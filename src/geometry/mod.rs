//! Geometry construction for every selectable shape.
//!
//! Each shape maps to one constructor. Vertex counts and ordering follow the
//! usual parametric conventions (a box has four vertices per face, spheres and
//! tori are `(segments + 1)` grids with a duplicated seam, polyhedra are
//! non-indexed with flat normals), which the particle outline relies on since
//! its rainbow gradient runs along vertex order.

mod polyhedron;
mod primitives;

use std::sync::Arc;

use glam::Vec3;

use crate::shape::ShapeType;
use crate::types::MeshVertex;

pub use polyhedron::{dodecahedron, icosahedron};
pub use primitives::{cone, cuboid, cylinder, plane, sphere, torus};

pub const SPHERE_SEGMENTS: u32 = 32;
pub const RADIAL_SEGMENTS: u32 = 32;
pub const TORUS_RADIAL_SEGMENTS: u32 = 16;
pub const TORUS_TUBULAR_SEGMENTS: u32 = 100;

/// Vertex positions, normals and optional triangle indices.
///
/// Positions live behind an `Arc` so a point cloud can share them with the
/// geometry it was projected from.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    positions: Arc<[[f32; 3]]>,
    normals: Vec<[f32; 3]>,
    indices: Option<Vec<u32>>,
}

impl Geometry {
    pub fn new(positions: Vec<[f32; 3]>, normals: Vec<[f32; 3]>, indices: Option<Vec<u32>>) -> Self {
        debug_assert_eq!(positions.len(), normals.len());
        Self {
            positions: positions.into(),
            normals,
            indices,
        }
    }

    /// Non-indexed triangle soup with normals derived from the faces
    pub fn from_triangles(positions: Vec<[f32; 3]>) -> Self {
        let normals = vec![[0.0; 3]; positions.len()];
        let mut geometry = Self::new(positions, normals, None);
        geometry.compute_vertex_normals();
        geometry
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Another handle to the same position storage
    pub fn shared_positions(&self) -> Arc<[[f32; 3]]> {
        Arc::clone(&self.positions)
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    /// Recomputes normals by accumulating face normals per vertex
    pub fn compute_vertex_normals(&mut self) {
        let positions: Vec<Vec3> = self.positions.iter().map(|p| Vec3::from_array(*p)).collect();
        let mut accumulated = vec![Vec3::ZERO; positions.len()];

        let face_normal = |a: usize, b: usize, c: usize| {
            let cb = positions[c] - positions[b];
            let ab = positions[a] - positions[b];
            cb.cross(ab)
        };

        match &self.indices {
            Some(indices) => {
                for tri in indices.chunks_exact(3) {
                    let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
                    let n = face_normal(a, b, c);
                    accumulated[a] += n;
                    accumulated[b] += n;
                    accumulated[c] += n;
                }
            }
            None => {
                for start in (0..positions.len() - positions.len() % 3).step_by(3) {
                    let n = face_normal(start, start + 1, start + 2);
                    accumulated[start] = n;
                    accumulated[start + 1] = n;
                    accumulated[start + 2] = n;
                }
            }
        }

        self.normals = accumulated
            .into_iter()
            .map(|n| n.normalize_or_zero().to_array())
            .collect();
    }

    /// Interleaved vertices for upload
    pub fn vertices(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(position, normal)| MeshVertex {
                position: *position,
                normal: *normal,
            })
            .collect()
    }
}

/// Builds the geometry for a shape. Unknown shapes fall back to a unit cube.
pub fn create_geometry(shape: &ShapeType) -> Geometry {
    match shape {
        ShapeType::Cube => cuboid(1.0, 1.0, 1.0),
        ShapeType::Sphere => sphere(1.0, SPHERE_SEGMENTS, SPHERE_SEGMENTS),
        ShapeType::Cone => cone(1.0, 2.0, RADIAL_SEGMENTS),
        ShapeType::Torus => torus(1.0, 0.4, TORUS_RADIAL_SEGMENTS, TORUS_TUBULAR_SEGMENTS),
        ShapeType::Cylinder => cylinder(1.0, 1.0, 2.0, RADIAL_SEGMENTS),
        ShapeType::Dodecahedron => dodecahedron(1.0),
        ShapeType::Icosahedron => icosahedron(1.0),
        ShapeType::Plane => plane(1.0, 1.0),
        ShapeType::Triangle => triangle(),
        ShapeType::Unknown => {
            log::warn!("Unknown shape requested, falling back to cube");
            cuboid(1.0, 1.0, 1.0)
        }
    }
}

/// The one hand-built shape: a single tilted triangle
pub fn triangle() -> Geometry {
    Geometry::from_triangles(vec![
        [0.0, 1.0, 0.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, -1.0],
    ])
}

//! Triangle mesh buffers and bounds.

use scribble_math::{Point3, Transform, Vec3};
use serde::{Deserialize, Serialize};

/// A triangle mesh with flat GPU-ready buffers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
    /// Flat array of texture coordinates: `[u0, v0, u1, v1, ...]` (f32).
    pub uvs: Vec<f32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Check if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, p: Point3, u: f64, v: f64) -> u32 {
        let index = self.num_vertices() as u32;
        self.vertices
            .extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
        self.uvs.extend_from_slice(&[u as f32, v as f32]);
        index
    }

    /// Append a triangle by vertex index.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Position of vertex `i`.
    pub fn vertex(&self, i: usize) -> Point3 {
        let v = &self.vertices[i * 3..i * 3 + 3];
        Point3::new(v[0] as f64, v[1] as f64, v[2] as f64)
    }

    /// Iterate over vertex positions.
    pub fn positions(&self) -> impl Iterator<Item = Point3> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|v| Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
    }

    /// Merge another mesh into this one.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Copy of this mesh with every vertex moved by `t`.
    pub fn transformed(&self, t: &Transform) -> TriangleMesh {
        let mut vertices = Vec::with_capacity(self.vertices.len());
        for p in self.positions() {
            let q = t.apply_point(&p);
            vertices.extend_from_slice(&[q.x as f32, q.y as f32, q.z as f32]);
        }
        TriangleMesh {
            vertices,
            indices: self.indices.clone(),
            uvs: self.uvs.clone(),
        }
    }

    /// Bounds of all vertices, `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<Aabb3> {
        let mut positions = self.positions();
        let first = positions.next()?;
        let mut aabb = Aabb3::new(first, first);
        for p in positions {
            aabb.include_point(&p);
        }
        Some(aabb)
    }

    /// Total signed volume enclosed by the triangles.
    ///
    /// Positive for a closed mesh with outward-facing counter-clockwise
    /// triangles.
    pub fn signed_volume(&self) -> f64 {
        self.indices
            .chunks_exact(3)
            .map(|tri| {
                let a = self.vertex(tri[0] as usize).coords;
                let b = self.vertex(tri[1] as usize).coords;
                let c = self.vertex(tri[2] as usize).coords;
                a.dot(&b.cross(&c)) / 6.0
            })
            .sum()
    }
}

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Size along each axis.
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    /// Centre of the box.
    pub fn center(&self) -> Point3 {
        Point3::from((self.min.coords + self.max.coords) / 2.0)
    }
}

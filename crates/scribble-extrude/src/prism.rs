//! Prism extrusion of flattened outlines.
//!
//! Outlines live in the extrusion plane (x right, y up). The prism is
//! centred on that plane: caps at `z = ±depth / 2`.

use scribble_math::{Point2, Point3, Transform};
use scribble_path::ScenePath;
use serde::{Deserialize, Serialize};

use crate::mesh::TriangleMesh;
use crate::physics::PhysicsProxy;
use crate::triangulate::{ear_clip, signed_area2};
use crate::{ExtrudeError, Result};

/// Parameters for turning a mapped path into a solid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrudeParams {
    /// Thickness of the solid in metres.
    pub depth: f64,
    /// Magnification the path was built with; must match the mapper's.
    pub geometry_scale: f64,
    /// Height above the ray-cast hit the solid is released from, in metres.
    pub drop_height: f64,
}

impl Default for ExtrudeParams {
    fn default() -> Self {
        Self {
            depth: 0.01,
            geometry_scale: 10.0,
            drop_height: 0.2,
        }
    }
}

impl ExtrudeParams {
    /// Check that depth and scale are usable.
    pub fn validate(&self) -> Result<()> {
        if !self.geometry_scale.is_finite() || self.geometry_scale <= 0.0 {
            return Err(ExtrudeError::InvalidScale(self.geometry_scale));
        }
        if !self.depth.is_finite() || self.depth <= 0.0 {
            return Err(ExtrudeError::ZeroDepth);
        }
        Ok(())
    }
}

/// Extrude one outline into a closed prism.
///
/// Clockwise outlines are reversed first, so the result always has
/// outward-facing counter-clockwise triangles. Cap texture coordinates span
/// the outline's bounding rectangle; side walls run `u` along the perimeter
/// and `v` from bottom to top.
///
/// # Errors
///
/// - [`ExtrudeError::TooFewPoints`] for fewer than three points
/// - [`ExtrudeError::ZeroDepth`] if `depth` is not a positive finite number
/// - [`ExtrudeError::DegenerateOutline`] if the outline encloses no area
pub fn extrude_outline(outline: &[Point2], depth: f64) -> Result<TriangleMesh> {
    if outline.len() < 3 {
        return Err(ExtrudeError::TooFewPoints(outline.len()));
    }
    if !depth.is_finite() || depth <= 0.0 {
        return Err(ExtrudeError::ZeroDepth);
    }

    let area2 = signed_area2(outline);
    if area2.abs() < 1e-12 {
        return Err(ExtrudeError::DegenerateOutline);
    }
    let mut points = outline.to_vec();
    if area2 < 0.0 {
        points.reverse();
    }

    let half = depth / 2.0;
    let (min, max) = bounds_2d(&points);
    let width = (max.x - min.x).max(f64::EPSILON);
    let height = (max.y - min.y).max(f64::EPSILON);
    let cap_uv = |p: &Point2| ((p.x - min.x) / width, 1.0 - (p.y - min.y) / height);

    let mut mesh = TriangleMesh::new();
    let tris = ear_clip(&points);

    // Top cap faces +z
    let top: Vec<u32> = points
        .iter()
        .map(|p| {
            let (u, v) = cap_uv(p);
            mesh.push_vertex(Point3::new(p.x, p.y, half), u, v)
        })
        .collect();
    for t in &tris {
        mesh.push_triangle(top[t[0]], top[t[1]], top[t[2]]);
    }

    // Bottom cap faces -z
    let bottom: Vec<u32> = points
        .iter()
        .map(|p| {
            let (u, v) = cap_uv(p);
            mesh.push_vertex(Point3::new(p.x, p.y, -half), u, v)
        })
        .collect();
    for t in &tris {
        mesh.push_triangle(bottom[t[0]], bottom[t[2]], bottom[t[1]]);
    }

    // Side walls, unshared vertices per edge
    let n = points.len();
    let perimeter: f64 = (0..n).map(|i| (points[(i + 1) % n] - points[i]).norm()).sum();
    let mut walked = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let u0 = walked / perimeter;
        walked += (b - a).norm();
        let u1 = walked / perimeter;

        let b0 = mesh.push_vertex(Point3::new(a.x, a.y, -half), u0, 0.0);
        let b1 = mesh.push_vertex(Point3::new(b.x, b.y, -half), u1, 0.0);
        let t1 = mesh.push_vertex(Point3::new(b.x, b.y, half), u1, 1.0);
        let t0 = mesh.push_vertex(Point3::new(a.x, a.y, half), u0, 1.0);
        mesh.push_triangle(b0, b1, t1);
        mesh.push_triangle(b0, t1, t0);
    }

    Ok(mesh)
}

fn bounds_2d(points: &[Point2]) -> (Point2, Point2) {
    let mut min = points[0];
    let mut max = points[0];
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

/// A solid built at geometry scale.
///
/// The mesh keeps the magnified coordinates the path was mapped with;
/// [`ExtrudedShape::world_mesh`] shrinks it back to metres.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrudedShape {
    /// Prism mesh in magnified coordinates.
    pub mesh: TriangleMesh,
    /// Factor the mesh is magnified by.
    pub geometry_scale: f64,
}

impl ExtrudedShape {
    /// The transform from magnified coordinates to metres.
    pub fn world_scale(&self) -> Transform {
        Transform::uniform_scale(1.0 / self.geometry_scale)
    }

    /// Mesh in metres, still in the extrusion plane's frame.
    pub fn world_mesh(&self) -> TriangleMesh {
        self.mesh.transformed(&self.world_scale())
    }

    /// Box collider sized from the mesh bounds.
    pub fn physics_proxy(&self) -> Option<PhysicsProxy> {
        let bounds = self.mesh.bounds()?;
        Some(PhysicsProxy::from_bounds(&bounds, self.geometry_scale))
    }
}

/// Extrude every outline of a mapped path.
///
/// The thickness is `params.depth` magnified by `params.geometry_scale` so
/// it matches the path's coordinates. Outlines with fewer than three distinct
/// points are skipped.
///
/// # Errors
///
/// - [`ExtrudeError::InvalidScale`] / [`ExtrudeError::ZeroDepth`] for bad params
/// - [`ExtrudeError::EmptyPath`] if no outline can be extruded
pub fn extrude_scene_path(path: &ScenePath, params: &ExtrudeParams) -> Result<ExtrudedShape> {
    params.validate()?;
    let depth = params.depth * params.geometry_scale;

    let mut mesh = TriangleMesh::new();
    let mut extruded = 0;
    for (i, outline) in path.plane_outlines().iter().enumerate() {
        match extrude_outline(outline, depth) {
            Ok(part) => {
                mesh.merge(&part);
                extruded += 1;
            }
            Err(ExtrudeError::TooFewPoints(_) | ExtrudeError::DegenerateOutline) => {
                tracing::debug!(outline = i, points = outline.len(), "skipping outline");
            }
            Err(e) => return Err(e),
        }
    }

    if extruded == 0 {
        return Err(ExtrudeError::EmptyPath);
    }

    tracing::debug!(
        outlines = extruded,
        triangles = mesh.num_triangles(),
        "extruded scene path"
    );
    Ok(ExtrudedShape {
        mesh,
        geometry_scale: params.geometry_scale,
    })
}

//! Textured quad showing the captured drawing on the solid's front face.

use std::f64::consts::FRAC_PI_2;

use scribble_math::Transform;
use scribble_quad::{CenteredQuadCorners, Corner};

use crate::mesh::TriangleMesh;

/// Gap between the front cap and the face quad, metres.
const FACE_GAP: f64 = 0.0001;

/// Texture coordinates for left-top, right-top, left-bottom, right-bottom.
const FACE_UVS: [(f64, f64); 4] = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];

/// Two triangles over the four corners.
const FACE_INDICES: [u32; 6] = [0, 2, 1, 1, 2, 3];

/// Quad spanning the detection corners, textured with the full captured image.
///
/// Vertices are the centred corners in [`Corner::ALL`] order, so the texture
/// lands exactly where it was captured.
pub fn face_quad(corners: &CenteredQuadCorners) -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    for (corner, (u, v)) in Corner::ALL.iter().zip(FACE_UVS) {
        mesh.push_vertex(corners.get(*corner), u, v);
    }
    mesh.indices.extend_from_slice(&FACE_INDICES);
    mesh
}

/// Places a [`face_quad`] just in front of a prism of thickness `depth` (metres).
///
/// The corners lie on the ground plane; tipping them up by a quarter turn
/// about x puts them in the extrusion plane.
pub fn face_placement(depth: f64) -> Transform {
    Transform::translation(0.0, 0.0, depth / 2.0 + FACE_GAP).then(&Transform::rotation_x(FRAC_PI_2))
}

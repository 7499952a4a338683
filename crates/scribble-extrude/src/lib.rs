#![warn(missing_docs)]

//! Turn a mapped scribble into something that can be dropped into a scene.
//!
//! A [`ScenePath`](scribble_path::ScenePath) from the quad mapper is flattened
//! onto its extrusion plane and pushed out into a thin prism. Alongside the
//! prism this crate builds the textured [`face_quad`], a box
//! [`PhysicsProxy`], and the [`drop_transform`] that releases the solid above
//! the floor.
//!
//! # Example
//!
//! ```
//! use scribble_extrude::{extrude_outline, TriangleMesh};
//! use scribble_math::Point2;
//!
//! let triangle = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.0, 1.0),
//! ];
//! let mesh: TriangleMesh = extrude_outline(&triangle, 0.1).unwrap();
//! assert_eq!(mesh.num_triangles(), 2 + 3 * 2);
//! ```

mod face;
mod mesh;
mod physics;
mod prism;
mod triangulate;

pub use face::{face_placement, face_quad};
pub use mesh::{Aabb3, TriangleMesh};
pub use physics::{drop_transform, PhysicsProxy};
pub use prism::{extrude_outline, extrude_scene_path, ExtrudeParams, ExtrudedShape};
pub use triangulate::{ear_clip, signed_area2};

use thiserror::Error;

/// Errors from building solids.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtrudeError {
    /// An outline needs at least three points.
    #[error("outline has {0} points, need at least 3")]
    TooFewPoints(usize),

    /// The outline's points are collinear.
    #[error("outline encloses no area")]
    DegenerateOutline,

    /// Extrusion depth is zero, negative or not finite.
    #[error("extrusion depth must be positive")]
    ZeroDepth,

    /// Geometry scale is zero, negative or not finite.
    #[error("invalid geometry scale {0}")]
    InvalidScale(f64),

    /// No outline in the path could be extruded.
    #[error("path has nothing to extrude")]
    EmptyPath,
}

/// Result type for extrusion operations.
pub type Result<T> = std::result::Result<T, ExtrudeError>;

#![warn(missing_docs)]

//! Quad mapping: lift a detected 2D contour into AR world space.
//!
//! The four corners of the on-screen detection square are ray cast
//! independently against a tracked plane, so they rarely form a planar
//! rectangle. Every contour point is placed by barycentric interpolation over
//! one of the two triangles that split the unit square along its diagonal,
//! in a frame centred on the corners' centroid.
//!
//! # Example
//!
//! ```
//! use scribble_math::Point3;
//! use scribble_quad::{MapperConfig, QuadCorners, QuadMapper};
//! use scribble_path::ContourPath;
//! use scribble_math::Point2;
//!
//! let corners = QuadCorners::new(
//!     Point3::new(-1.0, 0.0, -1.0),
//!     Point3::new(1.0, 0.0, -1.0),
//!     Point3::new(-1.0, 0.0, 1.0),
//!     Point3::new(1.0, 0.0, 1.0),
//! )
//! .unwrap();
//!
//! let mut mapper = QuadMapper::new(MapperConfig::default()).unwrap();
//! mapper.seed(&corners);
//!
//! let path = ContourPath::polygon(&[
//!     Point2::new(0.25, 0.25),
//!     Point2::new(0.75, 0.25),
//!     Point2::new(0.5, 0.75),
//! ]);
//! let scene = mapper.map_path(&path).unwrap();
//! assert_eq!(scene.len(), path.len());
//! ```

mod corners;
mod mapper;
mod raycast;
mod region;
mod triangle;

pub use corners::{CenteredQuadCorners, Corner, QuadCorners};
pub use mapper::{map_path, map_point, ContourFrame, MapperConfig, QuadMapper};
pub use raycast::{PinholeCamera, PlaneRayCaster, Ray, RayCaster};
pub use region::{compute_corners, DetectionRegion};
pub use triangle::{interpolate, BarycentricWeights, Triangle};

use thiserror::Error;

/// Errors from corner acquisition and contour mapping.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadError {
    /// One or more corner ray casts returned nothing.
    #[error("insufficient tracking data: no plane hit for {missing:?}")]
    InsufficientTrackingData {
        /// The corners whose ray cast failed.
        missing: Vec<Corner>,
    },

    /// A path was mapped before any corners were acquired for this cycle.
    #[error("no active corners: acquire corners before mapping a path")]
    NoActiveCorners,

    /// Two corners landed on the same world point.
    #[error("corners {first:?} and {second:?} coincide")]
    DegenerateQuad {
        /// First corner of the coincident pair.
        first: Corner,
        /// Second corner of the coincident pair.
        second: Corner,
    },

    /// A corner has a NaN or infinite coordinate.
    #[error("non-finite coordinate in {0:?} corner")]
    NonFiniteCorner(Corner),

    /// A contour point has a NaN or infinite coordinate.
    #[error("non-finite point at path element {index}")]
    NonFinitePoint {
        /// Index of the offending element.
        index: usize,
    },

    /// The geometry scale must be finite and positive.
    #[error("invalid geometry scale: {0}")]
    InvalidScale(f64),
}

/// Result type for quad operations.
pub type Result<T> = std::result::Result<T, QuadError>;

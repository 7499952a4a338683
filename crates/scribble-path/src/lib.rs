#![warn(missing_docs)]

//! Path element sequences for the scribble pipeline.
//!
//! A [`ContourPath`] is what a contour detector hands us: move/line/curve/close
//! elements over the normalized unit square. A [`ScenePath`] is the same
//! structure after every point has been mapped into the AR scene.
//!
//! # Example
//!
//! ```
//! use scribble_path::{ContourPath, ElementKind};
//! use scribble_math::Point2;
//!
//! let path = ContourPath::polygon(&[
//!     Point2::new(0.2, 0.2),
//!     Point2::new(0.8, 0.2),
//!     Point2::new(0.5, 0.8),
//! ]);
//! assert_eq!(path.len(), 4);
//! assert_eq!(path.kinds().last(), Some(&ElementKind::Close));
//! ```

mod contour;
mod scene;

pub use contour::{ContourElement, ContourPath};
pub use scene::{plane_coords, Outline, SceneElement, ScenePath};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating paths.
#[derive(Debug, Error)]
pub enum PathError {
    /// The JSON document could not be parsed as a path.
    #[error("malformed path document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A drawing element appeared before any `MoveTo`.
    #[error("element {0} draws before the first move")]
    MissingMove(usize),
}

/// Result type for path operations.
pub type Result<T> = std::result::Result<T, PathError>;

/// The kind of a path element, independent of its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Start a new subpath.
    MoveTo,
    /// Straight segment.
    LineTo,
    /// Quadratic curve segment.
    QuadCurveTo,
    /// Cubic curve segment.
    CurveTo,
    /// Close the current subpath.
    Close,
}

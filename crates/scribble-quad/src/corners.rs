//! The four world-space corners of the detection square.

use scribble_math::{centroid, Point3, Tolerance, Vec3};
use serde::Serialize;

use crate::{QuadError, Result};

/// One corner of the detection square, named as seen on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    /// Top-left on screen.
    LeftTop,
    /// Top-right on screen.
    RightTop,
    /// Bottom-left on screen.
    LeftBottom,
    /// Bottom-right on screen.
    RightBottom,
}

impl Corner {
    /// All corners in storage order.
    pub const ALL: [Corner; 4] = [
        Corner::LeftTop,
        Corner::RightTop,
        Corner::LeftBottom,
        Corner::RightBottom,
    ];

    fn index(self) -> usize {
        match self {
            Corner::LeftTop => 0,
            Corner::RightTop => 1,
            Corner::LeftBottom => 2,
            Corner::RightBottom => 3,
        }
    }
}

/// World positions of the four detection-square corners.
///
/// Each corner comes from its own ray cast, so the quad is generally not
/// planar. No two corners may coincide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadCorners {
    left_top: Point3,
    right_top: Point3,
    left_bottom: Point3,
    right_bottom: Point3,
}

impl QuadCorners {
    /// Build a quad from four ray-cast hits.
    ///
    /// # Errors
    ///
    /// - [`QuadError::NonFiniteCorner`] if a coordinate is NaN or infinite
    /// - [`QuadError::DegenerateQuad`] if two corners coincide
    pub fn new(
        left_top: Point3,
        right_top: Point3,
        left_bottom: Point3,
        right_bottom: Point3,
    ) -> Result<Self> {
        let quad = Self {
            left_top,
            right_top,
            left_bottom,
            right_bottom,
        };

        for corner in Corner::ALL {
            if !quad.get(corner).coords.iter().all(|c| c.is_finite()) {
                return Err(QuadError::NonFiniteCorner(corner));
            }
        }

        let tol = Tolerance::DEFAULT;
        for (i, &first) in Corner::ALL.iter().enumerate() {
            for &second in &Corner::ALL[i + 1..] {
                if tol.points_equal(&quad.get(first), &quad.get(second)) {
                    return Err(QuadError::DegenerateQuad { first, second });
                }
            }
        }

        Ok(quad)
    }

    /// Position of one corner.
    pub fn get(&self, corner: Corner) -> Point3 {
        self.as_array()[corner.index()]
    }

    /// Corners as `[left_top, right_top, left_bottom, right_bottom]`.
    pub fn as_array(&self) -> [Point3; 4] {
        [
            self.left_top,
            self.right_top,
            self.left_bottom,
            self.right_bottom,
        ]
    }

    /// Mean of the four corners.
    pub fn centroid(&self) -> Point3 {
        centroid(&self.as_array()).unwrap_or_else(Point3::origin)
    }

    /// Translate every corner so the centroid sits at the origin.
    pub fn center(&self) -> CenteredQuadCorners {
        let origin = self.centroid();
        let [lt, rt, lb, rb] = self.as_array();
        CenteredQuadCorners {
            left_top: lt - origin.coords,
            right_top: rt - origin.coords,
            left_bottom: lb - origin.coords,
            right_bottom: rb - origin.coords,
            origin,
        }
    }
}

/// Corners expressed relative to their centroid.
///
/// Derived fresh for every mapping cycle. `origin` is the world centroid
/// that was subtracted, so callers can put the finished solid back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CenteredQuadCorners {
    left_top: Point3,
    right_top: Point3,
    left_bottom: Point3,
    right_bottom: Point3,
    origin: Point3,
}

impl CenteredQuadCorners {
    /// Position of one corner relative to the centroid.
    pub fn get(&self, corner: Corner) -> Point3 {
        self.as_array()[corner.index()]
    }

    /// Corners as `[left_top, right_top, left_bottom, right_bottom]`.
    pub fn as_array(&self) -> [Point3; 4] {
        [
            self.left_top,
            self.right_top,
            self.left_bottom,
            self.right_bottom,
        ]
    }

    /// World-space centroid that was subtracted.
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Sum of the centred corners; zero up to rounding.
    pub fn residual(&self) -> Vec3 {
        self.as_array()
            .iter()
            .fold(Vec3::zeros(), |acc, p| acc + p.coords)
    }

    /// Back to world-space corners.
    pub fn to_world(&self) -> [Point3; 4] {
        self.as_array().map(|p| p + self.origin.coords)
    }
}

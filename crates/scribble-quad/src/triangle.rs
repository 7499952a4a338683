//! Barycentric interpolation over the two halves of the unit square.
//!
//! Coordinates here are in the detector frame: origin at the bottom-left of
//! the square, y growing upward. The diagonal `y = x` runs from the
//! left-bottom corner to the right-top corner and splits the square into
//!
//! - [`Triangle::UpperRight`] (`y > x`): left-top, right-top, left-bottom
//! - [`Triangle::LowerLeft`] (`y <= x`): right-top, left-bottom, right-bottom
//!
//! Each weight is the area of the sub-triangle opposite its vertex, divided
//! by the half-square area `T = 1/2`.

use scribble_math::{Point2, Point3, Vec3};

use crate::corners::{CenteredQuadCorners, Corner};

/// Area of either half of the unit square.
const HALF_SQUARE: f64 = 0.5;

/// Which half of the unit square a point falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triangle {
    /// Above the diagonal: left-top, right-top, left-bottom.
    UpperRight,
    /// On or below the diagonal: right-top, left-bottom, right-bottom.
    LowerLeft,
}

impl Triangle {
    /// Pick the triangle for `p`. Points on the diagonal go to [`Triangle::LowerLeft`].
    pub fn containing(p: Point2) -> Self {
        if p.y > p.x {
            Triangle::UpperRight
        } else {
            Triangle::LowerLeft
        }
    }

    /// The three corners spanning this triangle.
    pub fn corners(self) -> [Corner; 3] {
        match self {
            Triangle::UpperRight => [Corner::LeftTop, Corner::RightTop, Corner::LeftBottom],
            Triangle::LowerLeft => [Corner::RightTop, Corner::LeftBottom, Corner::RightBottom],
        }
    }

    /// Barycentric weights of `p` with respect to this triangle.
    ///
    /// The formulas are valid for any `p`; off-triangle points just produce a
    /// negative weight. [`interpolate`] only ever evaluates the containing one.
    pub fn weights(self, p: Point2) -> BarycentricWeights {
        match self {
            Triangle::UpperRight => {
                let left_bottom_side = (1.0 - p.y) / 2.0;
                let right_top_side = p.x / 2.0;
                let left_top_side = HALF_SQUARE - left_bottom_side - right_top_side;
                BarycentricWeights {
                    triangle: self,
                    weights: [
                        left_top_side / HALF_SQUARE,
                        right_top_side / HALF_SQUARE,
                        left_bottom_side / HALF_SQUARE,
                    ],
                }
            }
            Triangle::LowerLeft => {
                let right_top_side = p.y / 2.0;
                let left_bottom_side = (1.0 - p.x) / 2.0;
                let right_bottom_side = HALF_SQUARE - right_top_side - left_bottom_side;
                BarycentricWeights {
                    triangle: self,
                    weights: [
                        right_top_side / HALF_SQUARE,
                        left_bottom_side / HALF_SQUARE,
                        right_bottom_side / HALF_SQUARE,
                    ],
                }
            }
        }
    }
}

/// Weights of a point against the three corners of one [`Triangle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarycentricWeights {
    triangle: Triangle,
    weights: [f64; 3],
}

impl BarycentricWeights {
    /// Triangle these weights refer to.
    pub fn triangle(&self) -> Triangle {
        self.triangle
    }

    /// `(corner, weight)` pairs in the order of [`Triangle::corners`].
    pub fn pairs(&self) -> [(Corner, f64); 3] {
        let corners = self.triangle.corners();
        [
            (corners[0], self.weights[0]),
            (corners[1], self.weights[1]),
            (corners[2], self.weights[2]),
        ]
    }

    /// Weight of `corner`, zero if it is not part of the triangle.
    pub fn weight_of(&self, corner: Corner) -> f64 {
        self.pairs()
            .iter()
            .find(|(c, _)| *c == corner)
            .map_or(0.0, |(_, w)| *w)
    }

    /// Sum of the weights; one by construction.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Weighted sum of the triangle's corners.
    pub fn apply(&self, corners: &CenteredQuadCorners) -> Point3 {
        let v = self
            .pairs()
            .iter()
            .fold(Vec3::zeros(), |acc, (c, w)| acc + corners.get(*c).coords * *w);
        Point3::from(v)
    }
}

/// Interpolate a detector-frame point over the centred quad.
pub fn interpolate(p: Point2, corners: &CenteredQuadCorners) -> Point3 {
    Triangle::containing(p).weights(p).apply(corners)
}

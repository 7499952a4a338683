//! 3D paths in AR scene space.

use scribble_math::{Point2, Point3, Tolerance};
use serde::{Deserialize, Serialize};

use crate::ElementKind;

/// One element of a mapped scene path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SceneElement {
    /// Start a new subpath at `to`.
    MoveTo {
        /// Destination point.
        to: Point3,
    },
    /// Straight segment to `to`.
    LineTo {
        /// Destination point.
        to: Point3,
    },
    /// Close the current subpath.
    Close,
}

impl SceneElement {
    /// Kind of this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            SceneElement::MoveTo { .. } => ElementKind::MoveTo,
            SceneElement::LineTo { .. } => ElementKind::LineTo,
            SceneElement::Close => ElementKind::Close,
        }
    }

    /// Destination point, `None` for `Close`.
    pub fn end_point(&self) -> Option<Point3> {
        match self {
            SceneElement::MoveTo { to } | SceneElement::LineTo { to } => Some(*to),
            SceneElement::Close => None,
        }
    }
}

/// Flatten a scene point onto the extrusion plane.
///
/// The ground plane `(x, z)` becomes `(x, -z)`: seen from above, the scene's
/// z axis runs opposite to the contour's y axis.
pub fn plane_coords(p: &Point3) -> Point2 {
    Point2::new(p.x, -p.z)
}

/// A polyline extracted from one subpath of a [`ScenePath`].
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    /// Points in order, without consecutive duplicates.
    pub points: Vec<Point3>,
    /// Whether the subpath ended with `Close`.
    pub closed: bool,
}

impl Outline {
    /// Points flattened onto the extrusion plane.
    pub fn plane_points(&self) -> Vec<Point2> {
        self.points.iter().map(plane_coords).collect()
    }
}

/// An ordered sequence of scene elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenePath {
    /// The elements in drawing order.
    pub elements: Vec<SceneElement>,
}

impl ScenePath {
    /// Create an empty path with room for `n` elements.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            elements: Vec::with_capacity(n),
        }
    }

    /// Append an element.
    pub fn push(&mut self, el: SceneElement) {
        self.elements.push(el);
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the path has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element kinds in order.
    pub fn kinds(&self) -> Vec<ElementKind> {
        self.elements.iter().map(SceneElement::kind).collect()
    }

    /// Split the path into one outline per subpath.
    ///
    /// A closing point equal to the subpath start is dropped, as are
    /// consecutive duplicates. A segment drawn straight after `Close` opens a
    /// new outline at the closed one's start point.
    pub fn outlines(&self) -> Vec<Outline> {
        let tol = Tolerance::DEFAULT;
        let mut outlines: Vec<Outline> = Vec::new();

        for el in &self.elements {
            match el {
                SceneElement::MoveTo { to } => outlines.push(Outline {
                    points: vec![*to],
                    closed: false,
                }),
                SceneElement::LineTo { to } => {
                    // Drawing on after a close starts a new subpath at the old start
                    let reopen = outlines
                        .last()
                        .filter(|o| o.closed)
                        .and_then(|o| o.points.first().copied());
                    if let Some(start) = reopen {
                        outlines.push(Outline {
                            points: vec![start],
                            closed: false,
                        });
                    }
                    if let Some(current) = outlines.last_mut() {
                        let duplicate = current
                            .points
                            .last()
                            .is_some_and(|last| tol.points_equal(last, to));
                        if !duplicate {
                            current.points.push(*to);
                        }
                    }
                }
                SceneElement::Close => {
                    if let Some(current) = outlines.last_mut() {
                        current.closed = true;
                        if current.points.len() > 1 {
                            let first = current.points[0];
                            if current
                                .points
                                .last()
                                .is_some_and(|last| tol.points_equal(last, &first))
                            {
                                current.points.pop();
                            }
                        }
                    }
                }
            }
        }

        outlines
    }

    /// Every outline flattened onto the extrusion plane.
    pub fn plane_outlines(&self) -> Vec<Vec<Point2>> {
        self.outlines().iter().map(Outline::plane_points).collect()
    }
}

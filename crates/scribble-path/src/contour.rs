//! 2D contour paths over the normalized detection square.

use scribble_math::Point2;
use serde::{Deserialize, Serialize};

use crate::{ElementKind, PathError, Result};

/// One element of a detected contour.
///
/// Coordinates live in the unit square. Curve control points are kept so the
/// structure round-trips, but consumers in this workspace only read `to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ContourElement {
    /// Start a new subpath at `to`.
    MoveTo {
        /// Destination point.
        to: Point2,
    },
    /// Straight segment to `to`.
    LineTo {
        /// Destination point.
        to: Point2,
    },
    /// Quadratic curve to `to`.
    QuadCurveTo {
        /// Destination point.
        to: Point2,
        /// Control point.
        control: Point2,
    },
    /// Cubic curve to `to`.
    CurveTo {
        /// Destination point.
        to: Point2,
        /// First control point.
        control1: Point2,
        /// Second control point.
        control2: Point2,
    },
    /// Close the current subpath.
    Close,
}

impl ContourElement {
    /// Kind of this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            ContourElement::MoveTo { .. } => ElementKind::MoveTo,
            ContourElement::LineTo { .. } => ElementKind::LineTo,
            ContourElement::QuadCurveTo { .. } => ElementKind::QuadCurveTo,
            ContourElement::CurveTo { .. } => ElementKind::CurveTo,
            ContourElement::Close => ElementKind::Close,
        }
    }

    /// Destination point, `None` for `Close`.
    pub fn end_point(&self) -> Option<Point2> {
        match self {
            ContourElement::MoveTo { to }
            | ContourElement::LineTo { to }
            | ContourElement::QuadCurveTo { to, .. }
            | ContourElement::CurveTo { to, .. } => Some(*to),
            ContourElement::Close => None,
        }
    }

    /// Apply `f` to every point of the element, control points included.
    pub fn map_points(&self, f: impl Fn(Point2) -> Point2) -> Self {
        match *self {
            ContourElement::MoveTo { to } => ContourElement::MoveTo { to: f(to) },
            ContourElement::LineTo { to } => ContourElement::LineTo { to: f(to) },
            ContourElement::QuadCurveTo { to, control } => ContourElement::QuadCurveTo {
                to: f(to),
                control: f(control),
            },
            ContourElement::CurveTo {
                to,
                control1,
                control2,
            } => ContourElement::CurveTo {
                to: f(to),
                control1: f(control1),
                control2: f(control2),
            },
            ContourElement::Close => ContourElement::Close,
        }
    }
}

/// An ordered sequence of contour elements, as produced by a detector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContourPath {
    /// The elements in drawing order.
    pub elements: Vec<ContourElement>,
}

impl ContourPath {
    /// Create a path from elements without validation.
    pub fn new(elements: Vec<ContourElement>) -> Self {
        Self { elements }
    }

    /// Closed polygon through `points`: one move, a line per remaining point, a close.
    pub fn polygon(points: &[Point2]) -> Self {
        let mut elements = Vec::with_capacity(points.len() + 1);
        for (i, &p) in points.iter().enumerate() {
            if i == 0 {
                elements.push(ContourElement::MoveTo { to: p });
            } else {
                elements.push(ContourElement::LineTo { to: p });
            }
        }
        if !points.is_empty() {
            elements.push(ContourElement::Close);
        }
        Self { elements }
    }

    /// Parse a path from its JSON form and check that it starts with a move.
    pub fn from_json(json: &str) -> Result<Self> {
        let path: ContourPath = serde_json::from_str(json)?;
        path.validate()?;
        Ok(path)
    }

    /// Check that no drawing element precedes the first `MoveTo`.
    pub fn validate(&self) -> Result<()> {
        let mut started = false;
        for (i, el) in self.elements.iter().enumerate() {
            match el {
                ContourElement::MoveTo { .. } => started = true,
                _ if !started => return Err(PathError::MissingMove(i)),
                _ => {}
            }
        }
        Ok(())
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
        self.elements.iter().map(ContourElement::kind).collect()
    }

    /// Destination points of every coordinate-bearing element.
    pub fn end_points(&self) -> Vec<Point2> {
        self.elements
            .iter()
            .filter_map(ContourElement::end_point)
            .collect()
    }

    /// Destination points grouped by subpath.
    ///
    /// Each `MoveTo` starts a new group, as does drawing on after `Close`; that
    /// group begins at the closed subpath's start point.
    pub fn subpaths(&self) -> Vec<Vec<Point2>> {
        let mut groups: Vec<Vec<Point2>> = Vec::new();
        let mut closed = false;
        for el in &self.elements {
            match el {
                ContourElement::MoveTo { to } => {
                    groups.push(vec![*to]);
                    closed = false;
                }
                ContourElement::Close => closed = true,
                other => {
                    if closed {
                        if let Some(start) = groups.last().and_then(|g| g.first().copied()) {
                            groups.push(vec![start]);
                        }
                        closed = false;
                    }
                    if let (Some(group), Some(p)) = (groups.last_mut(), other.end_point()) {
                        group.push(p);
                    }
                }
            }
        }
        groups
    }

    /// Transform into the pixel space of an on-screen overlay of side `detect_size`.
    ///
    /// The detector's y axis points up, the view's points down, so y is flipped
    /// and the origin moved to the top-left corner.
    pub fn to_view_space(&self, detect_size: f64) -> Self {
        let elements = self
            .elements
            .iter()
            .map(|el| {
                el.map_points(|p| Point2::new(p.x * detect_size, detect_size - p.y * detect_size))
            })
            .collect();
        Self { elements }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn triangle() -> ContourPath {
        ContourPath::polygon(&[
            Point2::new(0.1, 0.1),
            Point2::new(0.9, 0.1),
            Point2::new(0.5, 0.9),
        ])
    }

    #[test]
    fn test_polygon_structure() {
        let path = triangle();
        assert_eq!(
            path.kinds(),
            vec![
                ElementKind::MoveTo,
                ElementKind::LineTo,
                ElementKind::LineTo,
                ElementKind::Close
            ]
        );
        assert_eq!(path.end_points().len(), 3);
    }

    #[test]
    fn test_empty_polygon_has_no_close() {
        assert!(ContourPath::polygon(&[]).is_empty());
    }

    #[test]
    fn test_curve_end_point_ignores_controls() {
        let el = ContourElement::CurveTo {
            to: Point2::new(0.4, 0.6),
            control1: Point2::new(0.0, 0.0),
            control2: Point2::new(1.0, 1.0),
        };
        assert_eq!(el.end_point(), Some(Point2::new(0.4, 0.6)));
        assert_eq!(el.kind(), ElementKind::CurveTo);
    }

    #[test]
    fn test_subpaths_split_on_move() {
        let mut path = triangle();
        path.elements.push(ContourElement::MoveTo {
            to: Point2::new(0.4, 0.4),
        });
        path.elements.push(ContourElement::QuadCurveTo {
            to: Point2::new(0.6, 0.4),
            control: Point2::new(0.5, 0.3),
        });
        path.elements.push(ContourElement::LineTo {
            to: Point2::new(0.5, 0.6),
        });
        path.elements.push(ContourElement::Close);

        let groups = path.subpaths();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[1].len(), 3);
    }

    #[test]
    fn test_line_after_close_opens_new_subpath() {
        let mut path = triangle();
        path.elements.push(ContourElement::LineTo {
            to: Point2::new(0.1, 0.9),
        });
        path.elements.push(ContourElement::Close);

        let groups = path.subpaths();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1][0], groups[0][0]);
        assert_eq!(groups[1].len(), 2);
    }

    #[test]
    fn test_view_space_flips_y() {
        let path = ContourPath::polygon(&[Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)]);
        let view = path.to_view_space(320.0);
        let pts = view.end_points();
        // Detector origin (bottom-left) becomes the view's bottom-left pixel
        assert_abs_diff_eq!(pts[0].x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pts[0].y, 320.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pts[1].x, 320.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pts[1].y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_json_round_trip_shape() {
        let json = r#"{"elements":[
            {"op":"move_to","to":[0.1,0.2]},
            {"op":"curve_to","to":[0.5,0.5],"control1":[0.2,0.2],"control2":[0.4,0.4]},
            {"op":"close"}
        ]}"#;
        let path = ContourPath::from_json(json).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.elements[1].end_point(), Some(Point2::new(0.5, 0.5)));
    }

    #[test]
    fn test_line_before_move_is_rejected() {
        let json = r#"{"elements":[{"op":"line_to","to":[0.1,0.2]}]}"#;
        assert!(matches!(
            ContourPath::from_json(json),
            Err(PathError::MissingMove(0))
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(
            ContourPath::from_json("{not json"),
            Err(PathError::Malformed(_))
        ));
    }
}

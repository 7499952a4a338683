//! Contour-to-scene mapping and the per-cycle mapper state.

use scribble_math::{Point2, Point3};
use scribble_path::{ContourElement, ContourPath, SceneElement, ScenePath};
use serde::{Deserialize, Serialize};

use crate::corners::{CenteredQuadCorners, QuadCorners};
use crate::raycast::RayCaster;
use crate::region::{compute_corners, DetectionRegion};
use crate::triangle::interpolate;
use crate::{QuadError, Result};

/// Orientation of incoming contour coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContourFrame {
    /// Origin at the top-left of the square, y growing downward (screen order).
    #[default]
    TopLeft,
    /// Origin at the bottom-left, y growing upward (the detector's native output).
    BottomLeft,
}

impl ContourFrame {
    /// Convert a point into the bottom-left frame the triangle formulas use.
    pub fn to_detector(self, p: Point2) -> Point2 {
        match self {
            ContourFrame::TopLeft => Point2::new(p.x, 1.0 - p.y),
            ContourFrame::BottomLeft => p,
        }
    }
}

/// Mapper settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Magnification applied to every mapped point.
    ///
    /// Mesh builders misbehave on very small geometry, so paths are built
    /// large; whoever meshes them divides by the same factor afterwards.
    pub geometry_scale: f64,
    /// Orientation of incoming contour paths.
    pub frame: ContourFrame,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            geometry_scale: 10.0,
            frame: ContourFrame::TopLeft,
        }
    }
}

impl MapperConfig {
    /// Check that the scale is finite and positive.
    pub fn validate(&self) -> Result<()> {
        if !self.geometry_scale.is_finite() || self.geometry_scale <= 0.0 {
            return Err(QuadError::InvalidScale(self.geometry_scale));
        }
        Ok(())
    }
}

/// Map one contour point to a scaled, centroid-relative scene point.
///
/// `p` is read in `config.frame`; values slightly outside the unit square are
/// clamped onto it.
pub fn map_point(p: Point2, corners: &CenteredQuadCorners, config: &MapperConfig) -> Point3 {
    let p = config.frame.to_detector(p);
    let p = Point2::new(p.x.clamp(0.0, 1.0), p.y.clamp(0.0, 1.0));
    let q = interpolate(p, corners);
    Point3::from(q.coords * config.geometry_scale)
}

/// Map a whole contour, one output element per input element.
///
/// Curves become straight lines to their end point; control points are
/// dropped.
///
/// # Errors
///
/// [`QuadError::NonFinitePoint`] if any destination point is NaN or infinite.
pub fn map_path(
    path: &ContourPath,
    corners: &CenteredQuadCorners,
    config: &MapperConfig,
) -> Result<ScenePath> {
    let mut out = ScenePath::with_capacity(path.len());

    for (index, el) in path.elements.iter().enumerate() {
        let mapped = match el.end_point() {
            Some(p) if !(p.x.is_finite() && p.y.is_finite()) => {
                return Err(QuadError::NonFinitePoint { index });
            }
            Some(p) => Some(map_point(p, corners, config)),
            None => None,
        };

        let scene_el = match (el, mapped) {
            (ContourElement::MoveTo { .. }, Some(to)) => SceneElement::MoveTo { to },
            (_, Some(to)) => SceneElement::LineTo { to },
            (_, None) => SceneElement::Close,
        };
        out.push(scene_el);
    }

    tracing::debug!(elements = out.len(), "mapped contour onto quad");
    Ok(out)
}

/// Mapping state for one "drop a solid" cycle.
///
/// Holds the centred corners of the current cycle and nothing else. Every
/// cycle starts by acquiring or seeding corners; mapping without them fails.
#[derive(Debug, Clone)]
pub struct QuadMapper {
    config: MapperConfig,
    active: Option<CenteredQuadCorners>,
}

impl QuadMapper {
    /// Create a mapper with no active corners.
    pub fn new(config: MapperConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            active: None,
        })
    }

    /// Mapper settings.
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Corners of the current cycle, if any.
    pub fn active(&self) -> Option<&CenteredQuadCorners> {
        self.active.as_ref()
    }

    /// Start a cycle by ray casting the detection square's corners.
    ///
    /// Any previous cycle is discarded first, so a failed acquisition leaves
    /// the mapper without active corners.
    pub fn begin_cycle<R: RayCaster + ?Sized>(
        &mut self,
        ray_caster: &R,
        region: &DetectionRegion,
    ) -> Result<QuadCorners> {
        self.active = None;
        let corners = compute_corners(ray_caster, region)?;
        self.seed(&corners);
        Ok(corners)
    }

    /// Start a cycle from corners acquired elsewhere.
    pub fn seed(&mut self, corners: &QuadCorners) -> &CenteredQuadCorners {
        let centered = corners.center();
        tracing::debug!(origin = ?centered.origin(), "seeded quad corners");
        self.active.insert(centered)
    }

    /// Drop the current cycle's corners.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Map one point with the current cycle's corners.
    pub fn map_point(&self, p: Point2) -> Result<Point3> {
        let corners = self.active.as_ref().ok_or(QuadError::NoActiveCorners)?;
        Ok(map_point(p, corners, &self.config))
    }

    /// Map a contour with the current cycle's corners.
    pub fn map_path(&self, path: &ContourPath) -> Result<ScenePath> {
        let corners = self.active.as_ref().ok_or(QuadError::NoActiveCorners)?;
        map_path(path, corners, &self.config)
    }
}

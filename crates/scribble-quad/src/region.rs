//! The on-screen detection square and corner acquisition.

use scribble_math::Point2;
use serde::{Deserialize, Serialize};

use crate::corners::{Corner, QuadCorners};
use crate::raycast::RayCaster;
use crate::{QuadError, Result};

/// Default side of the detection square in screen points.
const DEFAULT_DETECT_SIZE: f64 = 320.0;

/// A fixed-size square centred on the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionRegion {
    /// Viewport width in screen points.
    pub viewport_width: f64,
    /// Viewport height in screen points.
    pub viewport_height: f64,
    /// Side length of the square.
    #[serde(default = "default_size")]
    pub size: f64,
}

fn default_size() -> f64 {
    DEFAULT_DETECT_SIZE
}

impl DetectionRegion {
    /// Default-sized square centred on a viewport.
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            viewport_width,
            viewport_height,
            size: DEFAULT_DETECT_SIZE,
        }
    }

    /// Top-left corner of the square.
    pub fn origin(&self) -> Point2 {
        Point2::new(
            self.viewport_width / 2.0 - self.size / 2.0,
            self.viewport_height / 2.0 - self.size / 2.0,
        )
    }

    /// Screen position of one corner.
    pub fn corner_point(&self, corner: Corner) -> Point2 {
        let o = self.origin();
        match corner {
            Corner::LeftTop => o,
            Corner::RightTop => Point2::new(o.x + self.size, o.y),
            Corner::LeftBottom => Point2::new(o.x, o.y + self.size),
            Corner::RightBottom => Point2::new(o.x + self.size, o.y + self.size),
        }
    }

    /// All four corners in [`Corner::ALL`] order.
    pub fn corner_points(&self) -> [Point2; 4] {
        Corner::ALL.map(|c| self.corner_point(c))
    }

    /// Screen point `offset` above the viewport centre, used to place a new solid.
    pub fn drop_point(&self, offset: f64) -> Point2 {
        Point2::new(self.viewport_width / 2.0, self.viewport_height / 2.0 - offset)
    }
}

/// Ray cast all four corners of `region`.
///
/// Every corner is cast even after a miss so the error names all of them.
///
/// # Errors
///
/// - [`QuadError::InsufficientTrackingData`] if any cast returns nothing
/// - [`QuadError::DegenerateQuad`] / [`QuadError::NonFiniteCorner`] from
///   [`QuadCorners::new`]
pub fn compute_corners<R: RayCaster + ?Sized>(
    ray_caster: &R,
    region: &DetectionRegion,
) -> Result<QuadCorners> {
    let hits = Corner::ALL.map(|c| ray_caster.cast(region.corner_point(c)));

    let missing: Vec<Corner> = Corner::ALL
        .iter()
        .zip(hits.iter())
        .filter(|(_, hit)| hit.is_none())
        .map(|(c, _)| *c)
        .collect();

    match hits {
        [Some(lt), Some(rt), Some(lb), Some(rb)] => QuadCorners::new(lt, rt, lb, rb),
        _ => {
            tracing::warn!(?missing, "corner ray cast failed; move the device");
            Err(QuadError::InsufficientTrackingData { missing })
        }
    }
}

//! Screen-to-world ray casting.
//!
//! The mapper only needs the [`RayCaster`] seam. [`PlaneRayCaster`] is a
//! self-contained implementation (pinhole camera over one tracked horizontal
//! plane) for tools and tests that have no AR session behind them.

use nalgebra::Unit;
use scribble_math::{Point2, Point3, Transform, Vec3};
use serde::{Deserialize, Serialize};

/// Anything that can turn a screen point into a world hit.
///
/// `None` means tracking has nothing under that point.
pub trait RayCaster {
    /// Cast from a screen point (pixels, origin top-left, y down).
    fn cast(&self, screen: Point2) -> Option<Point3>;
}

impl<F> RayCaster for F
where
    F: Fn(Point2) -> Option<Point3>,
{
    fn cast(&self, screen: Point2) -> Option<Point3> {
        self(screen)
    }
}

/// A ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Unit direction of the ray.
    pub direction: Unit<Vec3>,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: Unit::new_normalize(direction),
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction.as_ref()
    }

    /// Parameter where the ray meets the horizontal plane `y = height`.
    ///
    /// `None` if the ray is parallel to the plane or meets it behind the origin.
    pub fn hit_horizontal_plane(&self, height: f64) -> Option<f64> {
        let dy = self.direction.y;
        if dy.abs() < 1e-12 {
            return None;
        }
        let t = (height - self.origin.y) / dy;
        if t < 0.0 {
            return None;
        }
        Some(t)
    }
}

/// A pinhole camera looking into the scene.
///
/// At zero yaw and pitch the camera looks down -Z with +X to the right and
/// +Y up. Negative pitch tilts the view toward the floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinholeCamera {
    /// Camera centre in world space.
    pub position: Point3,
    /// Rotation about world Y, radians.
    pub yaw: f64,
    /// Rotation about camera X, radians.
    pub pitch: f64,
    /// Focal length in pixels.
    pub focal_length: f64,
    /// Viewport width in pixels.
    pub viewport_width: f64,
    /// Viewport height in pixels.
    pub viewport_height: f64,
}

impl PinholeCamera {
    /// Camera-to-world rotation.
    fn orientation(&self) -> Transform {
        Transform::rotation_y(self.yaw).then(&Transform::rotation_x(self.pitch))
    }

    /// World ray through a screen pixel.
    pub fn ray_through(&self, screen: Point2) -> Ray {
        let cx = self.viewport_width / 2.0;
        let cy = self.viewport_height / 2.0;
        let local = Vec3::new(screen.x - cx, cy - screen.y, -self.focal_length);
        Ray::new(self.position, self.orientation().apply_vec(&local))
    }
}

/// Ray caster against one tracked horizontal plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneRayCaster {
    /// The viewing camera.
    pub camera: PinholeCamera,
    /// Height of the tracked plane.
    pub plane_y: f64,
    /// Half size of the tracked area around the world origin, unbounded if `None`.
    #[serde(default)]
    pub half_extent: Option<f64>,
}

impl RayCaster for PlaneRayCaster {
    fn cast(&self, screen: Point2) -> Option<Point3> {
        let ray = self.camera.ray_through(screen);
        let t = ray.hit_horizontal_plane(self.plane_y)?;
        let hit = ray.at(t);
        if let Some(extent) = self.half_extent {
            if hit.x.abs() > extent || hit.z.abs() > extent {
                return None;
            }
        }
        Some(hit)
    }
}

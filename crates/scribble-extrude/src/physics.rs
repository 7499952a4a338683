//! Collider proxy and drop placement.

use scribble_math::{Point3, Transform};
use serde::{Deserialize, Serialize};

use crate::mesh::Aabb3;

/// Box collider for a dropped solid.
///
/// Friction and damping are maxed out so the solid settles where it lands
/// instead of sliding or rolling away.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsProxy {
    /// Box size along x, metres.
    pub width: f64,
    /// Box size along y, metres.
    pub height: f64,
    /// Box size along z, metres.
    pub length: f64,
    /// Sliding friction.
    pub friction: f64,
    /// Bounciness.
    pub restitution: f64,
    /// Rolling friction.
    pub rolling_friction: f64,
    /// Angular velocity damping.
    pub angular_damping: f64,
    /// Linear speed under which the body may sleep.
    pub linear_resting_threshold: f64,
    /// Angular speed under which the body may sleep.
    pub angular_resting_threshold: f64,
}

impl PhysicsProxy {
    /// Box with the given size and the default surface settings.
    pub fn with_size(width: f64, height: f64, length: f64) -> Self {
        Self {
            width,
            height,
            length,
            friction: 1.0,
            restitution: 0.0,
            rolling_friction: 1.0,
            angular_damping: 1.0,
            linear_resting_threshold: 1.0,
            angular_resting_threshold: 1.0,
        }
    }

    /// Box sized from magnified bounds, divided back down by `geometry_scale`.
    pub fn from_bounds(bounds: &Aabb3, geometry_scale: f64) -> Self {
        let e = bounds.extents() / geometry_scale;
        Self::with_size(e.x, e.y, e.z)
    }
}

/// Placement of a new solid `drop_height` above a ray-cast hit.
pub fn drop_transform(world_hit: Point3, drop_height: f64) -> Transform {
    Transform::translation(world_hit.x, world_hit.y + drop_height, world_hit.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_from_bounds_divides_by_scale() {
        let bounds = Aabb3::new(Point3::new(-1.0, -2.0, -0.05), Point3::new(1.0, 2.0, 0.05));
        let proxy = PhysicsProxy::from_bounds(&bounds, 10.0);
        assert_abs_diff_eq!(proxy.width, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(proxy.height, 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(proxy.length, 0.01, epsilon = 1e-12);
        assert_eq!(proxy.friction, 1.0);
        assert_eq!(proxy.restitution, 0.0);
        assert_eq!(proxy.angular_damping, 1.0);
    }

    #[test]
    fn test_drop_transform_raises_hit() {
        let t = drop_transform(Point3::new(0.3, -1.2, -0.8), 0.2);
        let p = t.apply_point(&Point3::origin());
        assert_abs_diff_eq!(p.x, 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, -0.8, epsilon = 1e-12);
    }
}

//! Arc entity

use super::{impl_entity_common, Entity, EntityCommon};
use crate::types::{BoundingBox2D, Vector2, Vector3};

/// An arc entity (portion of a circle), counter-clockwise from start to end
#[derive(Debug, Clone)]
pub struct Arc {
    /// Common entity data
    pub common: EntityCommon,
    /// Center point of the arc
    pub center: Vector3,
    /// Radius of the arc
    pub radius: f64,
    /// Start angle in degrees
    pub start_angle: f64,
    /// End angle in degrees
    pub end_angle: f64,
}

impl Arc {
    /// Create a new quarter arc at the origin
    pub fn new() -> Self {
        Arc {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            radius: 1.0,
            start_angle: 0.0,
            end_angle: 90.0,
        }
    }

    /// Create a new arc with center, radius, and angles in degrees
    pub fn from_center_radius_angles(
        center: Vector3,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        Arc {
            center,
            radius,
            start_angle,
            end_angle,
            ..Self::new()
        }
    }

    /// Counter-clockwise sweep in degrees, in `[0, 360)`
    pub fn sweep_angle(&self) -> f64 {
        (self.end_angle - self.start_angle).rem_euclid(360.0)
    }

    fn point_at(&self, degrees: f64) -> Vector2 {
        let r = self.radius;
        self.center.xy().polar(r, r, degrees.to_radians())
    }
}

impl Default for Arc {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Arc {
    impl_entity_common!("ARC");

    fn extents(&self) -> Option<BoundingBox2D> {
        let sweep = self.sweep_angle();
        let mut points = vec![self.point_at(self.start_angle), self.point_at(self.end_angle)];
        for quadrant in 0..4 {
            let angle = f64::from(quadrant) * 90.0;
            if (angle - self.start_angle).rem_euclid(360.0) <= sweep {
                points.push(self.point_at(angle));
            }
        }
        BoundingBox2D::from_points(&points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_arc_sweep_angle() {
        let arc = Arc::from_center_radius_angles(Vector3::ZERO, 5.0, 0.0, 180.0);
        assert_close(arc.sweep_angle(), 180.0);

        let wrapped = Arc::from_center_radius_angles(Vector3::ZERO, 5.0, 350.0, 10.0);
        assert_close(wrapped.sweep_angle(), 20.0);
    }

    #[test]
    fn test_upper_half_arc_extents() {
        let arc = Arc::from_center_radius_angles(Vector3::ZERO, 2.0, 0.0, 180.0);
        let bbox = arc.extents().unwrap();
        assert_close(bbox.min.x, -2.0);
        assert_close(bbox.max.x, 2.0);
        assert_close(bbox.min.y, 0.0);
        assert_close(bbox.max.y, 2.0);
    }

    #[test]
    fn test_arc_crossing_zero_extents() {
        let arc = Arc::from_center_radius_angles(Vector3::ZERO, 1.0, 315.0, 45.0);
        let bbox = arc.extents().unwrap();
        assert_close(bbox.max.x, 1.0);
        assert_close(bbox.min.x, 45f64.to_radians().cos());
        assert_close(bbox.max.y, 45f64.to_radians().sin());
        assert_close(bbox.min.y, -(45f64.to_radians().sin()));
    }
}

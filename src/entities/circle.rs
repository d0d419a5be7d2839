//! Circle entity

use super::{impl_entity_common, Entity, EntityCommon};
use crate::types::{BoundingBox2D, Vector2, Vector3};

/// A circle entity
#[derive(Debug, Clone)]
pub struct Circle {
    /// Common entity data
    pub common: EntityCommon,
    /// Center point of the circle
    pub center: Vector3,
    /// Radius of the circle
    pub radius: f64,
}

impl Circle {
    /// Create a new unit circle at the origin
    pub fn new() -> Self {
        Circle {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            radius: 1.0,
        }
    }

    /// Create a new circle with center and radius
    pub fn from_center_radius(center: Vector3, radius: f64) -> Self {
        Circle {
            center,
            radius,
            ..Self::new()
        }
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Circle {
    impl_entity_common!("CIRCLE");

    fn extents(&self) -> Option<BoundingBox2D> {
        let c = self.center.xy();
        let r = self.radius.abs();
        Some(BoundingBox2D::new(
            Vector2::new(c.x - r, c.y - r),
            Vector2::new(c.x + r, c.y + r),
        ))
    }
}

//! Ellipse entity

use super::{impl_entity_common, Entity, EntityCommon};
use crate::types::{BoundingBox2D, Vector2, Vector3};
use std::f64::consts::{PI, TAU};

/// An ellipse entity
#[derive(Debug, Clone)]
pub struct Ellipse {
    /// Common entity data
    pub common: EntityCommon,
    /// Center point of the ellipse
    pub center: Vector3,
    /// Major axis endpoint (relative to center)
    pub major_axis: Vector3,
    /// Ratio of minor axis to major axis
    pub minor_axis_ratio: f64,
    /// Start parameter in radians (0 = start of ellipse)
    pub start_parameter: f64,
    /// End parameter in radians (2π = full ellipse)
    pub end_parameter: f64,
}

impl Ellipse {
    /// Create a new ellipse at the origin
    pub fn new() -> Self {
        Ellipse {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            major_axis: Vector3::UNIT_X,
            minor_axis_ratio: 0.5,
            start_parameter: 0.0,
            end_parameter: TAU,
        }
    }

    /// Create a new full ellipse with center, major axis, and ratio
    pub fn from_center_axes(center: Vector3, major_axis: Vector3, minor_axis_ratio: f64) -> Self {
        Ellipse {
            center,
            major_axis,
            minor_axis_ratio,
            ..Self::new()
        }
    }

    /// Get the major axis length
    pub fn major_axis_length(&self) -> f64 {
        self.major_axis.length()
    }

    /// Get the minor axis length
    pub fn minor_axis_length(&self) -> f64 {
        self.major_axis_length() * self.minor_axis_ratio
    }

    /// Parameter span in radians, `2π` for a closed ellipse
    pub fn parameter_span(&self) -> f64 {
        let span = (self.end_parameter - self.start_parameter).rem_euclid(TAU);
        if span.abs() < 1e-10 {
            TAU
        } else {
            span
        }
    }

    /// Check if this is a full ellipse
    pub fn is_full(&self) -> bool {
        (self.parameter_span() - TAU).abs() < 1e-10
    }

    /// Point at parameter `t` on the rotated ellipse
    fn point_at(&self, t: f64) -> Vector2 {
        let a = self.major_axis.xy();
        let b = Vector2::new(-a.y, a.x) * self.minor_axis_ratio;
        self.center.xy() + a * t.cos() + b * t.sin()
    }
}

impl Default for Ellipse {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Ellipse {
    impl_entity_common!("ELLIPSE");

    fn extents(&self) -> Option<BoundingBox2D> {
        let a = self.major_axis.xy();
        let b = Vector2::new(-a.y, a.x) * self.minor_axis_ratio;
        let span = self.parameter_span();

        let mut points = Vec::with_capacity(6);
        if !self.is_full() {
            points.push(self.point_at(self.start_parameter));
            points.push(self.point_at(self.end_parameter));
        }
        // x(t) and y(t) peak where their derivative vanishes
        for base in [b.x.atan2(a.x), b.y.atan2(a.y)] {
            for t in [base, base + PI] {
                if (t - self.start_parameter).rem_euclid(TAU) <= span {
                    points.push(self.point_at(t));
                }
            }
        }
        BoundingBox2D::from_points(&points)
    }
}

//! Lightweight polyline entity (2D polyline with bulges)

use super::{impl_entity_common, Entity, EntityCommon};
use crate::types::{BoundingBox2D, Vector2};

/// A vertex in a lightweight polyline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LwVertex {
    /// Location of the vertex (2D)
    pub location: Vector2,
    /// Bulge value (for arc segments)
    /// 0 = straight line, positive = counterclockwise arc, negative = clockwise arc
    pub bulge: f64,
}

impl LwVertex {
    /// Create a new vertex
    pub fn new(location: Vector2) -> Self {
        LwVertex {
            location,
            bulge: 0.0,
        }
    }

    /// Create a vertex from coordinates
    pub fn from_coords(x: f64, y: f64) -> Self {
        LwVertex::new(Vector2::new(x, y))
    }
}

/// A lightweight (2D) polyline entity
#[derive(Debug, Clone)]
pub struct LwPolyline {
    /// Common entity data
    pub common: EntityCommon,
    /// Vertices of the polyline
    pub vertices: Vec<LwVertex>,
    /// Is the polyline closed? (group code 70, bit 1)
    pub is_closed: bool,
    /// Elevation (Z coordinate)
    pub elevation: f64,
}

impl LwPolyline {
    /// Create a new empty lightweight polyline
    pub fn new() -> Self {
        LwPolyline {
            common: EntityCommon::new(),
            vertices: Vec::new(),
            is_closed: false,
            elevation: 0.0,
        }
    }

    /// Create a polyline from a list of 2D points
    pub fn from_points(points: Vec<Vector2>) -> Self {
        LwPolyline {
            vertices: points.into_iter().map(LwVertex::new).collect(),
            ..Self::new()
        }
    }

    /// Add a point to the polyline
    pub fn add_point(&mut self, point: Vector2) {
        self.vertices.push(LwVertex::new(point));
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex locations in order; bulges are not expanded
    pub fn points(&self) -> Vec<Vector2> {
        self.vertices.iter().map(|v| v.location).collect()
    }
}

impl Default for LwPolyline {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for LwPolyline {
    impl_entity_common!("LWPOLYLINE");

    fn extents(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(&self.points())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lwpolyline_points() {
        let mut pl = LwPolyline::new();
        pl.add_point(Vector2::new(0.0, 0.0));
        pl.add_point(Vector2::new(2.0, 0.0));
        pl.vertices.push(LwVertex {
            location: Vector2::new(2.0, 3.0),
            bulge: 1.0,
        });
        assert_eq!(pl.vertex_count(), 3);
        assert_eq!(pl.points()[2], Vector2::new(2.0, 3.0));
        assert!(!pl.is_closed);
    }

    #[test]
    fn test_lwpolyline_extents() {
        let pl = LwPolyline::from_points(vec![Vector2::new(-1.0, 0.0), Vector2::new(4.0, 2.0)]);
        let bbox = pl.extents().unwrap();
        assert_eq!(bbox.width(), 5.0);
        assert_eq!(bbox.height(), 2.0);
        assert!(LwPolyline::new().extents().is_none());
    }
}

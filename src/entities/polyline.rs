//! Heavy POLYLINE entity with its VERTEX sequence

use super::{impl_entity_common, Entity, EntityCommon};
use crate::types::{BoundingBox2D, Vector2, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Polyline flags (DXF group code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PolylineFlags: i16 {
        const CLOSED = 1;
        const CURVE_FIT = 2;
        const SPLINE_FIT = 4;
        const POLYLINE_3D = 8;
        const POLYGON_MESH = 16;
        const CLOSED_N = 32;
        const POLYFACE_MESH = 64;
        const LINETYPE_CONTINUOUS = 128;
    }
}

/// A vertex of a heavy polyline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Location of the vertex
    pub location: Vector3,
    /// Bulge (0 = straight segment)
    pub bulge: f64,
}

impl Vertex {
    /// Create a new straight-segment vertex
    pub fn new(location: Vector3) -> Self {
        Vertex {
            location,
            bulge: 0.0,
        }
    }
}

/// A 2D or 3D polyline made of VERTEX sub-entities
#[derive(Debug, Clone)]
pub struct Polyline {
    /// Common entity data
    pub common: EntityCommon,
    /// Polyline flags
    pub flags: PolylineFlags,
    /// Vertices in file order
    pub vertices: Vec<Vertex>,
}

impl Polyline {
    /// Create a new empty polyline
    pub fn new() -> Self {
        Polyline {
            common: EntityCommon::new(),
            flags: PolylineFlags::empty(),
            vertices: Vec::new(),
        }
    }

    /// Create an open polyline through the given points
    pub fn from_points(points: Vec<Vector3>) -> Self {
        Polyline {
            vertices: points.into_iter().map(Vertex::new).collect(),
            ..Self::new()
        }
    }

    /// Is the polyline closed?
    pub fn is_closed(&self) -> bool {
        self.flags.contains(PolylineFlags::CLOSED)
    }

    /// Polygon and polyface meshes are surfaces, not curves
    pub fn is_mesh(&self) -> bool {
        self.flags
            .intersects(PolylineFlags::POLYGON_MESH | PolylineFlags::POLYFACE_MESH)
    }

    /// Vertex locations projected to XY; bulges are not expanded
    pub fn points(&self) -> Vec<Vector2> {
        self.vertices.iter().map(|v| v.location.xy()).collect()
    }
}

impl Default for Polyline {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Polyline {
    impl_entity_common!("POLYLINE");

    fn extents(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(&self.points())
    }
}

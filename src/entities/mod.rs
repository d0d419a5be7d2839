//! CAD entity types and traits
//!
//! Only the curve primitives that take part in vectorization are modelled:
//! straight lines, lightweight and heavy polylines, circles, ellipses and
//! arcs. Every other DXF entity kind is skipped by the reader.

use crate::types::{BoundingBox2D, Color, Handle, LineWeight};
use std::fmt;

/// Implements the accessor half of [`Entity`] for a struct with a `common` field.
macro_rules! impl_entity_common {
    ($name:literal) => {
        fn common(&self) -> &$crate::entities::EntityCommon {
            &self.common
        }

        fn common_mut(&mut self) -> &mut $crate::entities::EntityCommon {
            &mut self.common
        }

        fn entity_type(&self) -> &'static str {
            $name
        }
    };
}
pub(crate) use impl_entity_common;

pub mod arc;
pub mod circle;
pub mod ellipse;
pub mod line;
pub mod lwpolyline;
pub mod polyline;

pub use arc::Arc;
pub use circle::Circle;
pub use ellipse::Ellipse;
pub use line::Line;
pub use lwpolyline::{LwPolyline, LwVertex};
pub use polyline::{Polyline, PolylineFlags, Vertex};

/// Base trait for all CAD entities
pub trait Entity {
    /// Shared entity attributes
    fn common(&self) -> &EntityCommon;

    /// Mutable shared entity attributes
    fn common_mut(&mut self) -> &mut EntityCommon;

    /// Get the entity type name as it appears in DXF
    fn entity_type(&self) -> &'static str;

    /// Tight XY extents of the entity's geometry, if it has any
    fn extents(&self) -> Option<BoundingBox2D>;

    /// Get the entity's layer name
    fn layer(&self) -> &str {
        &self.common().layer
    }

    /// Get the entity's color
    fn color(&self) -> Color {
        self.common().color
    }

    /// Get the entity's line weight
    fn line_weight(&self) -> LineWeight {
        self.common().line_weight
    }
}

/// Common entity data shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Unique handle (group code 5)
    pub handle: Handle,
    /// Owning block record (group code 330); null means model space
    pub owner: Handle,
    /// Layer name (group code 8)
    pub layer: String,
    /// Color (group codes 62 / 420)
    pub color: Color,
    /// Line weight (group code 370)
    pub line_weight: LineWeight,
    /// Entity lives in paper space (group code 67)
    pub paper_space: bool,
}

impl EntityCommon {
    /// Create new common entity data with defaults
    pub fn new() -> Self {
        EntityCommon {
            handle: Handle::NULL,
            owner: Handle::NULL,
            layer: "0".to_string(),
            color: Color::ByLayer,
            line_weight: LineWeight::ByLayer,
            paper_space: false,
        }
    }

    /// Create with a specific layer
    pub fn with_layer(layer: impl Into<String>) -> Self {
        EntityCommon {
            layer: layer.into(),
            ..Self::new()
        }
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Entity kinds the document can be queried for, in aggregation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Line,
    LwPolyline,
    Polyline,
    Circle,
    Ellipse,
    Arc,
}

impl EntityKind {
    /// Fixed per-layer visiting order
    pub const QUERY_ORDER: [EntityKind; 6] = [
        EntityKind::Line,
        EntityKind::LwPolyline,
        EntityKind::Polyline,
        EntityKind::Circle,
        EntityKind::Ellipse,
        EntityKind::Arc,
    ];

    /// DXF entity name
    pub fn dxf_name(&self) -> &'static str {
        match self {
            EntityKind::Line => "LINE",
            EntityKind::LwPolyline => "LWPOLYLINE",
            EntityKind::Polyline => "POLYLINE",
            EntityKind::Circle => "CIRCLE",
            EntityKind::Ellipse => "ELLIPSE",
            EntityKind::Arc => "ARC",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dxf_name())
    }
}

/// Enumeration of all entity types for type-safe storage
#[derive(Debug, Clone)]
pub enum EntityType {
    Line(Line),
    LwPolyline(LwPolyline),
    Polyline(Polyline),
    Circle(Circle),
    Ellipse(Ellipse),
    Arc(Arc),
}

impl EntityType {
    /// Get a reference to the entity trait object
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Line(e) => e,
            EntityType::LwPolyline(e) => e,
            EntityType::Polyline(e) => e,
            EntityType::Circle(e) => e,
            EntityType::Ellipse(e) => e,
            EntityType::Arc(e) => e,
        }
    }

    /// Get a mutable reference to the entity trait object
    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            EntityType::Line(e) => e,
            EntityType::LwPolyline(e) => e,
            EntityType::Polyline(e) => e,
            EntityType::Circle(e) => e,
            EntityType::Ellipse(e) => e,
            EntityType::Arc(e) => e,
        }
    }

    /// Shared attributes
    pub fn common(&self) -> &EntityCommon {
        self.as_entity().common()
    }

    /// Query kind of this entity
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityType::Line(_) => EntityKind::Line,
            EntityType::LwPolyline(_) => EntityKind::LwPolyline,
            EntityType::Polyline(_) => EntityKind::Polyline,
            EntityType::Circle(_) => EntityKind::Circle,
            EntityType::Ellipse(_) => EntityKind::Ellipse,
            EntityType::Arc(_) => EntityKind::Arc,
        }
    }
}

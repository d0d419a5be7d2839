//! Block record table entry

use super::TableEntry;
use crate::extents::ExtentsGeometry;
use crate::types::{Color, Handle, LineWeight, Vector2};
use bitflags::bitflags;

bitflags! {
    /// Block flags (group code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BlockFlags: i16 {
        const ANONYMOUS = 1;
        const HAS_ATTRIBUTES = 2;
        const XREF = 4;
        const XREF_OVERLAY = 8;
    }
}

/// A block record table entry.
///
/// The record also carries the styling of its BLOCK definition entity, which
/// is the last stop of the color / line weight cascade for the entities it
/// owns.
#[derive(Debug, Clone)]
pub struct BlockRecord {
    /// Unique handle for the block record table entry
    pub handle: Handle,
    /// Block name
    pub name: String,
    /// Block flags
    pub flags: BlockFlags,
    /// Color of the BLOCK entity
    pub color: Color,
    /// Line weight of the BLOCK entity
    pub line_weight: LineWeight,
    /// Base point of the BLOCK entity
    pub base_point: Vector2,
    /// Extents geometry of the block content, in block coordinates
    pub geometry: Vec<ExtentsGeometry>,
}

impl BlockRecord {
    /// Name of the model space block record
    pub const MODEL_SPACE: &'static str = "*Model_Space";

    /// Create a new block record
    pub fn new(name: impl Into<String>) -> Self {
        BlockRecord {
            handle: Handle::NULL,
            name: name.into(),
            flags: BlockFlags::empty(),
            color: Color::ByLayer,
            line_weight: LineWeight::ByLayer,
            base_point: Vector2::ZERO,
            geometry: Vec::new(),
        }
    }

    /// Create the model space block record
    pub fn model_space() -> Self {
        Self::new(Self::MODEL_SPACE)
    }

    /// Check whether this is the model space record
    pub fn is_model_space(&self) -> bool {
        self.name.eq_ignore_ascii_case(Self::MODEL_SPACE)
    }
}

impl TableEntry for BlockRecord {
    fn handle(&self) -> Handle {
        self.handle
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_standard(&self) -> bool {
        self.name.starts_with('*')
    }
}

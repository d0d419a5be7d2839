//! Read-only view of a drawing consumed by the vectorizer

use crate::entities::{EntityKind, EntityType};
use crate::tables::{BlockRecord, Layer};
use crate::types::BoundingBox2D;

/// Everything the aggregator needs from a loaded drawing.
///
/// [`CadDocument`](crate::CadDocument) is the concrete implementation; tests
/// are free to provide their own.
pub trait DocumentAccessor {
    /// Layers in table order
    fn layers(&self) -> Box<dyn Iterator<Item = &Layer> + '_>;

    /// Modelspace entities of one kind on one layer, in file order.
    ///
    /// Layer names compare case-insensitively.
    fn query<'a>(
        &'a self,
        kind: EntityKind,
        layer_name: &str,
    ) -> Box<dyn Iterator<Item = &'a EntityType> + 'a>;

    /// Block record that owns the entity
    fn owning_block(&self, entity: &EntityType) -> Option<&BlockRecord>;

    /// Bounding box of all modelspace geometry, `None` when empty
    fn extents(&self) -> Option<BoundingBox2D>;
}

//! Stable integer ids for layers

use super::accessor::DocumentAccessor;
use crate::entities::{EntityKind, EntityType};
use crate::tables::Layer;

/// Assigns 0-based ids to a drawing's layers in table order.
///
/// The id is the only layer reference stored in a record.
#[derive(Debug)]
pub struct LayerIndexer<'a> {
    layers: Vec<&'a Layer>,
}

impl<'a> LayerIndexer<'a> {
    pub fn new<D: DocumentAccessor + ?Sized>(document: &'a D) -> Self {
        Self {
            layers: document.layers().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// `(id, layer)` pairs in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a Layer)> + '_ {
        self.layers.iter().copied().enumerate()
    }

    pub fn get(&self, id: usize) -> Option<&'a Layer> {
        self.layers.get(id).copied()
    }

    /// Id of a layer by name (case-insensitive)
    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.layers
            .iter()
            .position(|layer| layer.name.eq_ignore_ascii_case(name))
    }

    /// Entities of one kind scoped to the layer with the given id
    pub fn entities<D: DocumentAccessor + ?Sized>(
        &self,
        document: &'a D,
        id: usize,
        kind: EntityKind,
    ) -> Box<dyn Iterator<Item = &'a EntityType> + 'a> {
        match self.get(id) {
            Some(layer) => document.query(kind, &layer.name),
            None => Box::new(std::iter::empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CadDocument;
    use crate::entities::{EntityCommon, Line};

    #[test]
    fn test_ids_follow_table_order() {
        let mut doc = CadDocument::new();
        doc.add_layer(Layer::new("Walls"));
        doc.add_layer(Layer::new("Doors"));
        doc.ensure_defaults();

        let indexer = LayerIndexer::new(&doc);
        assert_eq!(indexer.len(), 3);
        let names: Vec<(usize, &str)> = indexer.iter().map(|(id, l)| (id, l.name.as_str())).collect();
        assert_eq!(names, vec![(0, "Walls"), (1, "Doors"), (2, "0")]);
        assert_eq!(indexer.id_of("doors"), Some(1));
        assert_eq!(indexer.id_of("missing"), None);
    }

    #[test]
    fn test_entities_scoped_to_layer() {
        let mut doc = CadDocument::new();
        doc.add_layer(Layer::new("Walls"));
        doc.add_layer(Layer::new("Doors"));
        let mut line = Line::from_coords(0.0, 0.0, 1.0, 1.0);
        line.common = EntityCommon::with_layer("Doors");
        doc.add_entity(EntityType::Line(line));

        let indexer = LayerIndexer::new(&doc);
        assert_eq!(indexer.entities(&doc, 0, EntityKind::Line).count(), 0);
        assert_eq!(indexer.entities(&doc, 1, EntityKind::Line).count(), 1);
        assert_eq!(indexer.entities(&doc, 9, EntityKind::Line).count(), 0);
    }
}

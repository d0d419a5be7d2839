//! CAD document structure

use crate::entities::{EntityKind, EntityType};
use crate::extents::{BlockBoundsCache, ExtentsItem};
use crate::notification::NotificationCollection;
use crate::tables::{BlockRecord, Layer, Table, TableEntry};
use crate::types::{BoundingBox2D, DxfVersion, Handle};
use crate::vectorize::DocumentAccessor;
use ahash::AHashMap;
use once_cell::sync::OnceCell;

type LayerKindIndex = AHashMap<(String, EntityKind), Vec<usize>>;

/// A loaded drawing: the layer and block record tables plus the
/// supported entities in file order
#[derive(Debug, Clone, Default)]
pub struct CadDocument {
    /// Document version
    pub version: DxfVersion,

    /// Layer table
    pub layers: Table<Layer>,

    /// Block record table
    pub block_records: Table<BlockRecord>,

    /// Notifications collected during the last read
    pub notifications: NotificationCollection,

    /// Entities in file order
    entities: Vec<EntityType>,

    /// Geometry of entities that count toward the extents only
    extents_items: Vec<ExtentsItem>,

    /// Block record handle to table key
    block_handles: AHashMap<Handle, String>,

    /// Modelspace entity positions keyed by (uppercase layer, kind)
    index: OnceCell<LayerKindIndex>,
}

impl CadDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with a specific version
    pub fn with_version(version: DxfVersion) -> Self {
        CadDocument {
            version,
            ..Self::default()
        }
    }

    /// Add a layer; a second layer with the same name is ignored
    pub fn add_layer(&mut self, layer: Layer) -> bool {
        self.layers.add(layer).is_ok()
    }

    /// Add a block record; a second record with the same name is ignored
    pub fn add_block_record(&mut self, record: BlockRecord) -> bool {
        let handle = record.handle();
        let name = record.name().to_string();
        if self.block_records.add(record).is_err() {
            return false;
        }
        if !handle.is_null() {
            self.block_handles.insert(handle, name);
        }
        self.index.take();
        true
    }

    /// Append an entity
    pub fn add_entity(&mut self, entity: EntityType) {
        self.entities.push(entity);
        self.index.take();
    }

    /// Record geometry that widens the extents without being vectorized
    pub fn add_extents_item(&mut self, item: ExtentsItem) {
        self.extents_items.push(item);
    }

    /// Extents-only geometry in file order
    pub fn extents_items(&self) -> impl Iterator<Item = &ExtentsItem> {
        self.extents_items.iter()
    }

    /// Get the number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterate over all entities in file order
    pub fn entities(&self) -> impl Iterator<Item = &EntityType> {
        self.entities.iter()
    }

    /// Look up a block record by handle
    pub fn block_record_by_handle(&self, handle: Handle) -> Option<&BlockRecord> {
        self.block_handles
            .get(&handle)
            .and_then(|name| self.block_records.get(name))
    }

    /// Entity is drawn in model space
    pub fn is_model_space(&self, entity: &EntityType) -> bool {
        let common = entity.common();
        self.owned_by_model_space(common.owner, common.paper_space)
    }

    fn owned_by_model_space(&self, owner: Handle, paper_space: bool) -> bool {
        if paper_space {
            return false;
        }
        self.block_record_by_handle(owner)
            .map_or(true, |record| record.is_model_space())
    }

    /// Box of the modelspace extents-only geometry, with block references
    /// expanded through the block definitions
    pub fn extents_items_bounds(&self) -> Option<BoundingBox2D> {
        let blocks = |name: &str| {
            self.block_records
                .get(name)
                .map(|record| (record.base_point, record.geometry.as_slice()))
        };
        let mut cache = BlockBoundsCache::default();
        self.extents_items
            .iter()
            .filter(|item| self.owned_by_model_space(item.owner, item.paper_space))
            .map(|item| item.geometry.bounds(&blocks, &mut cache))
            .fold(None, BoundingBox2D::union)
    }

    /// Iterate over modelspace entities in file order
    pub fn model_space_entities(&self) -> impl Iterator<Item = &EntityType> {
        self.entities.iter().filter(move |e| self.is_model_space(e))
    }

    /// Modelspace entities whose layer has no table entry
    pub fn orphaned_entities(&self) -> impl Iterator<Item = &EntityType> {
        self.model_space_entities()
            .filter(move |e| !self.layers.contains(&e.common().layer))
    }

    /// Add the tables entries every drawing implicitly has: layer "0" and
    /// the `*Model_Space` block record, appended when missing
    pub fn ensure_defaults(&mut self) {
        if !self.layers.contains("0") {
            self.add_layer(Layer::layer_0());
        }
        if !self.block_records.contains(BlockRecord::MODEL_SPACE) {
            self.add_block_record(BlockRecord::model_space());
        }
    }

    fn layer_kind_index(&self) -> &LayerKindIndex {
        self.index.get_or_init(|| {
            let mut index = LayerKindIndex::default();
            for (position, entity) in self.entities.iter().enumerate() {
                if !self.is_model_space(entity) {
                    continue;
                }
                let key = (entity.common().layer.to_uppercase(), entity.kind());
                index.entry(key).or_default().push(position);
            }
            index
        })
    }
}

impl DocumentAccessor for CadDocument {
    fn layers(&self) -> Box<dyn Iterator<Item = &Layer> + '_> {
        Box::new(self.layers.iter())
    }

    fn query<'a>(
        &'a self,
        kind: EntityKind,
        layer_name: &str,
    ) -> Box<dyn Iterator<Item = &'a EntityType> + 'a> {
        let key = (layer_name.to_uppercase(), kind);
        match self.layer_kind_index().get(&key) {
            Some(positions) => Box::new(positions.iter().map(move |&i| &self.entities[i])),
            None => Box::new(std::iter::empty()),
        }
    }

    fn owning_block(&self, entity: &EntityType) -> Option<&BlockRecord> {
        self.block_record_by_handle(entity.common().owner)
            .or_else(|| self.block_records.get(BlockRecord::MODEL_SPACE))
    }

    fn extents(&self) -> Option<BoundingBox2D> {
        let entities = self
            .model_space_entities()
            .map(|e| e.as_entity().extents())
            .fold(None, BoundingBox2D::union);
        BoundingBox2D::union(entities, self.extents_items_bounds())
    }
}

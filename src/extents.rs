//! Extents geometry of entities that are not vectorized.
//!
//! Points, text, splines, solids, hatches and block references produce no
//! primitives but still occupy model space. The reader keeps only what the
//! drawing's bounding box needs from them: a handful of points, or a
//! reference to a block placed by an insertion transform.

use crate::types::{BoundingBox2D, Handle, Vector2};
use ahash::AHashMap;

/// Nesting depth after which block references are no longer followed
pub const MAX_BLOCK_DEPTH: usize = 16;

/// Placement of a block: `insertion + R(rotation) * (scale * (p - base))`,
/// repeated over a `columns × rows` grid for MINSERT
#[derive(Debug, Clone, PartialEq)]
pub struct BlockReference {
    pub block: String,
    pub insertion: Vector2,
    pub scale: Vector2,
    /// Degrees
    pub rotation: f64,
    pub columns: u16,
    pub rows: u16,
    pub column_spacing: f64,
    pub row_spacing: f64,
}

impl BlockReference {
    pub fn new(block: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            insertion: Vector2::ZERO,
            scale: Vector2::new(1.0, 1.0),
            rotation: 0.0,
            columns: 1,
            rows: 1,
            column_spacing: 0.0,
            row_spacing: 0.0,
        }
    }

    /// Map a point of the block definition into the parent space
    pub fn transform(&self, point: Vector2, base: Vector2, column: u16, row: u16) -> Vector2 {
        let local = Vector2::new(
            (point.x - base.x) * self.scale.x + f64::from(column) * self.column_spacing,
            (point.y - base.y) * self.scale.y + f64::from(row) * self.row_spacing,
        );
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        Vector2::new(
            self.insertion.x + local.x * cos - local.y * sin,
            self.insertion.y + local.x * sin + local.y * cos,
        )
    }

    /// Box of a block-local box placed by this reference.
    ///
    /// The grid is linear, so the outer cells bound all others.
    pub fn place(&self, local: &BoundingBox2D, base: Vector2) -> Option<BoundingBox2D> {
        let corners = [
            local.min,
            Vector2::new(local.max.x, local.min.y),
            local.max,
            Vector2::new(local.min.x, local.max.y),
        ];
        let last_column = self.columns.max(1) - 1;
        let last_row = self.rows.max(1) - 1;
        let mut points = Vec::with_capacity(16);
        for column in [0, last_column] {
            for row in [0, last_row] {
                points.extend(corners.iter().map(|c| self.transform(*c, base, column, row)));
            }
        }
        BoundingBox2D::from_points(&points)
    }
}

/// What a non-vectorized entity contributes to the drawing extents
#[derive(Debug, Clone, PartialEq)]
pub enum ExtentsGeometry {
    Points(Vec<Vector2>),
    Block(BlockReference),
}

impl ExtentsGeometry {
    /// Box of the geometry, following block references through `blocks`
    pub fn bounds<'a, F>(&self, blocks: &F, cache: &mut BlockBoundsCache) -> Option<BoundingBox2D>
    where
        F: Fn(&str) -> Option<(Vector2, &'a [ExtentsGeometry])>,
    {
        self.bounds_at(blocks, cache, 0)
    }

    fn bounds_at<'a, F>(
        &self,
        blocks: &F,
        cache: &mut BlockBoundsCache,
        depth: usize,
    ) -> Option<BoundingBox2D>
    where
        F: Fn(&str) -> Option<(Vector2, &'a [ExtentsGeometry])>,
    {
        match self {
            ExtentsGeometry::Points(points) => BoundingBox2D::from_points(points),
            ExtentsGeometry::Block(reference) => {
                let (base, _) = blocks(&reference.block)?;
                let local = block_bounds(&reference.block, blocks, cache, depth + 1)?;
                reference.place(&local, base)
            }
        }
    }
}

/// Block-local boxes keyed by uppercase block name, `None` while a block is
/// being resolved so reference cycles end empty
pub type BlockBoundsCache = AHashMap<String, Option<BoundingBox2D>>;

fn block_bounds<'a, F>(
    name: &str,
    blocks: &F,
    cache: &mut BlockBoundsCache,
    depth: usize,
) -> Option<BoundingBox2D>
where
    F: Fn(&str) -> Option<(Vector2, &'a [ExtentsGeometry])>,
{
    if depth > MAX_BLOCK_DEPTH {
        return None;
    }
    let key = name.to_uppercase();
    if let Some(cached) = cache.get(&key) {
        return *cached;
    }
    cache.insert(key.clone(), None);

    let (_, geometry) = blocks(name)?;
    let bounds = geometry
        .iter()
        .map(|item| item.bounds_at(blocks, cache, depth))
        .fold(None, BoundingBox2D::union);
    cache.insert(key, bounds);
    bounds
}

/// A model-space candidate: the owner and paper-space flag decide later
/// whether it counts
#[derive(Debug, Clone, PartialEq)]
pub struct ExtentsItem {
    pub owner: Handle,
    pub paper_space: bool,
    pub geometry: ExtentsGeometry,
}

#[cfg(test)]
mod tests {
    use super::*;

    type Blocks = Vec<(&'static str, Vector2, Vec<ExtentsGeometry>)>;

    fn lookup<'b>(
        blocks: &'b Blocks,
    ) -> impl Fn(&str) -> Option<(Vector2, &'b [ExtentsGeometry])> + 'b {
        move |name: &str| {
            blocks
                .iter()
                .find(|(n, _, _)| n.eq_ignore_ascii_case(name))
                .map(|(_, base, geometry)| (*base, geometry.as_slice()))
        }
    }

    fn unit_square() -> ExtentsGeometry {
        ExtentsGeometry::Points(vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, 1.0)])
    }

    fn assert_box(bbox: BoundingBox2D, min: (f64, f64), max: (f64, f64)) {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert!(
            close(bbox.min.x, min.0) && close(bbox.min.y, min.1),
            "min {:?}",
            bbox.min
        );
        assert!(
            close(bbox.max.x, max.0) && close(bbox.max.y, max.1),
            "max {:?}",
            bbox.max
        );
    }

    #[test]
    fn test_insert_scales_and_translates() {
        let blocks: Blocks = vec![("door", Vector2::ZERO, vec![unit_square()])];
        let mut reference = BlockReference::new("DOOR");
        reference.insertion = Vector2::new(10.0, 5.0);
        reference.scale = Vector2::new(2.0, 3.0);

        let bbox = ExtentsGeometry::Block(reference)
            .bounds(&lookup(&blocks), &mut BlockBoundsCache::default())
            .unwrap();
        assert_box(bbox, (10.0, 5.0), (12.0, 8.0));
    }

    #[test]
    fn test_insert_rotation_and_base_point() {
        let blocks: Blocks = vec![("door", Vector2::new(1.0, 0.0), vec![unit_square()])];
        let mut reference = BlockReference::new("door");
        reference.rotation = 90.0;

        let bbox = ExtentsGeometry::Block(reference)
            .bounds(&lookup(&blocks), &mut BlockBoundsCache::default())
            .unwrap();
        // Local box (-1,0)..(0,1) turned a quarter
        assert_box(bbox, (-1.0, -1.0), (0.0, 0.0));
    }

    #[test]
    fn test_minsert_grid() {
        let blocks: Blocks = vec![("cell", Vector2::ZERO, vec![unit_square()])];
        let mut reference = BlockReference::new("cell");
        reference.columns = 3;
        reference.rows = 2;
        reference.column_spacing = 5.0;
        reference.row_spacing = 4.0;

        let bbox = ExtentsGeometry::Block(reference)
            .bounds(&lookup(&blocks), &mut BlockBoundsCache::default())
            .unwrap();
        assert_box(bbox, (0.0, 0.0), (11.0, 5.0));
    }

    #[test]
    fn test_nested_blocks_and_cycles() {
        let mut inner = BlockReference::new("inner");
        inner.insertion = Vector2::new(100.0, 0.0);
        let blocks: Blocks = vec![
            ("inner", Vector2::ZERO, vec![unit_square()]),
            ("outer", Vector2::ZERO, vec![ExtentsGeometry::Block(inner)]),
            ("loop", Vector2::ZERO, vec![ExtentsGeometry::Block(BlockReference::new("loop"))]),
        ];
        let lookup = lookup(&blocks);
        let mut cache = BlockBoundsCache::default();

        let bbox = ExtentsGeometry::Block(BlockReference::new("outer"))
            .bounds(&lookup, &mut cache)
            .unwrap();
        assert_box(bbox, (100.0, 0.0), (101.0, 1.0));

        let cyclic = ExtentsGeometry::Block(BlockReference::new("loop")).bounds(&lookup, &mut cache);
        assert!(cyclic.is_none());
    }

    #[test]
    fn test_missing_block_has_no_extents() {
        let blocks: Blocks = Vec::new();
        let geometry = ExtentsGeometry::Block(BlockReference::new("ghost"));
        assert!(geometry
            .bounds(&lookup(&blocks), &mut BlockBoundsCache::default())
            .is_none());
    }
}

//! Stroke color and thickness resolution

use crate::entities::EntityCommon;
use crate::tables::{BlockRecord, Layer};
use crate::types::{aci_to_rgb, Color};

/// Thickness used when no entity in a drawing carries one
pub const DEFAULT_THICKNESS: i32 = 50;

/// Color index used when the whole cascade is symbolic
pub const DEFAULT_COLOR_INDEX: u8 = 7;

/// Placeholder for "no thickness resolved" between the two passes
pub const UNSET_THICKNESS: i32 = 0;

/// Resolves per-entity stroke attributes through the
/// entity → layer → block → default cascade.
#[derive(Debug, Clone, Copy)]
pub struct AttributeResolver {
    default_thickness: i32,
}

impl AttributeResolver {
    pub fn new(default_thickness: i32) -> Self {
        Self { default_thickness }
    }

    /// RGB stroke color of an entity.
    ///
    /// ByLayer consults the layer, then the block. ByBlock skips the layer.
    /// Symbolic values on the layer or block fall through to the next step.
    pub fn resolve_color(
        &self,
        entity: &EntityCommon,
        layer: Option<&Layer>,
        block: Option<&BlockRecord>,
    ) -> [u8; 3] {
        let from_layer = || match entity.color {
            Color::ByLayer => layer.and_then(|l| l.color.to_rgb()),
            _ => None,
        };
        let from_block = || block.and_then(|b| b.color.to_rgb());

        entity
            .color
            .to_rgb()
            .or_else(from_layer)
            .or_else(from_block)
            .unwrap_or_else(|| aci_to_rgb(DEFAULT_COLOR_INDEX))
    }

    /// First-pass thickness: the first positive line weight along the
    /// cascade, or [`UNSET_THICKNESS`]
    pub fn resolve_thickness(
        &self,
        entity: &EntityCommon,
        layer: Option<&Layer>,
        block: Option<&BlockRecord>,
    ) -> i32 {
        entity
            .line_weight
            .thickness()
            .or_else(|| layer.and_then(|l| l.line_weight.thickness()))
            .or_else(|| block.and_then(|b| b.line_weight.thickness()))
            .unwrap_or(UNSET_THICKNESS)
    }

    /// Value that replaces unset thicknesses: the truncated mean of the
    /// positive ones, or the configured default when there are none
    pub fn fill_value(&self, widths: &[i32]) -> i32 {
        let (sum, count) = widths
            .iter()
            .filter(|&&w| w > UNSET_THICKNESS)
            .fold((0i64, 0i64), |(sum, count), &w| (sum + i64::from(w), count + 1));
        if count == 0 {
            self.default_thickness
        } else {
            // Mean of i32 values always fits
            (sum / count) as i32
        }
    }

    /// Second pass: overwrite every unset thickness in place
    pub fn normalize_widths(&self, widths: &mut [i32]) {
        let fill = self.fill_value(widths);
        for width in widths.iter_mut().filter(|w| **w <= UNSET_THICKNESS) {
            *width = fill;
        }
    }
}

impl Default for AttributeResolver {
    fn default() -> Self {
        Self::new(DEFAULT_THICKNESS)
    }
}

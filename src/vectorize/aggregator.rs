//! Drives a whole drawing through sampling and style resolution

use super::accessor::DocumentAccessor;
use super::layers::LayerIndexer;
use super::record::{Command, DrawingRecord};
use super::sampler::{ArcAngleMode, Primitive};
use super::style::{AttributeResolver, DEFAULT_THICKNESS};
use crate::entities::EntityKind;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// How curved primitives are tagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CommandTaxonomy {
    /// Circles, ellipses and arcs are all tagged `circle`
    #[default]
    Collapsed,
    /// Arcs, circles and ellipses keep their own tags
    Full,
}

/// Options that change the produced record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    pub taxonomy: CommandTaxonomy,
    /// Fill value when no entity in a drawing has a thickness
    pub default_thickness: i32,
    /// Feed arc angles to cos/sin in degrees
    pub legacy_arc_points: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            taxonomy: CommandTaxonomy::Collapsed,
            default_thickness: DEFAULT_THICKNESS,
            legacy_arc_points: false,
        }
    }
}

impl ConversionOptions {
    pub fn arc_angle_mode(&self) -> ArcAngleMode {
        if self.legacy_arc_points {
            ArcAngleMode::LegacyDegrees
        } else {
            ArcAngleMode::Radians
        }
    }
}

/// Builds one [`DrawingRecord`] from a drawing
#[derive(Debug, Clone)]
pub struct DrawingAggregator {
    options: ConversionOptions,
    resolver: AttributeResolver,
}

impl DrawingAggregator {
    pub fn new(options: ConversionOptions) -> Self {
        let resolver = AttributeResolver::new(options.default_thickness);
        Self { options, resolver }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Tag for a primitive under the configured taxonomy
    pub fn command_for(&self, primitive: &Primitive) -> Command {
        let full = match primitive {
            Primitive::Line { .. } | Primitive::Polyline { .. } => Command::Line,
            Primitive::Circle { .. } => Command::Circle,
            Primitive::Ellipse { .. } => Command::Ellipse,
            Primitive::Arc { .. } => Command::Arc,
        };
        match (self.options.taxonomy, full) {
            (CommandTaxonomy::Collapsed, Command::Arc | Command::Ellipse) => Command::Circle,
            _ => full,
        }
    }

    /// Visit every layer, then every entity kind in
    /// [`EntityKind::QUERY_ORDER`], then fill unset thicknesses.
    ///
    /// The returned record has passed [`DrawingRecord::validate`].
    pub fn aggregate<D: DocumentAccessor + ?Sized>(&self, document: &D) -> Result<DrawingRecord> {
        let layers = LayerIndexer::new(document);
        let arc_mode = self.options.arc_angle_mode();
        let mut record = DrawingRecord::new();

        for (layer_id, layer) in layers.iter() {
            for kind in EntityKind::QUERY_ORDER {
                for entity in layers.entities(document, layer_id, kind) {
                    let common = entity.common();
                    let block = document.owning_block(entity);
                    let rgb = self.resolver.resolve_color(common, Some(layer), block);
                    let width = self.resolver.resolve_thickness(common, Some(layer), block);

                    let primitive = Primitive::from_entity(entity);
                    let command = self.command_for(&primitive);
                    for sample in primitive.samples(arc_mode) {
                        record.push(command, sample.args(), sample.length, rgb, layer_id, width);
                    }
                }
            }
            tracing::trace!(layer = %layer.name, layer_id, records = record.len(), "layer done");
        }

        self.resolver.normalize_widths(&mut record.widths);

        if let Some(bbox) = document.extents() {
            record.width = bbox.width();
            record.height = bbox.height();
        }

        record.validate(layers.len())?;
        tracing::debug!(
            records = record.len(),
            layers = layers.len(),
            width = record.width,
            height = record.height,
            "drawing aggregated"
        );
        Ok(record)
    }
}

impl Default for DrawingAggregator {
    fn default() -> Self {
        Self::new(ConversionOptions::default())
    }
}

//! Drawing to ML record conversion
//!
//! [`DrawingAggregator`] walks a [`DocumentAccessor`] layer by layer, turns
//! each entity into one or more samples with the [`sampler`] functions,
//! resolves stroke styling with [`AttributeResolver`] and collects the result
//! in a [`DrawingRecord`].

pub mod accessor;
pub mod aggregator;
pub mod layers;
pub mod record;
pub mod sampler;
pub mod style;

pub use accessor::DocumentAccessor;
pub use aggregator::{CommandTaxonomy, ConversionOptions, DrawingAggregator};
pub use layers::LayerIndexer;
pub use record::{Command, DrawingRecord, COMMANDS};
pub use sampler::{ArcAngleMode, Primitive, Sample};
pub use style::{AttributeResolver, DEFAULT_THICKNESS};

use crate::error::Result;
use crate::io::DxfReader;
use std::path::Path;

/// Read a DXF file and convert its model space into a record
pub fn vectorize_file(path: &Path, options: &ConversionOptions) -> Result<DrawingRecord> {
    let document = DxfReader::from_file(path)?.read()?;
    document.notifications.emit(&path.display().to_string());
    DrawingAggregator::new(options.clone()).aggregate(&document)
}

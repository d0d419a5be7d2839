//! # dxf-vectorize
//!
//! Converts DXF drawings into flat, schema-normalized primitive records for
//! machine-learning datasets.
//!
//! Every line, polyline segment, circle, arc and ellipse in a drawing's model
//! space becomes one record of four control points and an arc length, tagged
//! with its command, layer id, RGB stroke color and stroke thickness. Color
//! and thickness are resolved through the entity → layer → block cascade and
//! unset thicknesses are filled with the drawing's mean.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dxf_vectorize::{ConversionOptions, DrawingAggregator, DxfReader, JsonWriter};
//!
//! let doc = DxfReader::from_file("plan.dxf")?.read()?;
//! let record = DrawingAggregator::new(ConversionOptions::default()).aggregate(&doc)?;
//! JsonWriter::new().write(&record, "plan.json".as_ref())?;
//! # Ok::<(), dxf_vectorize::DxfError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`io::dxf`] reads the ASCII group-code stream into a [`CadDocument`]
//! - [`vectorize::DocumentAccessor`] is the view of a drawing the converter
//!   needs: layers, per-layer entity queries, owning blocks and extents
//! - [`vectorize::DrawingAggregator`] samples entities and resolves styling
//! - [`io::json`] writes the record
//! - [`batch`] runs many files on a thread pool for the `dxf2json` binary

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod batch;
pub mod config;
pub mod document;
pub mod entities;
pub mod error;
pub mod extents;
pub mod io;
pub mod notification;
pub mod tables;
pub mod types;
pub mod vectorize;

pub use error::{DxfError, Result};
pub use types::{BoundingBox2D, Color, DxfVersion, Handle, LineWeight, Vector2, Vector3};

pub use entities::{Arc, Circle, Ellipse, Entity, EntityType, Line, LwPolyline, Polyline};

pub use tables::{BlockRecord, Layer, Table, TableEntry};

pub use document::CadDocument;

pub use io::{DxfReader, JsonWriter};

pub use vectorize::{
    vectorize_file, CommandTaxonomy, ConversionOptions, DocumentAccessor, DrawingAggregator,
    DrawingRecord,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

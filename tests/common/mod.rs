//! Shared helpers for dxf-vectorize integration tests.
//!
//! [`DxfBuilder`] writes small ASCII DXF files group by group so each test
//! states exactly the tables and entities it depends on.

#![allow(dead_code)]

use dxf_vectorize::{CadDocument, DxfReader};
use std::fmt::Write as _;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Extra group codes appended to an entity, e.g. `&[(62, "1"), (370, "25")]`
pub type Groups<'a> = &'a [(i32, &'a str)];

/// Incremental ASCII DXF writer
#[derive(Debug, Clone)]
pub struct DxfBuilder {
    version: String,
    layers: String,
    block_records: String,
    blocks: String,
    entities: String,
}

impl Default for DxfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn pair(out: &mut String, code: i32, value: impl std::fmt::Display) {
    let _ = write!(out, "{code:>3}\n{value}\n");
}

fn groups(out: &mut String, extra: Groups) {
    for (code, value) in extra {
        pair(out, *code, value);
    }
}

impl DxfBuilder {
    pub fn new() -> Self {
        Self {
            version: "AC1027".to_string(),
            layers: String::new(),
            block_records: String::new(),
            blocks: String::new(),
            entities: String::new(),
        }
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// LAYER table entry with optional color index and line weight
    pub fn layer(mut self, name: &str, color: i16, line_weight: Option<i16>) -> Self {
        let out = &mut self.layers;
        pair(out, 0, "LAYER");
        pair(out, 2, name);
        pair(out, 70, 0);
        pair(out, 62, color);
        pair(out, 6, "Continuous");
        if let Some(lw) = line_weight {
            pair(out, 370, lw);
        }
        self
    }

    /// BLOCK_RECORD table entry
    pub fn block_record(mut self, name: &str, handle: &str) -> Self {
        let out = &mut self.block_records;
        pair(out, 0, "BLOCK_RECORD");
        pair(out, 5, handle);
        pair(out, 2, name);
        self
    }

    /// BLOCK definition carrying styling groups
    pub fn block(mut self, name: &str, extra: Groups) -> Self {
        let out = &mut self.blocks;
        pair(out, 0, "BLOCK");
        pair(out, 8, "0");
        pair(out, 2, name);
        groups(out, extra);
        pair(out, 10, 0.0);
        pair(out, 20, 0.0);
        pair(out, 0, "ENDBLK");
        pair(out, 8, "0");
        self
    }

    /// BLOCK definition with a base point and raw content groups, entity
    /// markers included
    pub fn block_with(mut self, name: &str, base: (f64, f64), content: Groups) -> Self {
        let out = &mut self.blocks;
        pair(out, 0, "BLOCK");
        pair(out, 8, "0");
        pair(out, 2, name);
        pair(out, 70, 0);
        pair(out, 10, base.0);
        pair(out, 20, base.1);
        pair(out, 30, 0.0);
        pair(out, 3, name);
        groups(out, content);
        pair(out, 0, "ENDBLK");
        pair(out, 8, "0");
        self
    }

    pub fn point(mut self, layer: &str, at: (f64, f64), extra: Groups) -> Self {
        let out = &mut self.entities;
        pair(out, 0, "POINT");
        pair(out, 8, layer);
        groups(out, extra);
        pair(out, 10, at.0);
        pair(out, 20, at.1);
        pair(out, 30, 0.0);
        self
    }

    pub fn line(mut self, layer: &str, start: (f64, f64), end: (f64, f64), extra: Groups) -> Self {
        let out = &mut self.entities;
        pair(out, 0, "LINE");
        pair(out, 8, layer);
        groups(out, extra);
        pair(out, 10, start.0);
        pair(out, 20, start.1);
        pair(out, 30, 0.0);
        pair(out, 11, end.0);
        pair(out, 21, end.1);
        pair(out, 31, 0.0);
        self
    }

    pub fn circle(mut self, layer: &str, center: (f64, f64), radius: f64, extra: Groups) -> Self {
        let out = &mut self.entities;
        pair(out, 0, "CIRCLE");
        pair(out, 8, layer);
        groups(out, extra);
        pair(out, 10, center.0);
        pair(out, 20, center.1);
        pair(out, 30, 0.0);
        pair(out, 40, radius);
        self
    }

    pub fn arc(
        mut self,
        layer: &str,
        center: (f64, f64),
        radius: f64,
        angles: (f64, f64),
        extra: Groups,
    ) -> Self {
        let out = &mut self.entities;
        pair(out, 0, "ARC");
        pair(out, 8, layer);
        groups(out, extra);
        pair(out, 10, center.0);
        pair(out, 20, center.1);
        pair(out, 30, 0.0);
        pair(out, 40, radius);
        pair(out, 50, angles.0);
        pair(out, 51, angles.1);
        self
    }

    pub fn ellipse(
        mut self,
        layer: &str,
        center: (f64, f64),
        major: (f64, f64),
        ratio: f64,
        extra: Groups,
    ) -> Self {
        let out = &mut self.entities;
        pair(out, 0, "ELLIPSE");
        pair(out, 8, layer);
        groups(out, extra);
        pair(out, 10, center.0);
        pair(out, 20, center.1);
        pair(out, 30, 0.0);
        pair(out, 11, major.0);
        pair(out, 21, major.1);
        pair(out, 31, 0.0);
        pair(out, 40, ratio);
        pair(out, 41, 0.0);
        pair(out, 42, std::f64::consts::TAU);
        self
    }

    pub fn lwpolyline(mut self, layer: &str, points: &[(f64, f64)], closed: bool, extra: Groups) -> Self {
        let out = &mut self.entities;
        pair(out, 0, "LWPOLYLINE");
        pair(out, 8, layer);
        groups(out, extra);
        pair(out, 90, points.len());
        pair(out, 70, if closed { 1 } else { 0 });
        for (x, y) in points {
            pair(out, 10, x);
            pair(out, 20, y);
        }
        self
    }

    /// Old-style POLYLINE with VERTEX entities and SEQEND
    pub fn polyline(mut self, layer: &str, points: &[(f64, f64)], flags: i16, extra: Groups) -> Self {
        let out = &mut self.entities;
        pair(out, 0, "POLYLINE");
        pair(out, 8, layer);
        groups(out, extra);
        pair(out, 66, 1);
        pair(out, 70, flags);
        for (x, y) in points {
            pair(out, 0, "VERTEX");
            pair(out, 8, layer);
            pair(out, 10, x);
            pair(out, 20, y);
            pair(out, 30, 0.0);
        }
        pair(out, 0, "SEQEND");
        pair(out, 8, layer);
        self
    }

    /// Any other entity, written verbatim from its groups
    pub fn raw_entity(mut self, name: &str, extra: Groups) -> Self {
        let out = &mut self.entities;
        pair(out, 0, name);
        groups(out, extra);
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::new();
        pair(&mut out, 0, "SECTION");
        pair(&mut out, 2, "HEADER");
        pair(&mut out, 9, "$ACADVER");
        pair(&mut out, 1, &self.version);
        pair(&mut out, 0, "ENDSEC");

        pair(&mut out, 0, "SECTION");
        pair(&mut out, 2, "TABLES");
        pair(&mut out, 0, "TABLE");
        pair(&mut out, 2, "LAYER");
        out.push_str(&self.layers);
        pair(&mut out, 0, "ENDTAB");
        pair(&mut out, 0, "TABLE");
        pair(&mut out, 2, "BLOCK_RECORD");
        out.push_str(&self.block_records);
        pair(&mut out, 0, "ENDTAB");
        pair(&mut out, 0, "ENDSEC");

        pair(&mut out, 0, "SECTION");
        pair(&mut out, 2, "BLOCKS");
        out.push_str(&self.blocks);
        pair(&mut out, 0, "ENDSEC");

        pair(&mut out, 0, "SECTION");
        pair(&mut out, 2, "ENTITIES");
        out.push_str(&self.entities);
        pair(&mut out, 0, "ENDSEC");
        pair(&mut out, 0, "EOF");
        out
    }

    /// Write the drawing to `<dir>/<name>` and return the path
    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.build()).expect("write test drawing");
        path
    }

    pub fn read(&self) -> CadDocument {
        read_text(&self.build()).expect("read test drawing")
    }
}

/// Parse DXF text held in memory
pub fn read_text(text: &str) -> dxf_vectorize::Result<CadDocument> {
    read_bytes(text.as_bytes())
}

pub fn read_bytes(bytes: &[u8]) -> dxf_vectorize::Result<CadDocument> {
    DxfReader::from_reader(Cursor::new(bytes.to_vec()))?.read()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub fn assert_point(actual: [f64; 2], expected: (f64, f64)) {
    assert_close(actual[0], expected.0);
    assert_close(actual[1], expected.1);
}

//! JSON output for drawing records

use crate::error::Result;
use crate::vectorize::DrawingRecord;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes [`DrawingRecord`]s as four-space indented JSON.
///
/// A record is serialized in memory, written next to the target as
/// `<name>.json.tmp` and renamed into place, so the target either holds a
/// complete record or does not exist.
#[derive(Debug, Clone, Default)]
pub struct JsonWriter;

impl JsonWriter {
    pub fn new() -> Self {
        JsonWriter
    }

    /// Serialize a record to bytes
    pub fn to_bytes(&self, record: &DrawingRecord) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(64 + record.len() * 160);
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        record.serialize(&mut serializer)?;
        Ok(buffer)
    }

    /// Write a record to `path`
    pub fn write(&self, record: &DrawingRecord, path: &Path) -> Result<()> {
        let bytes = self.to_bytes(record)?;
        let tmp = temp_path(path);
        if let Err(err) = fs::write(&tmp, &bytes).and_then(|_| fs::rename(&tmp, path)) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        tracing::trace!(path = %path.display(), bytes = bytes.len(), "record written");
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorize::Command;

    fn record() -> DrawingRecord {
        let mut record = DrawingRecord::new();
        record.push(
            Command::Circle,
            [[2.0, 0.0], [0.0, 2.0], [-2.0, 0.0], [0.0, -2.0]],
            12.5,
            [255, 0, 0],
            0,
            50,
        );
        record.width = 4.0;
        record.height = 4.0;
        record
    }

    #[test]
    fn test_key_order_and_indent() {
        let text = String::from_utf8(JsonWriter::new().to_bytes(&record()).unwrap()).unwrap();
        let keys = ["commands", "args", "lengths", "width", "height", "rgb", "layerIds", "widths"];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| text.find(&format!("\"{k}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.starts_with("{\n    \"commands\": [\n        2\n    ],"));
    }

    #[test]
    fn test_floats_keep_decimal_point() {
        let text = String::from_utf8(JsonWriter::new().to_bytes(&record()).unwrap()).unwrap();
        assert!(text.contains("\"width\": 4.0"));
        assert!(text.contains("12.5"));
    }

    #[test]
    fn test_temp_path() {
        assert_eq!(temp_path(Path::new("/x/a.json")), PathBuf::from("/x/a.json.tmp"));
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a.json");
        JsonWriter::new().write(&record(), &target).unwrap();
        assert!(target.exists());
        assert!(!dir.path().join("a.json.tmp").exists());

        let back: DrawingRecord = serde_json::from_slice(&std::fs::read(&target).unwrap()).unwrap();
        assert_eq!(back, record());
    }

    #[test]
    fn test_write_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("a.json");
        assert!(JsonWriter::new().write(&record(), &target).is_err());
        assert!(!target.exists());
    }
}

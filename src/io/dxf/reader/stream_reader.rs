//! DXF stream reader trait and common types

use crate::error::{DxfError, Result};
use crate::types::{Handle, Vector3};
use encoding_rs::Encoding;

/// A DXF code/value pair
#[derive(Debug, Clone, PartialEq)]
pub struct DxfCodePair {
    /// The DXF group code
    pub code: i32,

    /// Raw value text, trimmed
    pub value_string: String,

    /// Line of the value in the source, for error messages
    pub line: usize,
}

impl DxfCodePair {
    /// Create a new code/value pair
    pub fn new(code: i32, value_string: String, line: usize) -> Self {
        Self {
            code,
            value_string,
            line,
        }
    }

    /// True for a `0` pair carrying the given structure marker
    pub fn is(&self, marker: &str) -> bool {
        self.code == 0 && self.value_string == marker
    }

    /// Get value as i16
    pub fn as_i16(&self) -> Result<i16> {
        self.as_i64().and_then(|v| {
            i16::try_from(v).map_err(|_| self.malformed("16-bit integer"))
        })
    }

    /// Get value as integer
    pub fn as_i64(&self) -> Result<i64> {
        let text = self.value_string.trim();
        text.parse::<i64>()
            .or_else(|_| text.parse::<f64>().map(|v| v as i64))
            .map_err(|_| self.malformed("integer"))
    }

    /// Get value as double
    pub fn as_double(&self) -> Result<f64> {
        self.value_string
            .trim()
            .parse::<f64>()
            .map_err(|_| self.malformed("floating point number"))
    }

    /// Get value as handle (hex string); unparsable handles read as null
    pub fn as_handle(&self) -> Handle {
        Handle::from_hex(self.value_string.trim()).unwrap_or(Handle::NULL)
    }

    fn malformed(&self, expected: &str) -> DxfError {
        DxfError::Parse(format!(
            "Expected {} for group code {} at line {}: '{}'",
            expected, self.code, self.line, self.value_string
        ))
    }
}

/// Trait for reading DXF code/value pairs from a stream
pub trait DxfStreamReader {
    /// Read the next code/value pair; `None` at end of stream
    fn read_pair(&mut self) -> Result<Option<DxfCodePair>>;

    /// Peek at the next code without consuming it
    fn peek_code(&mut self) -> Result<Option<i32>>;

    /// Push a pair back to be read again on next read_pair call
    fn push_back(&mut self, pair: DxfCodePair);

    /// Reset the reader to the beginning
    fn reset(&mut self) -> Result<()>;

    /// Set the fallback encoding for non-UTF-8 text
    fn set_encoding(&mut self, encoding: &'static Encoding);
}

/// Helper for reading 3D points from consecutive code pairs
///
/// Codes `1x`, `2x` and `3x` carry X, Y and Z of point group `x`.
#[derive(Debug, Default)]
pub struct PointReader {
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
}

impl PointReader {
    /// Create a new point reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a coordinate value
    pub fn add_coordinate(&mut self, pair: &DxfCodePair) -> Result<()> {
        let value = pair.as_double()?;
        match pair.code / 10 {
            1 => self.x = Some(value),
            2 => self.y = Some(value),
            3 => self.z = Some(value),
            _ => {}
        }
        Ok(())
    }

    /// Get the point (returns Vector3 with z=0 if z not provided)
    pub fn get_point(&self) -> Option<Vector3> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Vector3::new(x, y, self.z.unwrap_or(0.0))),
            _ => None,
        }
    }
}

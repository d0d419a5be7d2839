//! The structure-of-arrays record persisted for every drawing

use crate::error::{DxfError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbolic command vocabulary; a command's tag is its index here
pub const COMMANDS: [&str; 4] = ["line", "arc", "circle", "ellipse"];

/// Primitive type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Line = 0,
    Arc = 1,
    Circle = 2,
    Ellipse = 3,
}

impl Command {
    /// Numeric tag written to `commands`
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Symbolic name
    pub fn name(self) -> &'static str {
        COMMANDS[self as usize]
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Command::Line),
            1 => Some(Command::Arc),
            2 => Some(Command::Circle),
            3 => Some(Command::Ellipse),
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Six index-aligned sequences plus the drawing size.
///
/// Record `i` is `commands[i]`, `args[i]`, `lengths[i]`, `rgb[i]`,
/// `layer_ids[i]` and `widths[i]`. Field order is the JSON key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingRecord {
    pub commands: Vec<u8>,
    pub args: Vec<[[f64; 2]; 4]>,
    pub lengths: Vec<f64>,
    pub width: f64,
    pub height: f64,
    pub rgb: Vec<[u8; 3]>,
    #[serde(rename = "layerIds")]
    pub layer_ids: Vec<usize>,
    pub widths: Vec<i32>,
}

impl DrawingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of primitives
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Append one primitive to every sequence
    pub fn push(
        &mut self,
        command: Command,
        args: [[f64; 2]; 4],
        length: f64,
        rgb: [u8; 3],
        layer_id: usize,
        width: i32,
    ) {
        self.commands.push(command.tag());
        self.args.push(args);
        self.lengths.push(length);
        self.rgb.push(rgb);
        self.layer_ids.push(layer_id);
        self.widths.push(width);
    }

    /// Check the structure-of-arrays contract against a drawing with
    /// `layer_count` enumerated layers
    pub fn validate(&self, layer_count: usize) -> Result<()> {
        let n = self.commands.len();
        let sizes = [
            ("args", self.args.len()),
            ("lengths", self.lengths.len()),
            ("rgb", self.rgb.len()),
            ("layerIds", self.layer_ids.len()),
            ("widths", self.widths.len()),
        ];
        if let Some((name, len)) = sizes.iter().find(|(_, len)| *len != n) {
            return Err(invalid(format!("{name} has {len} entries, commands has {n}")));
        }

        if let Some(i) = self.commands.iter().position(|&c| Command::from_tag(c).is_none()) {
            return Err(invalid(format!("unknown command tag {} at {}", self.commands[i], i)));
        }
        if let Some(i) = self.widths.iter().position(|&w| w <= 0) {
            return Err(invalid(format!("width {} at {} is not positive", self.widths[i], i)));
        }
        if let Some(i) = self.layer_ids.iter().position(|&id| id >= layer_count) {
            return Err(invalid(format!(
                "layer id {} at {} exceeds {} layers",
                self.layer_ids[i], i, layer_count
            )));
        }

        let finite_args = self.args.iter().flatten().flatten().all(|v| v.is_finite());
        let finite_lengths = self.lengths.iter().all(|v| v.is_finite());
        if !finite_args || !finite_lengths || !self.width.is_finite() || !self.height.is_finite() {
            return Err(invalid("non-finite coordinate or length".to_string()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> DxfError {
    DxfError::InvalidRecord(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_line() -> DrawingRecord {
        let mut record = DrawingRecord::new();
        record.push(
            Command::Line,
            [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]],
            3.0,
            [255, 255, 255],
            0,
            25,
        );
        record
    }

    #[test]
    fn test_command_tags() {
        assert_eq!(Command::Line.tag(), 0);
        assert_eq!(Command::Ellipse.tag(), 3);
        assert_eq!(Command::Circle.name(), "circle");
        assert_eq!(Command::from_tag(1), Some(Command::Arc));
        assert_eq!(Command::from_tag(4), None);
    }

    #[test]
    fn test_push_keeps_alignment() {
        let record = one_line();
        assert_eq!(record.len(), 1);
        assert!(record.validate(1).is_ok());
    }

    #[test]
    fn test_validate_rejects_misalignment() {
        let mut record = one_line();
        record.lengths.push(1.0);
        assert!(matches!(record.validate(1), Err(DxfError::InvalidRecord(_))));
    }

    #[test]
    fn test_validate_rejects_zero_width_and_bad_layer() {
        let mut record = one_line();
        record.widths[0] = 0;
        assert!(record.validate(1).is_err());

        let record = one_line();
        assert!(record.validate(0).is_err());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut record = one_line();
        record.args[0][1][0] = f64::NAN;
        assert!(record.validate(1).is_err());
    }

    #[test]
    fn test_empty_record_is_valid() {
        assert!(DrawingRecord::new().validate(0).is_ok());
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(one_line()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert!(keys.contains(&"layerIds"));
        assert!(!keys.contains(&"layer_ids"));
    }
}

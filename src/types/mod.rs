//! Core value types shared by the reader and the vectorizer

pub mod bounds;
pub mod color;
pub mod handle;
pub mod line_weight;
pub mod vector;

pub use bounds::BoundingBox2D;
pub use color::{aci_to_rgb, Color};
pub use handle::Handle;
pub use line_weight::LineWeight;
pub use vector::{Vector2, Vector3};

/// DXF file version, as announced by `$ACADVER`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DxfVersion {
    #[default]
    Unknown,
    /// R12
    AC1009,
    /// R13
    AC1012,
    /// R14
    AC1014,
    /// 2000
    AC1015,
    /// 2004
    AC1018,
    /// 2007
    AC1021,
    /// 2010
    AC1024,
    /// 2013
    AC1027,
    /// 2018
    AC1032,
}

impl DxfVersion {
    /// Parse the `$ACADVER` string
    pub fn from_version_string(s: &str) -> Self {
        match s.trim() {
            "AC1009" => DxfVersion::AC1009,
            "AC1012" => DxfVersion::AC1012,
            "AC1014" => DxfVersion::AC1014,
            "AC1015" => DxfVersion::AC1015,
            "AC1018" => DxfVersion::AC1018,
            "AC1021" => DxfVersion::AC1021,
            "AC1024" => DxfVersion::AC1024,
            "AC1027" => DxfVersion::AC1027,
            "AC1032" => DxfVersion::AC1032,
            _ => DxfVersion::Unknown,
        }
    }

    /// Files from AutoCAD 2007 on are always UTF-8
    pub fn is_unicode(&self) -> bool {
        *self >= DxfVersion::AC1021
    }
}

//! Reading drawings and writing records

pub mod dxf;
pub mod json;

pub use dxf::DxfReader;
pub use json::JsonWriter;

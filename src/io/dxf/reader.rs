//! DXF file reader

mod section_reader;
mod stream_reader;
mod text_reader;

pub use stream_reader::{DxfCodePair, DxfStreamReader};
pub use text_reader::DxfTextReader;

use section_reader::SectionReader;

use crate::document::CadDocument;
use crate::error::{DxfError, Result};
use crate::notification::NotificationType;
use crate::types::DxfVersion;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// ASCII DXF reader producing a [`CadDocument`]
pub struct DxfReader {
    reader: Box<dyn DxfStreamReader>,
    version: DxfVersion,
}

impl DxfReader {
    /// Create a new DXF reader from any reader
    pub fn from_reader<R: Read + Seek + 'static>(reader: R) -> Result<Self> {
        let mut buf_reader = BufReader::new(reader);

        if Self::is_binary(&mut buf_reader)? {
            return Err(DxfError::InvalidFormat(
                "binary DXF is not supported".to_string(),
            ));
        }

        Ok(Self {
            reader: Box::new(DxfTextReader::new(buf_reader)),
            version: DxfVersion::Unknown,
        })
    }

    /// Create a new DXF reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Check if a stream contains binary DXF data
    fn is_binary<R: Read + Seek>(reader: &mut R) -> Result<bool> {
        const SENTINEL: &[u8] = b"AutoCAD Binary DXF";
        let mut buffer = vec![0u8; SENTINEL.len()];

        let bytes_read = reader.read(&mut buffer)?;
        reader.seek(SeekFrom::Start(0))?;

        Ok(bytes_read == SENTINEL.len() && buffer == SENTINEL)
    }

    /// Read a DXF file and return a CadDocument
    pub fn read(mut self) -> Result<CadDocument> {
        self.read_version()?;

        let mut document = CadDocument::with_version(self.version);
        let mut sections = 0usize;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.is("EOF") {
                break;
            }
            if !pair.is("SECTION") {
                continue;
            }

            let name_pair = self.reader.read_pair()?.ok_or_else(|| {
                DxfError::InvalidFormat("SECTION without a name".to_string())
            })?;
            if name_pair.code != 2 {
                return Err(DxfError::InvalidFormat(format!(
                    "Expected section name at line {}, found group code {}",
                    name_pair.line, name_pair.code
                )));
            }
            sections += 1;

            let mut section_reader = SectionReader::new(&mut self.reader);
            match name_pair.value_string.as_str() {
                "TABLES" => section_reader.read_tables(&mut document)?,
                "BLOCKS" => section_reader.read_blocks(&mut document)?,
                "ENTITIES" => section_reader.read_entities(&mut document)?,
                _ => section_reader.skip_section()?,
            }
        }

        if sections == 0 {
            return Err(DxfError::InvalidFormat(
                "no DXF sections found".to_string(),
            ));
        }

        document.ensure_defaults();
        Self::report_orphaned_layers(&mut document);

        Ok(document)
    }

    /// Pre-scan the HEADER section for $ACADVER and $DWGCODEPAGE.
    ///
    /// After this call the reader is reset to the beginning and `self.version`
    /// is populated.  If the version is older than AC1021 (AutoCAD 2007) and a
    /// code page is found, the stream reader's encoding is set accordingly.
    fn read_version(&mut self) -> Result<()> {
        let mut code_page: Option<String> = None;

        while let Some(pair) = self.reader.read_pair()? {
            if !pair.is("SECTION") {
                continue;
            }
            match self.reader.read_pair()? {
                Some(section) if section.code == 2 && section.value_string == "HEADER" => {}
                Some(_) => break,
                None => break,
            }

            while let Some(header_pair) = self.reader.read_pair()? {
                if header_pair.is("ENDSEC") {
                    break;
                }
                if header_pair.code != 9 {
                    continue;
                }
                match header_pair.value_string.as_str() {
                    "$ACADVER" => {
                        if let Some(vp) = self.reader.read_pair()? {
                            if vp.code == 1 {
                                self.version = DxfVersion::from_version_string(&vp.value_string);
                            }
                        }
                    }
                    "$DWGCODEPAGE" => {
                        if let Some(cp) = self.reader.read_pair()? {
                            if cp.code == 3 {
                                code_page = Some(cp.value_string);
                            }
                        }
                    }
                    _ => {}
                }
            }
            break;
        }

        if !self.version.is_unicode() {
            if let Some(enc) = code_page
                .as_deref()
                .and_then(crate::io::dxf::code_page::encoding_from_code_page)
            {
                self.reader.set_encoding(enc);
            }
        }

        self.reader.reset()
    }

    fn report_orphaned_layers(document: &mut CadDocument) {
        let missing: BTreeSet<String> = document
            .orphaned_entities()
            .map(|e| e.common().layer.clone())
            .collect();
        for layer in missing {
            document.notifications.notify(
                NotificationType::Warning,
                format!("Entities on undefined layer '{}' are not vectorized", layer),
            );
        }
    }
}

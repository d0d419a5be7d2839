//! DXF section readers

use super::stream_reader::{DxfCodePair, DxfStreamReader, PointReader};
use crate::document::CadDocument;
use crate::entities::*;
use crate::error::{DxfError, Result};
use crate::extents::{BlockReference, ExtentsGeometry, ExtentsItem};
use crate::notification::NotificationType;
use crate::tables::*;
use crate::types::*;

/// Common attributes and extents geometry of a non-vectorized entity
type ExtentsRead = (EntityCommon, Option<ExtentsGeometry>);

/// Section reader for parsing DXF sections
pub struct SectionReader<'a> {
    reader: &'a mut Box<dyn DxfStreamReader>,
}

impl<'a> SectionReader<'a> {
    /// Create a new section reader
    pub fn new(reader: &'a mut Box<dyn DxfStreamReader>) -> Self {
        Self { reader }
    }

    /// Next pair of the current entity or table entry.
    ///
    /// Returns `None` at the next `0` pair (pushed back for the caller) and
    /// steps over `102` application groups such as `{ACAD_REACTORS`, whose
    /// `330` handles are not the owner.
    fn next_entity_pair(&mut self) -> Result<Option<DxfCodePair>> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                return Ok(None);
            }
            if pair.code == 102 && pair.value_string.starts_with('{') {
                self.skip_application_group()?;
                continue;
            }
            return Ok(Some(pair));
        }
        Ok(None)
    }

    fn skip_application_group(&mut self) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 102 {
                return Ok(());
            }
            if pair.code == 0 {
                return Err(DxfError::Parse(format!(
                    "Unterminated 102 group before '{}' at line {}",
                    pair.value_string, pair.line
                )));
            }
        }
        Ok(())
    }

    /// Skip the remaining pairs of the current entity
    fn skip_entity(&mut self) -> Result<()> {
        while self.next_entity_pair()?.is_some() {}
        Ok(())
    }

    /// Skip to the end of the current section
    pub fn skip_section(&mut self) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is("ENDSEC") {
                break;
            }
        }
        Ok(())
    }

    /// Skip to ENDTAB
    fn skip_to_endtab(&mut self) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is("ENDTAB") {
                break;
            }
        }
        Ok(())
    }

    /// Apply a pair to the attributes every entity shares.
    ///
    /// Returns `false` when the code is not a common attribute.
    fn read_common_code(pair: &DxfCodePair, common: &mut EntityCommon) -> Result<bool> {
        match pair.code {
            5 => common.handle = pair.as_handle(),
            330 => common.owner = pair.as_handle(),
            8 => common.layer = pair.value_string.clone(),
            62 => {
                // A true color wins over the ACI approximation written next to it
                if !matches!(common.color, Color::Rgb { .. }) {
                    common.color = Color::from_index(pair.as_i16()?);
                }
            }
            420 => common.color = Color::from_true_color(pair.as_i64()?),
            370 => common.line_weight = LineWeight::from_value(pair.as_i16()?),
            67 => common.paper_space = pair.as_i16()? == 1,
            _ => return Ok(false),
        }
        Ok(true)
    }

    // ===== Tables =====

    /// Read the TABLES section
    pub fn read_tables(&mut self, document: &mut CadDocument) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is("ENDSEC") {
                break;
            }

            if pair.is("TABLE") {
                if let Some(name_pair) = self.reader.read_pair()? {
                    if name_pair.code != 2 {
                        self.reader.push_back(name_pair);
                        continue;
                    }
                    match name_pair.value_string.as_str() {
                        "LAYER" => self.read_layer_table(document)?,
                        "BLOCK_RECORD" => self.read_block_record_table(document)?,
                        _ => self.skip_to_endtab()?,
                    }
                }
            }
        }
        Ok(())
    }

    /// Read LAYER table
    fn read_layer_table(&mut self, document: &mut CadDocument) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is("ENDTAB") {
                break;
            }

            if pair.is("LAYER") {
                let layer = self.read_layer_entry()?;
                if !document.add_layer(layer) {
                    tracing::trace!("duplicate layer entry ignored");
                }
            }
        }
        Ok(())
    }

    /// Read a single LAYER entry
    fn read_layer_entry(&mut self) -> Result<Layer> {
        let mut layer = Layer::new("0");

        while let Some(pair) = self.next_entity_pair()? {
            match pair.code {
                5 => layer.handle = pair.as_handle(),
                2 => layer.name = pair.value_string.clone(),
                62 => {
                    let index = pair.as_i16()?;
                    layer.off = index < 0;
                    if !matches!(layer.color, Color::Rgb { .. }) {
                        layer.color = Color::from_index(index);
                    }
                }
                420 => layer.color = Color::from_true_color(pair.as_i64()?),
                70 => layer.flags = LayerFlags::from_bits_retain(pair.as_i16()?),
                370 => layer.line_weight = LineWeight::from_value(pair.as_i16()?),
                _ => {}
            }
        }

        Ok(layer)
    }

    /// Read BLOCK_RECORD table
    fn read_block_record_table(&mut self, document: &mut CadDocument) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is("ENDTAB") {
                break;
            }

            if pair.is("BLOCK_RECORD") {
                let record = self.read_block_record_entry()?;
                document.add_block_record(record);
            }
        }
        Ok(())
    }

    /// Read a single BLOCK_RECORD entry
    fn read_block_record_entry(&mut self) -> Result<BlockRecord> {
        let mut block_record = BlockRecord::new(BlockRecord::MODEL_SPACE);

        while let Some(pair) = self.next_entity_pair()? {
            match pair.code {
                5 => block_record.handle = pair.as_handle(),
                2 => block_record.name = pair.value_string.clone(),
                70 => block_record.flags = BlockFlags::from_bits_retain(pair.as_i16()?),
                _ => {}
            }
        }

        Ok(block_record)
    }

    // ===== Blocks =====

    /// Read the BLOCKS section
    ///
    /// The styling of each BLOCK entity is kept for the cascade; the content
    /// is reduced to extents geometry for expanding INSERTs.
    pub fn read_blocks(&mut self, document: &mut CadDocument) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is("ENDSEC") {
                break;
            }

            if pair.is("BLOCK") {
                self.read_block(document)?;
            }
        }
        Ok(())
    }

    /// Read a single BLOCK...ENDBLK definition
    fn read_block(&mut self, document: &mut CadDocument) -> Result<()> {
        let mut common = EntityCommon::new();
        let mut name = String::new();
        let mut base_point = PointReader::new();

        while let Some(pair) = self.next_entity_pair()? {
            match pair.code {
                2 => name = pair.value_string.clone(),
                10 | 20 | 30 => base_point.add_coordinate(&pair)?,
                _ => {
                    Self::read_common_code(&pair, &mut common)?;
                }
            }
        }

        let mut geometry = Vec::new();
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is("ENDBLK") {
                self.skip_entity()?;
                break;
            }
            if pair.is("ENDSEC") {
                self.reader.push_back(pair);
                break;
            }
            if pair.code != 0 {
                continue;
            }
            if let Some(item) = self.read_block_content(&pair.value_string)? {
                geometry.push(item);
            }
        }

        if name.is_empty() {
            return Ok(());
        }
        let base_point = base_point.get_point().map_or(Vector2::ZERO, |pt| pt.xy());
        if !document.block_records.contains(&name) {
            // R12 files have no BLOCK_RECORD table
            document.add_block_record(BlockRecord::new(name.clone()));
        }
        if let Some(record) = document.block_records.get_mut(&name) {
            record.color = common.color;
            record.line_weight = common.line_weight;
            record.base_point = base_point;
            record.geometry = geometry;
        }
        Ok(())
    }

    /// Read one entity of a block definition as extents geometry
    fn read_block_content(&mut self, kind: &str) -> Result<Option<ExtentsGeometry>> {
        let entity = match kind {
            "LINE" => EntityType::Line(self.read_line()?),
            "CIRCLE" => EntityType::Circle(self.read_circle()?),
            "ARC" => EntityType::Arc(self.read_arc()?),
            "ELLIPSE" => EntityType::Ellipse(self.read_ellipse()?),
            "LWPOLYLINE" => EntityType::LwPolyline(self.read_lwpolyline()?),
            "POLYLINE" => EntityType::Polyline(self.read_polyline()?),
            _ => return Ok(self.read_extents_entity(kind)?.1),
        };
        Ok(entity
            .as_entity()
            .extents()
            .map(|bbox| ExtentsGeometry::Points(vec![bbox.min, bbox.max])))
    }

    // ===== Entities =====

    /// Read the ENTITIES section
    pub fn read_entities(&mut self, document: &mut CadDocument) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is("ENDSEC") {
                break;
            }
            if pair.code != 0 {
                continue;
            }

            let entity = match pair.value_string.as_str() {
                "LINE" => Some(EntityType::Line(self.read_line()?)),
                "CIRCLE" => Some(EntityType::Circle(self.read_circle()?)),
                "ARC" => Some(EntityType::Arc(self.read_arc()?)),
                "ELLIPSE" => Some(EntityType::Ellipse(self.read_ellipse()?)),
                "LWPOLYLINE" => Some(EntityType::LwPolyline(self.read_lwpolyline()?)),
                "POLYLINE" => {
                    let polyline = self.read_polyline()?;
                    if polyline.is_mesh() {
                        document.notifications.notify(
                            NotificationType::NotSupported,
                            "POLYLINE mesh skipped",
                        );
                        document.add_extents_item(ExtentsItem {
                            owner: polyline.common.owner,
                            paper_space: polyline.common.paper_space,
                            geometry: ExtentsGeometry::Points(polyline.points()),
                        });
                        None
                    } else {
                        Some(EntityType::Polyline(polyline))
                    }
                }
                other => {
                    document.notifications.notify(
                        NotificationType::NotSupported,
                        format!("Entity type {} skipped", other),
                    );
                    let (common, geometry) = self.read_extents_entity(other)?;
                    if let Some(geometry) = geometry {
                        document.add_extents_item(ExtentsItem {
                            owner: common.owner,
                            paper_space: common.paper_space,
                            geometry,
                        });
                    }
                    None
                }
            };

            if let Some(entity) = entity {
                tracing::trace!(kind = %entity.kind(), handle = %entity.common().handle, "entity read");
                document.add_entity(entity);
            }
        }

        Ok(())
    }

    /// Read a LINE entity
    fn read_line(&mut self) -> Result<Line> {
        let mut line = Line::new();
        let mut start = PointReader::new();
        let mut end = PointReader::new();

        while let Some(pair) = self.next_entity_pair()? {
            if Self::read_common_code(&pair, &mut line.common)? {
                continue;
            }
            match pair.code {
                10 | 20 | 30 => start.add_coordinate(&pair)?,
                11 | 21 | 31 => end.add_coordinate(&pair)?,
                _ => {}
            }
        }

        if let Some(pt) = start.get_point() {
            line.start = pt;
        }
        if let Some(pt) = end.get_point() {
            line.end = pt;
        }

        Ok(line)
    }

    /// Read a CIRCLE entity
    fn read_circle(&mut self) -> Result<Circle> {
        let mut circle = Circle::new();
        let mut center = PointReader::new();

        while let Some(pair) = self.next_entity_pair()? {
            if Self::read_common_code(&pair, &mut circle.common)? {
                continue;
            }
            match pair.code {
                10 | 20 | 30 => center.add_coordinate(&pair)?,
                40 => circle.radius = pair.as_double()?,
                _ => {}
            }
        }

        if let Some(pt) = center.get_point() {
            circle.center = pt;
        }

        Ok(circle)
    }

    /// Read an ARC entity
    fn read_arc(&mut self) -> Result<Arc> {
        let mut arc = Arc::new();
        let mut center = PointReader::new();

        while let Some(pair) = self.next_entity_pair()? {
            if Self::read_common_code(&pair, &mut arc.common)? {
                continue;
            }
            match pair.code {
                10 | 20 | 30 => center.add_coordinate(&pair)?,
                40 => arc.radius = pair.as_double()?,
                50 => arc.start_angle = pair.as_double()?,
                51 => arc.end_angle = pair.as_double()?,
                _ => {}
            }
        }

        if let Some(pt) = center.get_point() {
            arc.center = pt;
        }

        Ok(arc)
    }

    /// Read an ELLIPSE entity
    fn read_ellipse(&mut self) -> Result<Ellipse> {
        let mut ellipse = Ellipse::new();
        let mut center = PointReader::new();
        let mut major_axis = PointReader::new();

        while let Some(pair) = self.next_entity_pair()? {
            if Self::read_common_code(&pair, &mut ellipse.common)? {
                continue;
            }
            match pair.code {
                10 | 20 | 30 => center.add_coordinate(&pair)?,
                11 | 21 | 31 => major_axis.add_coordinate(&pair)?,
                40 => ellipse.minor_axis_ratio = pair.as_double()?,
                41 => ellipse.start_parameter = pair.as_double()?,
                42 => ellipse.end_parameter = pair.as_double()?,
                _ => {}
            }
        }

        if let Some(pt) = center.get_point() {
            ellipse.center = pt;
        }
        if let Some(pt) = major_axis.get_point() {
            ellipse.major_axis = pt;
        }

        Ok(ellipse)
    }

    /// Read a POLYLINE entity with its VERTEX sequence and SEQEND
    fn read_polyline(&mut self) -> Result<Polyline> {
        let mut polyline = Polyline::new();

        while let Some(pair) = self.next_entity_pair()? {
            if Self::read_common_code(&pair, &mut polyline.common)? {
                continue;
            }
            if pair.code == 70 {
                polyline.flags = PolylineFlags::from_bits_retain(pair.as_i16()?);
            }
        }

        while let Some(pair) = self.reader.read_pair()? {
            if pair.is("VERTEX") {
                if let Some(vertex) = self.read_vertex()? {
                    polyline.vertices.push(vertex);
                }
            } else if pair.is("SEQEND") {
                self.skip_entity()?;
                break;
            } else {
                // Missing SEQEND: the polyline ends at the next entity
                self.reader.push_back(pair);
                break;
            }
        }

        Ok(polyline)
    }

    /// Read a single VERTEX entity
    fn read_vertex(&mut self) -> Result<Option<Vertex>> {
        let mut location = PointReader::new();
        let mut bulge = 0.0;

        while let Some(pair) = self.next_entity_pair()? {
            match pair.code {
                10 | 20 | 30 => location.add_coordinate(&pair)?,
                42 => bulge = pair.as_double()?,
                _ => {}
            }
        }

        Ok(location
            .get_point()
            .map(|location| Vertex { location, bulge }))
    }

    /// Read an LWPOLYLINE entity
    fn read_lwpolyline(&mut self) -> Result<LwPolyline> {
        let mut lwpolyline = LwPolyline::new();

        while let Some(pair) = self.next_entity_pair()? {
            if Self::read_common_code(&pair, &mut lwpolyline.common)? {
                continue;
            }
            match pair.code {
                70 => lwpolyline.is_closed = (pair.as_i16()? & 1) != 0,
                38 => lwpolyline.elevation = pair.as_double()?,
                // Each 10 opens a vertex; 20 and 42 refine the latest one
                10 => lwpolyline.add_point(Vector2::new(pair.as_double()?, 0.0)),
                20 => {
                    let y = pair.as_double()?;
                    if let Some(vertex) = lwpolyline.vertices.last_mut() {
                        vertex.location.y = y;
                    }
                }
                42 => {
                    let bulge = pair.as_double()?;
                    if let Some(vertex) = lwpolyline.vertices.last_mut() {
                        vertex.bulge = bulge;
                    }
                }
                _ => {}
            }
        }

        Ok(lwpolyline)
    }

    // ===== Extents only =====

    /// Read an entity that produces no primitives, keeping the geometry it
    /// adds to the drawing extents
    fn read_extents_entity(&mut self, kind: &str) -> Result<ExtentsRead> {
        match kind {
            "INSERT" => self.read_insert(),
            "DIMENSION" => self.read_dimension(),
            _ => {
                let mut common = EntityCommon::new();
                let mut points = PointCollector::for_kind(kind);
                while let Some(pair) = self.next_entity_pair()? {
                    if !Self::read_common_code(&pair, &mut common)? {
                        points.add(&pair)?;
                    }
                }
                Ok((common, points.finish(kind)))
            }
        }
    }

    /// Read an INSERT (or MINSERT grid) as a block reference
    fn read_insert(&mut self) -> Result<ExtentsRead> {
        let mut common = EntityCommon::new();
        let mut reference = BlockReference::new("");
        let mut insertion = PointReader::new();

        while let Some(pair) = self.next_entity_pair()? {
            if Self::read_common_code(&pair, &mut common)? {
                continue;
            }
            match pair.code {
                2 => reference.block = pair.value_string.clone(),
                10 | 20 | 30 => insertion.add_coordinate(&pair)?,
                41 => reference.scale.x = pair.as_double()?,
                42 => reference.scale.y = pair.as_double()?,
                50 => reference.rotation = pair.as_double()?,
                70 => reference.columns = pair.as_i16()?.max(1) as u16,
                71 => reference.rows = pair.as_i16()?.max(1) as u16,
                44 => reference.column_spacing = pair.as_double()?,
                45 => reference.row_spacing = pair.as_double()?,
                _ => {}
            }
        }

        if let Some(pt) = insertion.get_point() {
            reference.insertion = pt.xy();
        }
        let geometry = (!reference.block.is_empty()).then(|| ExtentsGeometry::Block(reference));
        Ok((common, geometry))
    }

    /// Read a DIMENSION through its anonymous block, which is drawn in world
    /// coordinates; the definition points stand in when the block is absent
    fn read_dimension(&mut self) -> Result<ExtentsRead> {
        let mut common = EntityCommon::new();
        let mut block = String::new();
        let mut points = PointCollector::for_kind("DIMENSION");

        while let Some(pair) = self.next_entity_pair()? {
            if Self::read_common_code(&pair, &mut common)? {
                continue;
            }
            if pair.code == 2 {
                block = pair.value_string.clone();
            } else {
                points.add(&pair)?;
            }
        }

        if block.is_empty() {
            Ok((common, points.finish("DIMENSION")))
        } else {
            Ok((common, Some(ExtentsGeometry::Block(BlockReference::new(block)))))
        }
    }
}

/// Gathers the XY points of the coordinate codes an entity kind carries.
///
/// Each x code (10..=14) opens a point; the matching y code (x + 10) sets
/// the y of the last point that x code opened.
struct PointCollector {
    codes: &'static [i32],
    points: Vec<Vector2>,
    open: [Option<usize>; 5],
}

impl PointCollector {
    fn for_kind(kind: &str) -> Self {
        let codes: &'static [i32] = match kind {
            "POINT" | "TEXT" | "MTEXT" | "ATTRIB" | "SHAPE" | "LEADER" => &[10],
            "SPLINE" | "HATCH" => &[10, 11],
            "SOLID" | "TRACE" | "3DFACE" => &[10, 11, 12, 13],
            "DIMENSION" => &[10, 11, 13, 14],
            _ => &[],
        };
        Self {
            codes,
            points: Vec::new(),
            open: [None; 5],
        }
    }

    fn add(&mut self, pair: &DxfCodePair) -> Result<()> {
        if self.codes.contains(&pair.code) {
            let slot = (pair.code - 10) as usize;
            self.open[slot] = Some(self.points.len());
            self.points.push(Vector2::new(pair.as_double()?, 0.0));
        } else if self.codes.contains(&(pair.code - 10)) {
            let slot = (pair.code - 20) as usize;
            if let Some(index) = self.open[slot] {
                self.points[index].y = pair.as_double()?;
            }
        }
        Ok(())
    }

    fn finish(mut self, kind: &str) -> Option<ExtentsGeometry> {
        // The first HATCH point is its elevation, not a boundary vertex
        if kind == "HATCH" && !self.points.is_empty() {
            self.points.remove(0);
        }
        (!self.points.is_empty()).then(|| ExtentsGeometry::Points(self.points))
    }
}

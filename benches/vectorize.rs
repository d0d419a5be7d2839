use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dxf_vectorize::entities::{Arc, Circle, EntityCommon, EntityType, Line, LwPolyline};
use dxf_vectorize::io::DxfReader;
use dxf_vectorize::tables::Layer;
use dxf_vectorize::types::{Color, Vector2, Vector3};
use dxf_vectorize::{CadDocument, DrawingAggregator, JsonWriter};
use std::fmt::Write;
use std::io::Cursor;

fn on_layer(mut entity: EntityType, layer: &str) -> EntityType {
    *entity.as_entity_mut().common_mut() = EntityCommon::with_layer(layer);
    entity
}

fn grid_document(n: usize) -> CadDocument {
    let mut doc = CadDocument::new();
    let layers = ["Walls", "Doors", "Windows", "Furniture"];
    for (i, name) in layers.iter().enumerate() {
        doc.add_layer(Layer::with_color(*name, Color::from_index(i as i16 + 1)));
    }
    doc.ensure_defaults();

    for i in 0..n {
        let x = (i % 100) as f64 * 10.0;
        let y = (i / 100) as f64 * 10.0;
        let layer = layers[i % layers.len()];
        let entity = match i % 4 {
            0 => EntityType::Line(Line::from_coords(x, y, x + 8.0, y + 3.0)),
            1 => EntityType::Circle(Circle::from_center_radius(Vector3::new(x, y, 0.0), 2.5)),
            2 => EntityType::Arc(Arc::from_center_radius_angles(
                Vector3::new(x, y, 0.0),
                3.0,
                15.0,
                160.0,
            )),
            _ => {
                let mut pl = LwPolyline::from_points(vec![
                    Vector2::new(x, y),
                    Vector2::new(x + 4.0, y),
                    Vector2::new(x + 4.0, y + 4.0),
                    Vector2::new(x, y + 4.0),
                ]);
                pl.is_closed = true;
                EntityType::LwPolyline(pl)
            }
        };
        doc.add_entity(on_layer(entity, layer));
    }
    doc
}

fn dxf_text(n: usize) -> String {
    let mut out = String::from("  0\nSECTION\n  2\nTABLES\n  0\nTABLE\n  2\nLAYER\n");
    out.push_str("  0\nLAYER\n  2\nWalls\n 62\n1\n370\n25\n  0\nENDTAB\n  0\nENDSEC\n");
    out.push_str("  0\nSECTION\n  2\nENTITIES\n");
    for i in 0..n {
        let x = i as f64;
        let _ = write!(
            out,
            "  0\nLINE\n  8\nWalls\n 10\n{x}\n 20\n0.0\n 30\n0.0\n 11\n{}\n 21\n5.0\n 31\n0.0\n",
            x + 1.0
        );
    }
    out.push_str("  0\nENDSEC\n  0\nEOF\n");
    out
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let aggregator = DrawingAggregator::default();
    for n in [1_000usize, 10_000] {
        let doc = grid_document(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &doc, |b, doc| {
            b.iter(|| aggregator.aggregate(black_box(doc)))
        });
    }
    group.finish();
}

fn bench_read_and_write(c: &mut Criterion) {
    let text = dxf_text(5_000).into_bytes();
    c.bench_function("read_dxf_5000_lines", |b| {
        b.iter(|| {
            DxfReader::from_reader(Cursor::new(black_box(text.clone())))
                .and_then(|reader| reader.read())
        })
    });

    let record = DrawingAggregator::default()
        .aggregate(&grid_document(10_000))
        .expect("aggregate");
    let writer = JsonWriter::new();
    c.bench_function("json_10000_entities", |b| b.iter(|| writer.to_bytes(black_box(&record))));
}

criterion_group!(benches, bench_aggregate, bench_read_and_write);
criterion_main!(benches);

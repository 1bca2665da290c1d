//! Selection Performance Benchmarks
//!
//! Type, point and text queries over a synthetic 100 page snapshot.
//!
//! Run with: `cargo bench --bench selection_performance`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use pdfdom::geometry::{BoundingRect, Position};
use pdfdom::refs::{BasicRef, ObjectRef, ObjectType, RefCore, TextRef};
use pdfdom::snapshot::{DocumentSnapshot, PageSnapshot};
use pdfdom::SelectionIndex;

/// 100 pages, each with 40 paragraphs and 10 paths
fn create_document(page_count: u32) -> DocumentSnapshot {
    let pages = (0..page_count)
        .map(|page| {
            let mut elements: Vec<ObjectRef> = Vec::new();
            for i in 0..40 {
                let y = 760.0 - f64::from(i) * 18.0;
                let rect = BoundingRect::new(72.0, y, 468.0, 14.0);
                elements.push(
                    TextRef {
                        core: RefCore::new(
                            Some(format!("p{}-{}", page, i)),
                            Some(Position::with_rect(Some(page), rect)),
                            Some(ObjectType::Paragraph),
                            Some(ObjectType::Paragraph),
                        ),
                        text: Some(format!("Section {} paragraph {} with benchmark text", page, i)),
                        ..Default::default()
                    }
                    .into(),
                );
            }
            for i in 0..10 {
                let rect = BoundingRect::new(f64::from(i) * 50.0, 20.0, 40.0, 40.0);
                elements.push(
                    BasicRef::new(
                        Some(format!("x{}-{}", page, i)),
                        Some(Position::with_rect(Some(page), rect)),
                        ObjectType::Path,
                    )
                    .into(),
                );
            }
            PageSnapshot::new(None, elements)
        })
        .collect();
    DocumentSnapshot::new(pages)
}

fn bench_selection(c: &mut Criterion) {
    let document = create_document(100);
    let index = SelectionIndex::new(&document);

    let mut group = c.benchmark_group("selection");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(50);

    group.bench_function("paragraphs_100_pages", |b| {
        b.iter(|| index.paragraphs().map(|p| p.len()))
    });

    group.bench_function("paths_at_100_pages", |b| {
        b.iter(|| index.paths_at(black_box(120.0), black_box(40.0)).len())
    });

    group.bench_function("paragraphs_starting_with", |b| {
        b.iter(|| index.paragraphs_starting_with(black_box("section 99")).map(|p| p.len()))
    });

    group.bench_function("paragraphs_matching", |b| {
        b.iter(|| index.paragraphs_matching(black_box(r"Section \d+ paragraph 3 .*")).map(|p| p.len()))
    });

    group.finish();
}

criterion_group!(benches, bench_selection);
criterion_main!(benches);

//! Benchmarks for ranking over a synthetic inventory.

use autoparts_catalog::{InventoryRecord, RecordStore};
use autoparts_search::{rank, SearchConfiguration, SearchRequest, Searcher};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const BRANDS: &[&str] = &["Toyota", "Chevrolet", "Nissan", "Kia", "Hyundai", "Mazda", "Renault"];
const PARTS: &[&str] = &[
    "sensor oxigeno",
    "manguera radiador",
    "bomba de agua",
    "filtro de aceite",
    "pastilla de freno delantera",
    "amortiguador trasero",
    "faro antiniebla",
];

fn create_store(count: usize) -> RecordStore {
    let records = (0..count)
        .map(|i| InventoryRecord {
            product_id: format!("P{:06}", i),
            vehicle_brand: BRANDS[i % BRANDS.len()].to_string(),
            short_description: format!("{} {}", PARTS[i % PARTS.len()], i % 97),
            condition: if i % 3 == 0 { "usado" } else { "nuevo" }.to_string(),
            quality: if i % 2 == 0 { "original" } else { "alternativo" }.to_string(),
            year_from: 1995 + (i % 25) as i32,
            year_to: 2000 + (i % 25) as i32,
        })
        .collect();
    RecordStore::from_records(records)
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let config = SearchConfiguration::default();

    for size in [100, 1000, 10000].iter() {
        let store = create_store(*size);

        group.bench_with_input(BenchmarkId::new("exact_brand", size), size, |b, _| {
            b.iter(|| rank(black_box(&store), black_box("toyota"), &config, 10))
        });
        group.bench_with_input(BenchmarkId::new("typo_description", size), size, |b, _| {
            b.iter(|| rank(black_box(&store), black_box("radiadr"), &config, 10))
        });
    }

    group.finish();
}

fn bench_search_with_year(c: &mut Criterion) {
    let store = create_store(10000);
    let searcher = Searcher::default();
    let request = SearchRequest::new("bomba agua").year(2010);

    c.bench_function("search_year_filtered_10k", |b| {
        b.iter(|| searcher.search(black_box(&store), black_box(&request)))
    });
}

criterion_group!(benches, bench_rank, bench_search_with_year);
criterion_main!(benches);

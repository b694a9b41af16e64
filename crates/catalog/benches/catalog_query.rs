use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{Duration, TimeZone, Utc};
use storefront_catalog::{DEFAULT_CATEGORIES, FilterSpec, PAGE_SIZE, PriceRange, Product, SortKey, apply, paginate};

fn catalog(len: usize) -> Vec<Product> {
    let base = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
    (0..len)
        .map(|i| {
            Product::new(format!("p{i}"), format!("Item {i}"), ((i * 7919) % 10_000) as f64)
                .with_category(DEFAULT_CATEGORIES[i % DEFAULT_CATEGORIES.len()])
                .with_featured(i % 9 == 0)
                .with_created_at(base + Duration::hours((i * 37 % 20_000) as i64))
        })
        .collect()
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_apply");

    for len in [100usize, 1_000, 10_000] {
        let products = catalog(len);
        group.throughput(Throughput::Elements(len as u64));

        for sort in SortKey::ALL {
            group.bench_with_input(
                BenchmarkId::new(sort.as_str(), len),
                &products,
                |b, products| {
                    let filter = FilterSpec::default();
                    b.iter(|| apply(black_box(products), &filter, sort));
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("filtered", len), &products, |b, products| {
            let mut filter = FilterSpec::new(PriceRange::new(500.0, 5_000.0).unwrap());
            filter.toggle_category("home decor", true);
            filter.toggle_category("Bags & Wallets", true);
            b.iter(|| apply(black_box(products), &filter, SortKey::PriceLow));
        });
    }

    group.finish();
}

fn bench_paginate(c: &mut Criterion) {
    let products = apply(&catalog(10_000), &FilterSpec::default(), SortKey::Newest);

    c.bench_function("paginate_middle_page", |b| {
        b.iter(|| {
            let page = paginate(black_box(&products), black_box(300), PAGE_SIZE);
            black_box(page.items.len())
        })
    });
}

criterion_group!(benches, bench_apply, bench_paginate);
criterion_main!(benches);

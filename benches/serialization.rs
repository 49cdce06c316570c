use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_wson::{from_str, parse, serialize, strip_comments, to_string, Version};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Clone)]
struct Catalog {
    version: Version,
    products: Vec<Product>,
}

fn catalog(size: u32) -> Catalog {
    Catalog {
        version: "1.0.0".parse().unwrap(),
        products: (0..size)
            .map(|i| Product {
                sku: format!("SKU{}", i),
                name: format!("Product {}", i),
                price: 9.99 + f64::from(i),
                quantity: i,
            })
            .collect(),
    }
}

fn commented_document(entries: usize) -> String {
    let mut text = String::from("{\n");
    for i in 0..entries {
        text.push_str(&format!(
            "    // entry {i}\n    item_{i} = {{ id = {i}, seen = 2024-10-09 12:00:00 }}, /* done */\n"
        ));
    }
    text.push('}');
    text
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let text = "{ id = 123, name = \"Alice\", email = \"alice@example.com\", active = true }";

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<User>(black_box(text)))
    });
}

fn benchmark_serialize_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_catalog");

    for size in [10, 100, 500].iter() {
        let catalog = catalog(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&catalog)))
        });
    }
    group.finish();
}

fn benchmark_deserialize_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_catalog");

    for size in [10, 100, 500].iter() {
        let text = to_string(&catalog(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| from_str::<Catalog>(black_box(&text)))
        });
    }
    group.finish();
}

fn benchmark_parse_commented(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_commented");

    for entries in [10, 100, 1000].iter() {
        let text = commented_document(*entries);
        group.bench_with_input(BenchmarkId::new("strip", entries), entries, |b, _| {
            b.iter(|| strip_comments(black_box(&text)))
        });
        group.bench_with_input(BenchmarkId::new("parse", entries), entries, |b, _| {
            b.iter(|| parse(black_box(&text)))
        });
    }
    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let text = commented_document(100);
    let map = parse(&text).unwrap();

    c.bench_function("parse_serialize_roundtrip", |b| {
        b.iter(|| serialize(black_box(&map)).and_then(|out| parse(&out)))
    });
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let catalog = catalog(100);
    let mut group = c.benchmark_group("wson_vs_json");

    group.bench_function("wson", |b| b.iter(|| to_string(black_box(&catalog))));
    group.bench_function("json", |b| {
        b.iter(|| serde_json::to_string(black_box(&catalog)))
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_serialize_catalog,
    benchmark_deserialize_catalog,
    benchmark_parse_commented,
    benchmark_roundtrip,
    benchmark_comparison_with_json
);

criterion_main!(benches);

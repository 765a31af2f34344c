use criterion::{Criterion, black_box, criterion_group, criterion_main};

use juso_scrape::{runner, specs};

const RESULT: &str = include_str!("../tests/fixtures/result.html");

fn bench_extract(c: &mut Criterion) {
    c.bench_function("juso_extract", |b| {
        b.iter(|| {
            let raw = specs::juso::extract(black_box(RESULT)).expect("fixture parses");
            black_box(raw.zipcode.len())
        })
    });

    c.bench_function("juso_lookup", |b| {
        b.iter(|| {
            let rec = runner::lookup(black_box("세종대로 209"), black_box(RESULT)).expect("fixture parses");
            black_box(rec.latitude)
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);

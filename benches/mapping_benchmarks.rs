//! Page mapping benchmarks: narrow and wide pages at Timestream's page sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use timestream_bridge::{map_page, ColumnInfo, Datum, QueryPage, Row};

fn make_page(rows: usize) -> QueryPage {
    let columns = vec![
        ColumnInfo::scalar("host::VARCHAR", "VARCHAR"),
        ColumnInfo::scalar("region::VARCHAR", "VARCHAR"),
        ColumnInfo::scalar("measure_name::VARCHAR", "VARCHAR"),
        ColumnInfo::scalar("time::TIMESTAMP", "TIMESTAMP"),
        ColumnInfo::scalar("cpu::DOUBLE", "DOUBLE"),
        ColumnInfo::scalar("requests::BIGINT", "BIGINT"),
    ];
    let rows = (0..rows)
        .map(|i| {
            Row::new(vec![
                Datum::scalar(format!("web-{}", i % 50)),
                Datum::scalar("eu-west-1"),
                Datum::scalar("metrics"),
                Datum::scalar(format!("2024-01-02 03:{:02}:{:02}.123000000", (i / 60) % 60, i % 60)),
                if i % 7 == 0 { Datum::null() } else { Datum::scalar(format!("{}.5", i % 100)) },
                Datum::scalar(i.to_string()),
            ])
        })
        .collect();
    QueryPage::new(columns, rows)
}

fn bench_map_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_page");
    for &size in &[100usize, 1_000, 10_000] {
        let page = make_page(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &page, |b, page| {
            b.iter(|| {
                let records: Vec<_> = map_page(black_box(page))
                    .collect::<Result<_, _>>()
                    .expect("mapping");
                records
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_map_page);
criterion_main!(benches);

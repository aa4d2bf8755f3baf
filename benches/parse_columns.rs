use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use csv_columndet::{Parser, detect::{self, DetectOptions}, io_utils};

fn generate_column(rows: usize, render: impl Fn(usize) -> String) -> Vec<String> {
    (0..rows).map(render).collect()
}

fn generate_orders(rows: usize) -> String {
    let mut csv = String::from("id,ordered_on,amount,status\n");
    for i in 0..rows {
        let status = match i % 3 {
            0 => "shipped",
            1 => "pending",
            _ => "processing",
        };
        let day = (i % 28) + 1;
        let cents = i % 100;
        csv.push_str(&format!("{i},2024-01-{day:02},\"{},{:03}.{cents:02}\",{status}\n", i % 97 + 1, i % 1000));
    }
    csv
}

fn bench_columns(c: &mut Criterion) {
    let parser = Parser::default();
    let samples = [
        ("integers", generate_column(1000, |i| (i * 37).to_string())),
        ("dates", generate_column(1000, |i| format!("2024-{:02}-{:02}", i % 12 + 1, i % 28 + 1))),
        ("floats", generate_column(1000, |i| format!("{},{:03}.{:02}", i % 97 + 1, i % 1000, i % 100))),
        ("currency", generate_column(1000, |i| format!("${}.{:02}", i % 5000, i % 100))),
        ("text", generate_column(1000, |i| format!("customer {i} note"))),
    ];

    let mut group = c.benchmark_group("parse_column");
    for (name, values) in &samples {
        group.bench_function(*name, |b| b.iter(|| black_box(parser.parse(black_box(values)))));
    }
    group.finish();
}

fn bench_detect(c: &mut Criterion) {
    let parser = Parser::default();
    let data = generate_orders(5_000);
    let options = DetectOptions {
        sample_rows: 0,
        ..DetectOptions::default()
    };
    c.bench_function("detect_orders_full_scan", |b| {
        b.iter_batched(
            || io_utils::open_csv_reader(data.as_bytes(), options.delimiter, options.has_headers),
            |reader| detect::detect_from_reader(reader, &options, &parser).expect("detect"),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_columns, bench_detect);
criterion_main!(benches);

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use medjudge::compare::compare_streams;
use medjudge::extract::extract_trailing_value;
use medjudge::median::upper_median;
use medjudge::records::median_of_input;
use rand::Rng;
use std::hint::black_box;

const NAMES: [&str; 6] = ["Alice", "Bob", "Carol Jones", "Dan", "Eve Ng", "Frank"];

fn gen_input(records: usize) -> String {
    let mut rng = rand::rng();
    let mut out = format!("{records}\n");
    for i in 0..records {
        let salary: u64 = rng.random_range(20_000..250_000);
        out.push_str(NAMES[i % NAMES.len()]);
        out.push(' ');
        out.push_str(&salary.to_string());
        out.push('\n');
    }
    out
}

fn bench_extract(c: &mut Criterion) {
    let lines = ["Alice 52000", "Carol Jones   61000  ", "NoDigits", "id18446744073709551615"];
    c.bench_function("extract_trailing_value", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(extract_trailing_value(black_box(line)));
            }
        })
    });
}

fn bench_median(c: &mut Criterion) {
    let mut group = c.benchmark_group("median");
    for records in [1_000usize, 100_000, 1_000_000] {
        let input = gen_input(records);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("median_of_input", records), &input, |b, input| {
            b.iter(|| median_of_input(black_box(input.as_bytes())).unwrap())
        });

        let values: Vec<u64> = input.lines().skip(1).map(extract_trailing_value).collect();
        group.throughput(Throughput::Elements(records as u64));
        group.bench_with_input(BenchmarkId::new("upper_median", records), &values, |b, values| {
            b.iter(|| upper_median(&mut values.clone()).unwrap())
        });
    }
    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    for size in [4 * 1024usize, 1024 * 1024] {
        let data = gen_input(size / 16).into_bytes();
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("identical", size), &data, |b, data| {
            b.iter(|| compare_streams(black_box(&data[..]), black_box(&data[..])).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extract, bench_median, bench_compare);
criterion_main!(benches);

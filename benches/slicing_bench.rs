use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use jagged_table::prelude::*;

/// `rows` rows of between `width / 2` and `width` integers.
fn jagged_table(rows: usize, width: usize, seed: u64) -> Table {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<Vec<i64>> = (0..rows)
        .map(|_| {
            let len = rng.gen_range(width / 2..=width);
            (0..len).map(|_| rng.gen_range(-100..100)).collect()
        })
        .collect();
    Table::new(data).expect("integer rows fit the standard constraint")
}

fn bench_sequence_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_slice");
    for &len in &[1_000usize, 100_000] {
        let seq = Sequence::new(0..len as i64).expect("valid sequence");
        group.bench_with_input(BenchmarkId::new("stepped_3", len), &len, |b, _| {
            b.iter(|| black_box(seq.slice(SliceRange::stepped(3)).expect("slice")));
        });
        group.bench_with_input(BenchmarkId::new("reversed", len), &len, |b, _| {
            b.iter(|| black_box(seq.slice(SliceRange::stepped(-1)).expect("slice")));
        });
    }
    group.finish();
}

fn bench_rect(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_rect");
    for &rows in &[100usize, 1_000] {
        let table = jagged_table(rows, 64, 42);
        let widest = table.max_row_length().unwrap_or(0);
        group.bench_with_input(BenchmarkId::new("read_padded", rows), &rows, |b, _| {
            b.iter(|| black_box(table.rect(.., 0..widest).expect("rect")));
        });
        group.bench_with_input(BenchmarkId::new("row_lengths_fresh", rows), &rows, |b, _| {
            b.iter(|| {
                let mut t = table.clone();
                t.invalidate_cache();
                black_box(t.max_row_length())
            });
        });
        let block: Vec<Vec<i64>> = (0..rows).map(|r| vec![r as i64; 8]).collect();
        group.bench_with_input(BenchmarkId::new("write_columns", rows), &rows, |b, _| {
            b.iter(|| {
                let mut t = table.clone();
                t.set_rect(.., 0..8, block.clone()).expect("set_rect");
                black_box(t)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sequence_slice, bench_rect);
criterion_main!(benches);

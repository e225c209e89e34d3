use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use repocount::report::{ReportRow, sort_rows};

fn sample_rows(n: usize) -> Vec<ReportRow> {
    (0..n)
        .map(|i| ReportRow {
            // Mixed case and a reversed index so the input is far from sorted.
            name: if i % 2 == 0 {
                format!("Repo-{:05}", n - i)
            } else {
                format!("repo-{:05}", n - i)
            },
            commits: i % 100,
        })
        .collect()
}

fn bench_sort(c: &mut Criterion) {
    let rows = sample_rows(100);
    c.bench_function("sort_rows_page", |b| {
        b.iter(|| {
            let mut rows = rows.clone();
            sort_rows(black_box(&mut rows));
            black_box(rows);
        });
    });

    let rows = sample_rows(10_000);
    c.bench_function("sort_rows_10k", |b| {
        b.iter(|| {
            let mut rows = rows.clone();
            sort_rows(black_box(&mut rows));
            black_box(rows);
        });
    });
}

criterion_group!(benches, bench_sort);
criterion_main!(benches);

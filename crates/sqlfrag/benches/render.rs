use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlfrag::{
    Fields, GenericDialect, NamedParams, PositionalParams, Sql, SqliteDialect, and, expr, is_in,
    render, sql, t, where_clause,
};

/// `SELECT * FROM t WHERE (col0 = ? AND col1 = ? ...)` with `n` predicates.
fn build_filter(n: usize) -> Sql {
    let preds: Vec<Sql> = (0..n).map(|i| expr(format!("col{i}")).eq(i as i64)).collect();
    let filter = where_clause([and(preds)], Fields::new());
    sql(t!("SELECT * FROM t ", {filter}))
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/positional");

    for n in [1, 5, 10, 50, 100] {
        let q = build_filter(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &q, |b, q| {
            b.iter(|| black_box(render(q, PositionalParams::dollar(), &GenericDialect)));
        });
    }

    group.finish();
}

fn bench_render_named(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/named");

    for n in [1, 10, 100] {
        let q = build_filter(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &q, |b, q| {
            b.iter(|| black_box(render(q, NamedParams::named(), &GenericDialect)));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/build_and_render");

    for n in [1, 10, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let q = build_filter(n);
                black_box(q.split())
            });
        });
    }

    group.finish();
}

fn bench_sqlite_in(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/sqlite_in");
    let dialect = SqliteDialect::new();

    for n in [5, 10, 100, 1000] {
        let values: Vec<i64> = (0..n).collect();
        let q = is_in("id", values);
        group.bench_with_input(BenchmarkId::from_parameter(n), &q, |b, q| {
            b.iter(|| black_box(render(q, PositionalParams::qmark(), &dialect)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render,
    bench_render_named,
    bench_build_and_render,
    bench_sqlite_in
);
criterion_main!(benches);

//! Symbol registry benchmarks
//!
//! Run with: `cargo bench --bench symbol_bench`

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rubric_sym::classify::classify;
use rubric_sym::escape::{display, needs_escaping};
use rubric_sym::{Scope, SymbolRegistry};

fn bench_intern(c: &mut Criterion) {
    let mut group = c.benchmark_group("intern");
    group.throughput(Throughput::Elements(1));

    let registry = SymbolRegistry::new();

    group.bench_function("miss", |b| {
        let mut counter = 0u64;
        b.iter(|| {
            counter += 1;
            registry.intern(&format!("fresh_name_{}", counter))
        })
    });

    group.bench_function("hit", |b| {
        registry.intern("existing_name");
        b.iter(|| black_box(registry.intern(black_box("existing_name"))))
    });

    group.bench_function("operator", |b| {
        b.iter(|| black_box(registry.intern(black_box("<=>"))))
    });

    group.bench_function("setter_miss", |b| {
        let mut counter = 0u64;
        b.iter(|| {
            counter += 1;
            registry.intern(&format!("attr_{}=", counter))
        })
    });

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    group.throughput(Throughput::Elements(1));

    let registry = SymbolRegistry::new();
    let id = registry.intern("resolved_name");

    group.bench_function("direct", |b| {
        b.iter(|| black_box(registry.resolve(black_box(id))))
    });

    group.bench_function("derived_setter", |b| {
        let mut counter = 0u64;
        b.iter(|| {
            counter += 1;
            let base = registry.intern(&format!("reader_{}", counter));
            let setter = base.with_scope(Scope::AttributeSetter);
            black_box(setter.map(|setter| registry.resolve(setter)))
        })
    });

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    group.throughput(Throughput::Elements(1));

    for name in ["foo", "Foo", "@foo", "@@foo", "$foo", "foo=", "[]=", "foo bar"] {
        group.bench_with_input(BenchmarkId::from_parameter(name), name, |b, name| {
            b.iter(|| black_box(classify(black_box(name))))
        });
    }

    group.finish();
}

fn bench_display(c: &mut Criterion) {
    let mut group = c.benchmark_group("display");
    group.throughput(Throughput::Elements(1));

    for name in ["foo?", "<=>", "$-w", "foo bar", "tab\there"] {
        group.bench_with_input(BenchmarkId::new("needs_escaping", name), name, |b, name| {
            b.iter(|| black_box(needs_escaping(black_box(name))))
        });
        group.bench_with_input(BenchmarkId::new("display", name), name, |b, name| {
            b.iter(|| black_box(display(black_box(name))))
        });
    }

    group.finish();
}

fn bench_varying_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("varying_sizes");
    let registry = SymbolRegistry::new();

    for &size in &[1, 10, 100, 1000, 10000] {
        let string = "a".repeat(size);
        registry.intern(&string);
        group.bench_with_input(BenchmarkId::new("intern_hit", size), &string, |b, s| {
            b.iter(|| black_box(registry.intern(s)))
        });
    }

    group.finish();
}

fn bench_concurrent(c: &mut Criterion) {
    use std::thread;

    let mut group = c.benchmark_group("concurrent");

    for &num_threads in &[1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("shared_names", num_threads),
            &num_threads,
            |b, &n| {
                b.iter(|| {
                    let registry = Arc::new(SymbolRegistry::new());
                    let handles: Vec<_> = (0..n)
                        .map(|_| {
                            let registry = Arc::clone(&registry);
                            thread::spawn(move || {
                                for j in 0..100 {
                                    registry.intern(&format!("shared_{}", j));
                                }
                            })
                        })
                        .collect();

                    for h in handles {
                        h.join().unwrap();
                    }
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_intern,
    bench_resolve,
    bench_classify,
    bench_display,
    bench_varying_sizes,
    bench_concurrent,
);

criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use growvec::GrowVec;

fn bench_sequential_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_push");

    for size in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("amortized_growth", size), size, |b, &size| {
            b.iter(|| {
                let mut vec = GrowVec::new();
                for i in 0..size {
                    black_box(vec.push(i).unwrap());
                }
                black_box(vec.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("reserved_upfront", size), size, |b, &size| {
            b.iter(|| {
                let mut vec = GrowVec::new();
                vec.reserve(size).unwrap();
                for i in 0..size {
                    black_box(vec.push(i).unwrap());
                }
                black_box(vec.len())
            });
        });
    }
    group.finish();
}

fn bench_random_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_access");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("get_operations", size), size, |b, &size| {
            let mut vec = GrowVec::new();
            for i in 0..size {
                vec.push(i).unwrap();
            }

            b.iter(|| {
                for i in 0..size {
                    black_box(vec.get(i));
                }
            });
        });
    }
    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterator");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("full_iteration", size), size, |b, &size| {
            let mut vec = GrowVec::new();
            for i in 0..size {
                vec.push(i).unwrap();
            }

            b.iter(|| {
                for value in black_box(&vec) {
                    black_box(value);
                }
            });
        });
    }
    group.finish();
}

fn bench_front_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("front_insert");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("insert_at_zero", size), size, |b, &size| {
            b.iter(|| {
                let mut vec = GrowVec::new();
                for i in 0..size {
                    black_box(vec.insert(0, i).unwrap());
                }
                black_box(vec.len())
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_push,
    bench_random_access,
    bench_iteration,
    bench_front_insert
);
criterion_main!(benches);

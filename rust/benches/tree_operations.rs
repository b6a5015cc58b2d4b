use bplus_index::{BPlusTreeMap, NameHasher};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const TREE_SIZE: u64 = 10_000;

fn shuffled_keys(n: u64) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..n).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(42));
    keys
}

fn build_tree(order: usize, keys: &[u64]) -> BPlusTreeMap<u64, u64> {
    let mut tree = BPlusTreeMap::new(order).unwrap();
    for &k in keys {
        tree.insert(k, k * 10);
    }
    tree
}

fn insert_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    let keys = shuffled_keys(TREE_SIZE);

    for order in [4, 16, 64] {
        group.bench_with_input(BenchmarkId::new("random", order), &order, |b, &order| {
            b.iter(|| black_box(build_tree(order, &keys)))
        });
    }

    group.finish();
}

fn search_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let keys = shuffled_keys(TREE_SIZE);

    for order in [4, 16, 64] {
        let tree = build_tree(order, &keys);
        group.bench_with_input(BenchmarkId::new("point", order), &order, |b, _| {
            b.iter(|| {
                for k in keys.iter().step_by(7) {
                    black_box(tree.search(black_box(k)));
                }
            })
        });
    }

    group.finish();
}

fn range_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_queries");
    let tree = build_tree(16, &shuffled_keys(TREE_SIZE));

    // search_greater starts at the pivot's leaf, search_less always walks from the left
    for pivot in [100, TREE_SIZE / 2, TREE_SIZE - 100] {
        group.bench_with_input(BenchmarkId::new("greater", pivot), &pivot, |b, pivot| {
            b.iter(|| black_box(tree.search_greater(black_box(pivot))))
        });
        group.bench_with_input(BenchmarkId::new("less", pivot), &pivot, |b, pivot| {
            b.iter(|| black_box(tree.search_less(black_box(pivot))))
        });
    }

    group.finish();
}

fn delete_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");
    let keys = shuffled_keys(TREE_SIZE);

    for order in [4, 16, 64] {
        group.bench_with_input(BenchmarkId::new("drain", order), &order, |b, &order| {
            b.iter_batched(
                || build_tree(order, &keys),
                |mut tree| {
                    for k in keys.iter().rev() {
                        tree.delete(k);
                    }
                    tree
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn name_index_benchmark(c: &mut Criterion) {
    let hasher = NameHasher::new();
    let names = ["Зайченко", "Заєць", "Курча", "Андрій", "Іван", "Ігор", "Оксана"];

    c.bench_function("hash_names", |b| {
        b.iter(|| {
            for name in names {
                black_box(hasher.hash_name(black_box(name)));
            }
        })
    });
}

criterion_group!(
    benches,
    insert_benchmark,
    search_benchmark,
    range_benchmark,
    delete_benchmark,
    name_index_benchmark
);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use segment_tree::{InsertRebuild, SegmentTree, SegmentTreeConfigBuilder};

const RNG_SEED: [u8; 16] = *b"0123456789abcdef";

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

type Add = fn(&u64, &u64) -> u64;

fn add(a: &u64, b: &u64) -> u64 {
    a.wrapping_add(*b)
}

/// generate n random values
fn get_random_values(n: usize) -> Vec<u64> {
    let mut rng = XorShiftRng::from_seed(RNG_SEED);
    (0..n).map(|_| rng.gen_range(0..1_000_000)).collect()
}

fn push_back_n(n: usize) -> u64 {
    let mut tree = SegmentTree::new(Vec::new(), add as Add, 0);
    get_random_values(n)
        .into_iter()
        .for_each(|value| tree.push_back(value));
    *tree.fold_all()
}

fn update_query_n(tree: &mut SegmentTree<u64, Add>, n: usize) -> u64 {
    let mut rng = XorShiftRng::from_seed(RNG_SEED);
    let len = tree.len();
    (0..n).fold(0, |acc, _| {
        tree.update(rng.gen_range(0..len), rng.gen_range(0..1_000_000));
        let l = rng.gen_range(0..len);
        let r = rng.gen_range(l + 1..=len);
        acc.wrapping_add(tree.query(l..r))
    })
}

fn insert_n(tree: &mut SegmentTree<u64, Add>, n: usize) -> usize {
    let mut rng = XorShiftRng::from_seed(RNG_SEED);
    for _ in 0..n {
        let position = rng.gen_range(0..=tree.len());
        tree.insert(position, rng.gen_range(0..1_000_000));
    }
    tree.tree_len()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment_tree_push_back");
    for &size in SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| push_back_n(black_box(size)))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("segment_tree_update_query");
    for &size in SIZES.iter() {
        let mut tree = SegmentTree::new(get_random_values(size), add as Add, 0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| update_query_n(&mut tree, black_box(1_000)))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("segment_tree_insert");
    group.sample_size(10);
    for &size in SIZES.iter() {
        for &insert_rebuild in [InsertRebuild::Full, InsertRebuild::Affected].iter() {
            let config = SegmentTreeConfigBuilder::default()
                .insert_rebuild(insert_rebuild)
                .build()
                .unwrap_or_else(|_| panic!("All config fields have defaults."));
            let tree = SegmentTree::with_config(get_random_values(size), add as Add, 0, config);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", insert_rebuild), size),
                &size,
                |b, _| b.iter(|| insert_n(&mut tree.clone(), black_box(100))),
            );
        }
    }
    group.finish()
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

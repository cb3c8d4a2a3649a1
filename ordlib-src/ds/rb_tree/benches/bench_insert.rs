use std::collections::BTreeSet;

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion,
};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rb_tree::RbTree;

fn rand_seq<T, I, R>(iter: I, rng: &mut R) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    R: Rng + ?Sized,
{
    let mut res: Vec<_> = iter.into_iter().collect();
    res.shuffle(rng);
    res
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    let mut rng = ChaCha20Rng::from_seed([
        0xC2, 0x4D, 0x18, 0xE7, 0x90, 0x3A, 0x6F, 0xB5, 0x0C, 0xD1, 0x7E, 0x42,
        0x99, 0x25, 0xAB, 0x60, 0x1F, 0xE3, 0x57, 0x08, 0xCE, 0x74, 0x3B, 0x86,
        0xF9, 0x12, 0x6D, 0xA0, 0x45, 0xBC, 0x2E, 0xD7,
    ]);

    for len in [1_000, 100_000] {
        let shuffled = rand_seq(0..len, &mut rng);

        group.bench_with_input(
            BenchmarkId::new("rb_tree-shuffled", len),
            &shuffled,
            |b, keys| {
                b.iter(|| {
                    let mut tree = RbTree::<u32>::new();
                    for &k in keys {
                        tree.insert_unique(k);
                    }
                    black_box(tree.len())
                })
            },
        );
        group.bench_with_input(
            BenchmarkId::new("btree_set-shuffled", len),
            &shuffled,
            |b, keys| {
                b.iter(|| {
                    let mut set = BTreeSet::new();
                    for &k in keys {
                        set.insert(k);
                    }
                    black_box(set.len())
                })
            },
        );
        group.bench_with_input(
            BenchmarkId::new("rb_tree-sorted-hint", len),
            &len,
            |b, &len| {
                b.iter(|| {
                    let mut tree = RbTree::<u32>::new();
                    tree.extend_unique(0..len);
                    black_box(tree.len())
                })
            },
        );
    }
    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");

    let mut rng = ChaCha20Rng::from_seed([
        0x61, 0xA8, 0x3E, 0x05, 0xDB, 0x97, 0x2C, 0xF4, 0x48, 0x1B, 0xE0, 0x7D,
        0x33, 0xC9, 0x56, 0x8A, 0xB1, 0x0F, 0x64, 0xEA, 0x29, 0x9D, 0x72, 0x13,
        0xFC, 0x4B, 0x87, 0x30, 0xD5, 0x6E, 0xA9, 0x1C,
    ]);

    let len = 100_000_u32;
    let keys = rand_seq(0..len, &mut rng);
    let queries: Vec<_> = (0..len).map(|_| rng.gen_range(0..2 * len)).collect();

    let mut tree = RbTree::<u32>::new();
    tree.extend_unique(keys.iter().copied());
    let set: BTreeSet<_> = keys.iter().copied().collect();

    group
        .bench_function("rb_tree", |b| {
            b.iter(|| queries.iter().filter(|&q| tree.contains_key(q)).count())
        })
        .bench_function("btree_set", |b| {
            b.iter(|| queries.iter().filter(|&q| set.contains(q)).count())
        });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_find);
criterion_main!(benches);

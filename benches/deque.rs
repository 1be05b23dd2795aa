use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use segmented_deque::SegmentedDeque;
use std::collections::VecDeque;

const N: usize = 10_000;

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("VecDeque vs SegmentedDeque (PushFront 10k)");
    group.bench_function("std::collections::VecDeque", |b| {
        b.iter(|| {
            let mut d = VecDeque::new();
            for i in 0..N {
                d.push_front(black_box(i));
            }
            d
        })
    });
    group.bench_function("SegmentedDeque<usize>", |b| {
        b.iter(|| {
            let mut d = SegmentedDeque::new();
            for i in 0..N {
                d.push_front(black_box(i));
            }
            d
        })
    });
    group.finish();

    let mut group = c.benchmark_group("VecDeque vs SegmentedDeque (PushBack 10k)");
    group.bench_function("std::collections::VecDeque", |b| {
        b.iter(|| {
            let mut d = VecDeque::new();
            for i in 0..N {
                d.push_back(black_box(i));
            }
            d
        })
    });
    group.bench_function("SegmentedDeque<usize>", |b| {
        b.iter(|| {
            let mut d = SegmentedDeque::new();
            for i in 0..N {
                d.push_back(black_box(i));
            }
            d
        })
    });
    group.finish();
}

fn bench_index(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let indices: Vec<usize> = (0..N).map(|_| rng.gen_range(0..N)).collect();
    let d_std: VecDeque<usize> = (0..N).collect();
    let d_seg: SegmentedDeque<usize> = (0..N).collect();

    let mut group = c.benchmark_group("VecDeque vs SegmentedDeque (Random Index 10k)");
    group.bench_function("std::collections::VecDeque", |b| {
        b.iter(|| {
            for &i in &indices {
                black_box(d_std[black_box(i)]);
            }
        })
    });
    group.bench_function("SegmentedDeque<usize>", |b| {
        b.iter(|| {
            for &i in &indices {
                black_box(d_seg[black_box(i)]);
            }
        })
    });
    group.finish();
}

fn bench_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("VecDeque vs SegmentedDeque (Queue Traffic 10k)");
    group.bench_function("std::collections::VecDeque", |b| {
        let mut d: VecDeque<usize> = (0..64).collect();
        b.iter(|| {
            for i in 0..N {
                d.push_back(black_box(i));
                black_box(d.pop_front());
            }
        })
    });
    group.bench_function("SegmentedDeque<usize>", |b| {
        let mut d: SegmentedDeque<usize> = (0..64).collect();
        b.iter(|| {
            for i in 0..N {
                d.push_back(black_box(i));
                let _ = black_box(d.pop_front());
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_push, bench_index, bench_queue);
criterion_main!(benches);

// Performance benchmarks for graph construction and trust classification
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use paymo::{classify_tiers, distance, ClassifyOptions, Classifier, Diagnostics, PolicyTier, RelationshipGraph};
use rand::prelude::*;
use rand::rngs::StdRng;

const PARTIES: i64 = 20_000;

fn generate_lines(rng: &mut StdRng, count: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(count + 1);
    lines.push("time, id1, id2, amount, message".to_string());
    for _ in 0..count {
        let from = rng.random_range(0..PARTIES);
        let to = rng.random_range(0..PARTIES);
        lines.push(format!("2016-11-02 09:49:29, {from}, {to}, 12.50, payment"));
    }
    lines
}

fn build_graph(lines: &[String]) -> RelationshipGraph {
    let mut diagnostics = Diagnostics::new();
    RelationshipGraph::from_lines(lines, true, &mut diagnostics)
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let mut rng = StdRng::seed_from_u64(7);

    for size in [1_000, 10_000, 100_000].iter() {
        let lines = generate_lines(&mut rng, *size);
        group.bench_with_input(BenchmarkId::new("from_lines", size), &lines, |b, lines| {
            b.iter(|| black_box(build_graph(lines)));
        });
    }

    group.finish();
}

fn benchmark_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance");
    let mut rng = StdRng::seed_from_u64(11);
    let graph = build_graph(&generate_lines(&mut rng, 100_000));
    let pairs: Vec<(i64, i64)> = (0..256)
        .map(|_| (rng.random_range(0..PARTIES), rng.random_range(0..PARTIES)))
        .collect();

    for tier in PolicyTier::ALL {
        group.bench_function(BenchmarkId::new("depth", tier.depth()), |b| {
            b.iter(|| {
                for &(source, target) in &pairs {
                    black_box(distance(&graph, source, target, tier.depth()));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let mut rng = StdRng::seed_from_u64(13);
    let graph = build_graph(&generate_lines(&mut rng, 100_000));
    let stream = generate_lines(&mut rng, 10_000);

    group.bench_function("feature3_sequential", |b| {
        let classifier = Classifier::new(&graph, PolicyTier::Feature3);
        b.iter(|| {
            let mut diagnostics = Diagnostics::new();
            black_box(classifier.classify(&stream, true, &mut diagnostics));
        });
    });

    group.bench_function("feature3_parallel", |b| {
        let classifier = Classifier::new(&graph, PolicyTier::Feature3);
        b.iter(|| {
            let mut diagnostics = Diagnostics::new();
            black_box(classifier.classify_par(&stream, true, &mut diagnostics));
        });
    });

    group.bench_function("all_tiers_parallel", |b| {
        b.iter(|| black_box(classify_tiers(&graph, &stream, &PolicyTier::ALL, ClassifyOptions::default())));
    });

    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_distance, benchmark_classify);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, Criterion};
use maze_forge::{
    generators,
    units::{Height, Width},
};

fn bench_recursive_backtracker_maze_15(c: &mut Criterion) {
    c.bench_function("recursive_backtracker_maze_15", |b| {
        b.iter(|| generators::generate_seeded(Width(15), Height(15), 1).unwrap())
    });
}

fn bench_recursive_backtracker_maze_55(c: &mut Criterion) {
    c.bench_function("recursive_backtracker_maze_55", |b| {
        b.iter(|| generators::generate_seeded(Width(55), Height(55), 1).unwrap())
    });
}

fn bench_recursive_backtracker_maze_255(c: &mut Criterion) {
    c.bench_function("recursive_backtracker_maze_255", |b| {
        b.iter(|| generators::generate_seeded(Width(255), Height(255), 1).unwrap())
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_15,
    bench_recursive_backtracker_maze_55,
    bench_recursive_backtracker_maze_255
);
criterion_main!(benches);

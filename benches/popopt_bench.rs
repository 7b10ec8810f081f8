//! Criterion benchmarks for u-popopt.
//!
//! Measures the ask/tell overhead of each optimiser on cheap benchmark
//! functions, plus the population and Pareto-sort hot paths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_popopt::evolutionary::{
    CrossoverArithmeticMultiParent, EvolutionaryAlgorithm, EvolutionaryConfig,
    MutationAddRandomNumber,
};
use u_popopt::fitness::multi_objective::non_dominated_sort;
use u_popopt::nelder_mead::{NelderMead, NelderMeadConfig};
use u_popopt::problems::{Rosenbrock, Schwefel};
use u_popopt::runner::{OptimiserRunner, RunnerConfig};
use u_popopt::variables::{DecisionSpace, DecisionVector};

// ===========================================================================
// Nelder–Mead on Rosenbrock
// ===========================================================================

fn bench_nelder_mead_rosenbrock(c: &mut Criterion) {
    let mut group = c.benchmark_group("nelder_mead_rosenbrock");
    group.sample_size(10);

    for dim in [2usize, 5, 10] {
        let problem = Rosenbrock::new(dim).unwrap();
        let config = RunnerConfig::default()
            .with_max_evaluations(2_000)
            .with_parallel(false);
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |b, &dim| {
            b.iter(|| {
                let space = DecisionSpace::uniform_continuous(dim, -5.0, 5.0).unwrap();
                let start = DecisionVector::from_continuous(&space, &vec![-1.0; dim]).unwrap();
                let mut nm = NelderMead::new(start, &NelderMeadConfig::default().with_seed(42))
                    .unwrap();
                let result = OptimiserRunner::run(&mut nm, black_box(&problem), &config);
                black_box(result)
            })
        });
    }
    group.finish();
}

// ===========================================================================
// Evolutionary on Schwefel
// ===========================================================================

fn bench_evolutionary_schwefel(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolutionary_schwefel");
    group.sample_size(10);

    for (dim, pop) in [(5usize, 20usize), (10, 50), (30, 100)] {
        let problem = Schwefel::new(dim).unwrap();
        let config = RunnerConfig::default()
            .with_max_evaluations(5_000)
            .with_batch_size(10)
            .with_parallel(false);
        group.bench_with_input(
            BenchmarkId::new(format!("d{}_p{}", dim, pop), dim),
            &(dim, pop),
            |b, &(dim, pop)| {
                b.iter(|| {
                    let space = DecisionSpace::uniform_continuous_with_initial_range(
                        dim, -500.0, 500.0, -250.0, 475.0,
                    )
                    .unwrap();
                    let ea_config = EvolutionaryConfig::default()
                        .with_population_size(pop)
                        .with_seed(42);
                    let mutation = MutationAddRandomNumber::new(10.0, 1.0, 2).unwrap();
                    let mut ea = EvolutionaryAlgorithm::new(space, &ea_config, mutation)
                        .unwrap()
                        .with_recombination(CrossoverArithmeticMultiParent::default());
                    let result = OptimiserRunner::run(&mut ea, black_box(&problem), &config);
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

// ===========================================================================
// Non-dominated sorting
// ===========================================================================

fn bench_non_dominated_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("non_dominated_sort");
    group.sample_size(10);

    for n in [50usize, 200, 500] {
        let mut rng = StdRng::seed_from_u64(42);
        let objectives: Vec<Vec<f64>> = (0..n)
            .map(|_| vec![rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)])
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &objectives, |b, objs| {
            b.iter(|| black_box(non_dominated_sort(black_box(objs))))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_nelder_mead_rosenbrock,
    bench_evolutionary_schwefel,
    bench_non_dominated_sort
);
criterion_main!(benches);

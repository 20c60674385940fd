use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gasearch::{
    evolution::{EvolutionLauncher, EvolutionOptions, LogLevel},
    individual::Individual,
    search::MultiRunSearch,
    space::{ParamValue, ParameterSpace, ParameterSpec},
};

fn rastrigin(individual: &Individual) -> f64 {
    let value: f64 = ["x", "y"]
        .iter()
        .filter_map(|name| individual.get(name).and_then(ParamValue::as_f64))
        .map(|v| v * v - 10.0 * (2.0 * std::f64::consts::PI * v).cos() + 10.0)
        .sum();
    1.0 / (1.0 + value)
}

fn bench_multi_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_run");
    group.sample_size(10);

    let space = ParameterSpace::new(vec![
        ParameterSpec::real("x", -5.12, 5.12).unwrap(),
        ParameterSpec::real("y", -5.12, 5.12).unwrap(),
    ])
    .unwrap();
    let launcher = EvolutionLauncher::with_defaults(space, rastrigin);
    let options = EvolutionOptions::builder()
        .population_size(40)
        .num_generations(20)
        .mutation_rate(0.05)
        .log_level(LogLevel::None)
        .build();

    for cores in [1, 2, 4].iter() {
        let search = MultiRunSearch::new(*cores, 8).unwrap().with_base_seed(7);

        group.bench_with_input(BenchmarkId::new("cores", cores), &search, |b, search| {
            b.iter(|| {
                search
                    .run_evolution(black_box(launcher.clone()), options.clone())
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_multi_run);
criterion_main!(benches);

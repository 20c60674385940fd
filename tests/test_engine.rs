use gasearch::{
    breeding::{BreedStrategy, PairwiseBreeding},
    error::GeneticError,
    evolution::{EvolutionLauncher, EvolutionLauncherBuilder, EvolutionOptions, LogLevel},
    individual::{initialize_population, Individual},
    rng::RandomNumberGenerator,
    selection::{RankBasedSelection, RouletteWheelSelection, SelectionStrategy},
    space::{ParamValue, ParameterSpace, ParameterSpec},
};

fn unit_interval() -> ParameterSpace {
    ParameterSpace::new(vec![ParameterSpec::real("x", 0.0, 1.0).unwrap()]).unwrap()
}

fn mixed_space() -> ParameterSpace {
    ParameterSpace::new(vec![
        ParameterSpec::categorical("kernel", ["linear", "rbf", "poly"]).unwrap(),
        ParameterSpec::integer("depth", 1, 8).unwrap(),
        ParameterSpec::real("alpha", -0.5, 0.5).unwrap(),
    ])
    .unwrap()
}

fn x_of(individual: &Individual) -> f64 {
    individual.get("x").and_then(ParamValue::as_f64).unwrap_or(0.0)
}

fn quiet_options(population_size: usize, num_generations: usize, mutation_rate: f64) -> EvolutionOptions {
    EvolutionOptions::new(num_generations, LogLevel::None, population_size, mutation_rate)
}

#[test]
fn test_samples_stay_in_domain() {
    let space = mixed_space();
    let mut rng = RandomNumberGenerator::from_seed(7);

    for _ in 0..500 {
        let individual = space.sample(&mut rng);
        assert!(space.admits(&individual), "{} escaped the space", individual);
    }
}

#[test]
fn test_population_key_sets_match_space() {
    let space = mixed_space();
    let mut rng = RandomNumberGenerator::from_seed(11);
    let population = initialize_population(40, &space, &mut rng);

    assert_eq!(population.len(), 40);
    let names: Vec<&str> = space.names().collect();
    for individual in &population {
        let mut keys: Vec<&str> = individual.keys().collect();
        let mut expected = names.clone();
        keys.sort_unstable();
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }
}

#[test]
fn test_crossover_takes_each_gene_from_a_parent() {
    let space = mixed_space();
    let mut rng = RandomNumberGenerator::from_seed(3);

    for _ in 0..100 {
        let a = space.sample(&mut rng);
        let b = space.sample(&mut rng);
        let child = a.crossover(&b, &mut rng);

        for (name, value) in child.iter() {
            assert!(a.get(name) == Some(value) || b.get(name) == Some(value));
        }
    }
}

#[test]
fn test_mutation_extremes() {
    let space = ParameterSpace::new(vec![
        ParameterSpec::integer("a", 0, 1_000_000).unwrap(),
        ParameterSpec::real("b", 0.0, 1.0).unwrap(),
    ])
    .unwrap();
    let mut rng = RandomNumberGenerator::from_seed(5);
    let original = space.sample(&mut rng);

    let unchanged = original.clone().mutate(&space, 0.0, &mut rng);
    assert_eq!(unchanged, original);

    let rerolled = original.clone().mutate(&space, 1.0, &mut rng);
    assert!(space.admits(&rerolled));
    assert_ne!(rerolled.get("a"), original.get("a"));
    assert_ne!(rerolled.get("b"), original.get("b"));
}

#[test]
fn test_reproduction_drops_odd_parent() {
    let space = unit_interval();
    let selection = RouletteWheelSelection::new();
    let breeding = PairwiseBreeding::new();
    let options = quiet_options(41, 2, 0.05);

    for size in [40_usize, 41] {
        let mut rng = RandomNumberGenerator::from_seed(size as u64);
        let population = initialize_population(size, &space, &mut rng);
        let fitness: Vec<f64> = population.iter().map(x_of).collect();

        let parents = selection
            .select(&population, &fitness, population.len(), &mut rng)
            .unwrap();
        let next = breeding.breed(&parents, &space, &options, &mut rng).unwrap();

        assert_eq!(next.len(), 40);
    }
}

#[test]
fn test_identity_fitness_converges() {
    let options = EvolutionOptions::builder()
        .population_size(20)
        .num_generations(10)
        .mutation_rate(0.1)
        .log_level(LogLevel::None)
        .build();
    let launcher = EvolutionLauncher::with_defaults(unit_interval(), x_of);

    let mut converged = 0;
    for seed in 0..10 {
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let result = launcher.evolve(&options, &mut rng).unwrap();

        assert_eq!(result.generations, 10);
        assert_eq!(result.history.len(), 10);
        for window in result.history.windows(2) {
            assert!(window[1].best_fitness >= window[0].best_fitness);
        }
        if result.score >= 0.9 {
            converged += 1;
        }
    }

    assert!(converged >= 8, "only {} of 10 runs converged", converged);
}

#[test]
fn test_constant_zero_fitness() {
    let options = quiet_options(30, 5, 0.05);
    let launcher = EvolutionLauncher::with_defaults(mixed_space(), |_: &Individual| 0.0);
    let mut rng = RandomNumberGenerator::from_seed(1);

    let result = launcher.evolve(&options, &mut rng).unwrap();

    assert_eq!(result.score, 0.0);
    assert!(result.best.is_some());
    assert_eq!(result.generations, 5);
}

#[test]
fn test_search_threshold_stops_early() {
    let mut options = quiet_options(20, 50, 0.1);
    options.set_search_threshold(Some(0.5));
    let launcher = EvolutionLauncher::with_defaults(unit_interval(), x_of);
    let mut rng = RandomNumberGenerator::from_seed(99);

    let result = launcher.evolve(&options, &mut rng).unwrap();

    assert!(result.reached_threshold);
    assert!(result.score >= 0.5);
    assert!(result.generations < 50);
}

#[test]
fn test_negative_fitness_with_roulette_is_rejected() {
    let launcher = EvolutionLauncher::with_defaults(unit_interval(), |i: &Individual| x_of(i) - 2.0);
    let mut rng = RandomNumberGenerator::from_seed(2);

    let result = launcher.evolve(&quiet_options(10, 3, 0.1), &mut rng);

    assert!(matches!(
        result,
        Err(GeneticError::FitnessContractViolation { .. })
    ));
}

#[test]
fn test_rank_selection_handles_negative_fitness() {
    let launcher = EvolutionLauncherBuilder::new()
        .with_space(unit_interval())
        .with_breed_strategy(PairwiseBreeding::new())
        .with_selection_strategy(RankBasedSelection::default())
        .with_challenge(|i: &Individual| x_of(i) - 2.0)
        .build()
        .unwrap();
    let mut rng = RandomNumberGenerator::from_seed(4);

    let result = launcher.evolve(&quiet_options(20, 10, 0.1), &mut rng).unwrap();

    assert!(result.score > -2.0);
    assert!(result.score <= -1.0);
}

#[test]
fn test_invalid_options() {
    let launcher = EvolutionLauncher::with_defaults(unit_interval(), x_of);
    let mut rng = RandomNumberGenerator::new();

    let result = launcher.evolve(&quiet_options(0, 10, 0.1), &mut rng);
    match result {
        Err(GeneticError::Configuration(message)) => {
            assert_eq!(message, "Population size cannot be zero");
        }
        other => panic!("Expected configuration error, got {:?}", other),
    }

    assert!(launcher.evolve(&quiet_options(10, 0, 0.1), &mut rng).is_err());
    assert!(launcher.evolve(&quiet_options(10, 10, 1.5), &mut rng).is_err());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let launcher = EvolutionLauncher::with_defaults(mixed_space(), |i: &Individual| {
        i.get("depth").and_then(ParamValue::as_i64).unwrap_or(0) as f64
            + i.get("alpha").and_then(ParamValue::as_f64).unwrap_or(0.0)
    });
    let options = quiet_options(16, 6, 0.2);

    let first = launcher
        .evolve(&options, &mut RandomNumberGenerator::from_seed(123))
        .unwrap();
    let second = launcher
        .evolve(&options, &mut RandomNumberGenerator::from_seed(123))
        .unwrap();

    assert_eq!(first, second);
}

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use u_tspga::ga::{TspGaConfig, TspGaRunner};
use u_tspga::instance::Instance;

/// Solve a TSP instance with the adaptive genetic algorithm.
#[derive(Debug, Parser)]
#[command(name = "u-tspga", version, about)]
struct Args {
    /// Coordinate file: one `index x y` record per line (TSPLIB headers allowed).
    path: PathBuf,

    /// Expected number of cities (default: whatever the file holds).
    #[arg(long)]
    cities: Option<usize>,

    /// Population size.
    #[arg(long, default_value_t = 100)]
    population: usize,

    /// Number of generations.
    #[arg(long, default_value_t = 5000)]
    generations: usize,

    /// Stagnation window in generations.
    #[arg(long, default_value_t = 10)]
    window: usize,

    /// Average-length change that still counts as stagnation.
    #[arg(long, default_value_t = 10)]
    threshold: u64,

    /// Random seed (default: random).
    #[arg(long)]
    seed: Option<u64>,

    /// Roll back crossover pairs whose duplicates cannot be repaired.
    #[arg(long)]
    strict: bool,

    /// Log progress every N generations (needs -vv).
    #[arg(long, default_value_t = 0)]
    progress: usize,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let instance = Instance::load(&args.path, args.cities)
        .with_context(|| format!("failed to load {}", args.path.display()))?;

    let mut config = TspGaConfig::default()
        .with_population_size(args.population)
        .with_generations(args.generations)
        .with_stagnation_window(args.window)
        .with_stagnation_threshold(args.threshold)
        .with_strict_validation(args.strict)
        .with_progress_interval(args.progress);
    if let Some(n) = args.cities {
        config = config.with_city_count(n);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let result = TspGaRunner::run(instance.matrix(), &config)?;

    println!("greedy tour length: {}", result.seed_length);
    println!("best tour length:   {}", result.best_length);
    let mut route: Vec<String> = result.best.iter().map(|c| c.to_string()).collect();
    if let Some(first) = result.best.first() {
        route.push(first.to_string());
    }
    println!("tour: {}", route.join(" -> "));

    Ok(())
}

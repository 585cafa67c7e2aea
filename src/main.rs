//! Stochastic Pricing CLI
//!
//! Command-line interface for running one premium estimation

use anyhow::{anyhow, Context};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use stochastic_pricing::{
    survival::loader::load_mortality_table, Cohort, PremiumEstimator, SimulationConfig,
    SurvivalTable,
};

#[derive(Parser, Debug)]
#[command(
    name = "stochastic_pricing",
    about = "Monte-Carlo premium estimation over a survival table"
)]
struct Args {
    /// Mortality CSV (age,q0,q1,...); defaults to the embedded pricing basis
    #[arg(long)]
    mortality: Option<PathBuf>,

    /// Seed for the random stream
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Convergence tolerance on the running grand mean
    #[arg(long, default_value_t = 0.001)]
    tolerance: f64,

    /// Maximum number of trials before giving up
    #[arg(long, default_value_t = 100_000)]
    max_trials: usize,

    /// Output CSV path for the trial history
    #[arg(long, default_value = "premium_history.csv")]
    output: PathBuf,

    /// Also print a JSON summary of the run
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Stochastic Pricing v0.1.0");
    println!("=========================\n");

    let table = match &args.mortality {
        Some(path) => load_mortality_table(path)
            .map_err(|e| anyhow!("failed to load {}: {e}", path.display()))?,
        None => SurvivalTable::default_pricing_basis(),
    };
    println!(
        "Survival table: {} ages x {} columns",
        table.num_ages(),
        table.num_columns()
    );

    let config = SimulationConfig {
        tolerance: args.tolerance,
        max_trials: args.max_trials,
        ..Default::default()
    };
    let estimator = PremiumEstimator::new(&table, config)?;
    let mut rng = ChaCha20Rng::seed_from_u64(args.seed);

    let start = Instant::now();
    let result = estimator.estimate(&mut rng)?;
    let elapsed = start.elapsed();

    println!("Converged after {} trials in {:?}", result.num_trials(), elapsed);
    println!(
        "Average time per trial: {:.3} ms",
        elapsed.as_secs_f64() * 1000.0 / result.num_trials() as f64
    );
    println!("Grand mean premium: {:.2}", result.grand_mean());
    if result.degenerate_count() > 0 {
        println!(
            "WARNING: {} cohort prices floored by the degenerate-annuity guard",
            result.degenerate_count()
        );
    }
    println!();

    // Per-cohort summary
    let means = result.mean_premiums();
    println!("{:>6} {:>9} {:>16}", "Cohort", "EntryAge", "MeanPremium");
    println!("{}", "-".repeat(34));
    for cohort in Cohort::all() {
        println!(
            "{:>6} {:>9} {:>16.2}",
            cohort.index, cohort.entry_age, means[cohort.index]
        );
    }

    // Write the full trial history to CSV
    let mut file = File::create(&args.output)
        .with_context(|| format!("unable to create {}", args.output.display()))?;
    write!(file, "Trial")?;
    for cohort in Cohort::all() {
        write!(file, ",Age{}", cohort.entry_age)?;
    }
    writeln!(file)?;
    for (index, trial) in result.trials.iter().enumerate() {
        write!(file, "{index}")?;
        for premium in &trial.premiums {
            write!(file, ",{premium:.4}")?;
        }
        writeln!(file)?;
    }
    println!("\nFull history written to: {}", args.output.display());

    if args.json {
        let summary = serde_json::json!({
            "trials": result.num_trials(),
            "grand_mean": result.grand_mean(),
            "degenerate_count": result.degenerate_count(),
            "mean_premiums": means,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

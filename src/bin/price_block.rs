//! Run a block of independent estimation replicates in parallel
//!
//! Outputs per-cohort premium statistics across replicates, for judging
//! the spread of the converged estimate across random streams

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::time::Instant;
use stochastic_pricing::cohort::COHORT_COUNT;
use stochastic_pricing::{Cohort, ScenarioRunner, SurvivalTable};

const REPLICATES: usize = 32;

fn main() -> Result<()> {
    env_logger::init();

    let start = Instant::now();
    println!("Building pricing basis...");
    let runner = ScenarioRunner::new(SurvivalTable::default_pricing_basis());

    println!("Running {REPLICATES} replicates...");
    let run_start = Instant::now();
    let seeds: Vec<u64> = (0..REPLICATES as u64).collect();
    let results = runner.run_seeds(&seeds);
    println!("Replicates complete in {:?}", run_start.elapsed());

    // Collect per-cohort means from the successful replicates
    let mut per_cohort: Vec<Vec<f64>> = vec![Vec::new(); COHORT_COUNT];
    let mut total_trials = 0usize;
    let mut failures = 0usize;
    for (seed, result) in seeds.iter().zip(&results) {
        match result {
            Ok(estimate) => {
                total_trials += estimate.num_trials();
                for (index, mean) in estimate.mean_premiums().into_iter().enumerate() {
                    per_cohort[index].push(mean);
                }
            }
            Err(err) => {
                eprintln!("replicate {seed} failed: {err}");
                failures += 1;
            }
        }
    }
    let succeeded = REPLICATES - failures;
    if succeeded == 0 {
        anyhow::bail!("every replicate failed");
    }

    // Write per-cohort statistics
    let output_path = "block_premiums.csv";
    let mut file = File::create(output_path).context("unable to create output file")?;

    writeln!(
        file,
        "# generated {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(file, "Cohort,EntryAge,MeanPremium,StdDev,Replicates")?;

    for cohort in Cohort::all() {
        let samples = &per_cohort[cohort.index];
        let mean: f64 = samples.iter().sum::<f64>() / samples.len() as f64;
        let variance: f64 = samples
            .iter()
            .map(|sample| (sample - mean).powi(2))
            .sum::<f64>()
            / samples.len() as f64;

        writeln!(
            file,
            "{},{},{:.4},{:.4},{}",
            cohort.index,
            cohort.entry_age,
            mean,
            variance.sqrt(),
            samples.len(),
        )?;
    }

    println!("Output written to {output_path}");

    println!("\nBlock Summary:");
    println!("  Replicates: {succeeded} ok, {failures} failed");
    println!(
        "  Trials per replicate: {:.1} average",
        total_trials as f64 / succeeded as f64
    );
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}

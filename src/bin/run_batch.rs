//! Run forecasts for every request in a CSV file
//!
//! Outputs monthly per-phase totals across all wells

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use decline_forecast::batch::{load_requests, BatchRunner};
use decline_forecast::ForecastSettings;

#[derive(Parser, Debug)]
#[command(version, about = "Forecast a batch of wells and aggregate by phase", long_about = None)]
struct Cli {
    /// Request CSV (WellID, Phase, CurveType, Qi, Di, De, Dt, Dte, B, Start, Stop)
    #[arg(short, long, default_value = "requests.csv")]
    requests: PathBuf,

    /// Path to settings JSON
    #[arg(short, long, env = "DECLINE_SETTINGS", default_value = "settings.json")]
    settings: PathBuf,

    /// Aggregated output CSV
    #[arg(short, long, default_value = "batch_forecast_output.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    println!("Loading requests from {}...", cli.requests.display());

    let settings = ForecastSettings::from_path(&cli.settings)
        .with_context(|| format!("loading settings from {}", cli.settings.display()))?;
    let requests = load_requests(&cli.requests)
        .with_context(|| format!("loading requests from {}", cli.requests.display()))?;
    println!("Loaded {} requests in {:?}", requests.len(), start.elapsed());

    println!("Running forecasts...");
    let run_start = Instant::now();
    let runner = BatchRunner::new(&settings)?;
    let outcomes = runner.run(&requests);
    println!("Forecasts complete in {:?}", run_start.elapsed());

    for outcome in &outcomes {
        if let Err(err) = &outcome.forecast {
            eprintln!("  {} {}: {}", outcome.well_id, outcome.phase, err);
        }
    }

    let ledger = runner.aggregate(&outcomes)?;
    let rows = ledger.rows();

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    println!("Output written to {}", cli.output.display());

    println!("\nBatch Summary:");
    for name in ["oil_volume", "gas_volume", "ngl_volume", "water_volume"] {
        let total: f64 = ledger.column(name).map(|c| c.iter().sum()).unwrap_or(0.0);
        println!("  {:<13} {:>16.2}", name, total);
    }
    if let Some(first) = rows.first() {
        println!(
            "  {}: oil {:.2}/d, gas {:.2}/d",
            first.month, first.entry_oil_rate, first.entry_gas_rate
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}

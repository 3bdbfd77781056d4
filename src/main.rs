//! Decline Forecast CLI
//!
//! Forecasts a single decline curve over the configured horizon and prints the monthly rows

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use decline_forecast::{
    terminal_switch, DeclineParameters, DeclineRate, DeclineType, ForecastAssembler,
    ForecastSettings, PeriodBound,
};

/// Forecast monthly rates and volumes for one Arps decline curve
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to settings JSON (effective_date, forecast_duration, day counts)
    #[arg(short, long, env = "DECLINE_SETTINGS", default_value = "settings.json")]
    settings: PathBuf,

    /// Curve family: exponential, harmonic, hyperbolic, flat, modified_hyperbolic
    #[arg(short, long, default_value = "exponential")]
    curve: DeclineType,

    /// Initial rate
    #[arg(long)]
    qi: f64,

    /// Nominal initial decline (annual fraction)
    #[arg(long, conflicts_with = "de")]
    di: Option<f64>,

    /// Secant effective initial decline (annual fraction)
    #[arg(long)]
    de: Option<f64>,

    /// Hyperbolic exponent
    #[arg(short, long)]
    b: Option<f64>,

    /// Nominal terminal decline
    #[arg(long, conflicts_with = "dte")]
    dt: Option<f64>,

    /// Secant effective terminal decline
    #[arg(long)]
    dte: Option<f64>,

    /// First period, as an index or "YYYY-MM"
    #[arg(long)]
    start: Option<PeriodBound>,

    /// Last period, as an index or "YYYY-MM"
    #[arg(long)]
    stop: Option<PeriodBound>,

    /// Write all rows to this file (.csv or .json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of rows to print
    #[arg(long, default_value_t = 24)]
    rows: usize,
}

impl Cli {
    fn parameters(&self) -> DeclineParameters {
        let mut params = DeclineParameters::new(self.curve, self.qi);
        if let Some(di) = self.di {
            params = params.with_initial_decline(DeclineRate::Nominal(di));
        } else if let Some(de) = self.de {
            params = params.with_initial_decline(DeclineRate::Secant(de));
        }
        if let Some(dt) = self.dt {
            params = params.with_terminal_decline(DeclineRate::Nominal(dt));
        } else if let Some(dte) = self.dte {
            params = params.with_terminal_decline(DeclineRate::Secant(dte));
        }
        if let Some(b) = self.b {
            params = params.with_b(b);
        }
        params
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("Decline Forecast v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");

    let settings = ForecastSettings::from_path(&cli.settings)
        .with_context(|| format!("loading settings from {}", cli.settings.display()))?;
    let config = settings.engine_config()?;
    let calendar = settings.calendar()?;
    let grid = settings.time_grid()?;
    let params = cli.parameters();
    params.validate()?;

    println!("Curve: {}", params.curve());
    println!("  Qi: {:.4}", params.qi());
    if let Some(di) = params.initial_decline() {
        println!("  Di: {:?} -> nominal {:.6}", di, params.nominal_initial_decline()?);
    }
    if let Some(b) = params.b() {
        println!("  b:  {}", b);
    }
    if params.curve() == DeclineType::ModifiedHyperbolic {
        if let (Some(di), Some(dt), Some(b)) =
            (params.initial_decline(), params.terminal_decline(), params.b())
        {
            let switch = terminal_switch(params.qi(), di, b, dt, &config)?;
            println!(
                "  Switch: t = {:.4} days, q = {:.4}",
                switch.t_switch, switch.q_switch
            );
        }
    }
    println!(
        "  Horizon: {} months from {}",
        calendar.duration(),
        calendar.effective_month().format("%Y-%m")
    );
    println!();

    let range = calendar.resolve_range(cli.start, cli.stop)?;
    let assembler = ForecastAssembler::new(config)?;
    let result = assembler.forecast(&params, &grid, Some(range))?;

    println!("Forecast ({} months):", result.len());
    println!(
        "{:>6} {:>8} {:>10} {:>10} {:>14} {:>14} {:>14}",
        "Period", "Month", "DaysStart", "DaysEnd", "EntryRate", "ExitRate", "Volume"
    );
    println!("{}", "-".repeat(92));

    for row in result.rows.iter().take(cli.rows) {
        let month = calendar
            .label(row.period)
            .map(|d| d.format("%Y-%m").to_string())
            .unwrap_or_default();
        println!(
            "{:>6} {:>8} {:>10.4} {:>10.4} {:>14.4} {:>14.4} {:>14.4}",
            row.period, month, row.days_start, row.days_end, row.entry_rate, row.exit_rate, row.volume
        );
    }

    if result.len() > cli.rows {
        println!("... ({} more months)", result.len() - cli.rows);
    }

    if let Some(path) = &cli.output {
        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            serde_json::to_writer_pretty(file, &result)?;
        } else {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("creating {}", path.display()))?;
            for row in &result.rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        println!("\nFull results written to: {}", path.display());
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Periods: {}", summary.periods);
    println!("  First Period: {}", summary.first_period);
    println!("  Initial Rate: {:.4}", summary.initial_rate);
    println!("  Final Rate: {:.4}", summary.final_rate);
    println!("  Total Volume: {:.4}", summary.total_volume);

    Ok(())
}

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use lemonstand_config::StandConfig;
use lemonstand_core::stand::{DayResult, RunSummary};
use lemonstand_engine::{
    run_fuzz_mode, run_simulation_mode, DiagnosticsCollector, SimulationOverrides,
};
use lemonstand_telemetry::logging::EventLogger;
use lemonstand_telemetry::metrics::MetricsRecorder;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Configuration file; defaults to `config/lemonstand.yaml` plus environment
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a deterministic simulation with the greedy policy
    Simulate(SimulateArgs),
    /// Drive many seeds with random plans and check invariants
    Fuzz(FuzzArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Seed for the random stream (overrides configuration)
    #[arg(long)]
    pub seed: Option<u32>,
    /// Number of days to play (overrides configuration)
    #[arg(long)]
    pub days: Option<u32>,
    /// Fail unless the run's fingerprint matches
    #[arg(long)]
    pub validate_hash: Option<String>,
    /// Print one line per day
    #[arg(long)]
    pub history: bool,
    /// Print Prometheus metrics after the run
    #[arg(long)]
    pub metrics: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FuzzArgs {
    /// Initial seed for fuzzing (will auto-increment)
    #[arg(long, default_value_t = 1)]
    pub seed: u32,
    /// Number of fuzzing iterations
    #[arg(long, default_value_t = 100)]
    pub iterations: u32,
    /// Days played per iteration
    #[arg(long, default_value_t = 30)]
    pub days: u32,
    /// Directory for YAML violation reports
    #[arg(long)]
    pub report_dir: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<StandConfig> {
    let config = match path {
        Some(path) => StandConfig::load_from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => StandConfig::load().context("loading configuration")?,
    };
    Ok(config)
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_ref())?;
    EventLogger::init(&config.telemetry.log_level);
    let metrics = MetricsRecorder::new().context("registering metrics")?;

    match cli.command {
        Commands::Simulate(args) => simulate(&config, args, &metrics),
        Commands::Fuzz(args) => fuzz(&config, args, &metrics),
    }
}

fn simulate(
    config: &StandConfig,
    args: SimulateArgs,
    metrics: &MetricsRecorder,
) -> anyhow::Result<()> {
    let overrides = SimulationOverrides {
        seed: args.seed,
        days: args.days,
    };
    let report = run_simulation_mode(config, overrides, args.validate_hash.as_deref(), metrics)?;

    if args.history {
        for day in &report.history {
            println!("{}", day_line(day));
        }
    }
    print_summary(report.seed, &report.summary);
    println!("fingerprint: {}", report.fingerprint);

    if args.metrics || config.telemetry.metrics {
        print!("{}", metrics.gather_metrics()?);
    }
    Ok(())
}

fn fuzz(config: &StandConfig, args: FuzzArgs, metrics: &MetricsRecorder) -> anyhow::Result<()> {
    let mut diagnostics = DiagnosticsCollector::new();
    let report = run_fuzz_mode(
        config,
        args.seed,
        args.iterations,
        args.days,
        metrics,
        &mut diagnostics,
    )?;

    println!(
        "iterations: {}  days: {}  rejected: {}  violations: {}",
        report.iterations, report.days_committed, report.rejected_days, report.violations
    );

    if let Some(dir) = args.report_dir.as_deref() {
        let written = diagnostics
            .write_to(dir)
            .with_context(|| format!("writing reports to {}", dir.display()))?;
        info!("Wrote {} violation reports", written.len());
    }
    if report.violations > 0 {
        bail!("{} invariant violations found", report.violations);
    }
    Ok(())
}

fn day_line(day: &DayResult) -> String {
    let stock_out = day
        .stock_out
        .map(|reason| format!("  stock-out: {reason}"))
        .unwrap_or_default();
    format!(
        "day {:>3}  {:<28} price ${:.2}  customers {:>3}  sold {:>3}  revenue ${:>7.2}  cost ${:>6.2}  profit ${:>7.2}{}",
        day.day,
        day.weather.to_string(),
        day.plan.price(),
        day.customers,
        day.units_sold,
        day.gross_revenue,
        day.supply_cost,
        day.net_profit,
        stock_out
    )
}

fn print_summary(seed: u32, summary: &RunSummary) {
    println!("seed: {seed}");
    println!("days: {}", summary.days);
    println!("customers: {}", summary.customers);
    println!("units sold: {}", summary.units_sold);
    println!("gross revenue: ${:.2}", summary.gross_revenue);
    println!("supply cost: ${:.2}", summary.supply_cost);
    println!("net profit: ${:.2}", summary.net_profit);
    println!("stock-out days: {}", summary.stock_out_days);
    println!("ending cash: ${:.2}", summary.cash);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_simulate_overrides() {
        let cli = Cli::parse_from([
            "lemonstand",
            "simulate",
            "--seed",
            "9",
            "--days",
            "14",
            "--validate-hash",
            "abc",
        ]);
        let Commands::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.days, Some(14));
        assert_eq!(args.validate_hash.as_deref(), Some("abc"));
    }

    #[test]
    fn fuzz_defaults() {
        let cli = Cli::parse_from(["lemonstand", "fuzz"]);
        let Commands::Fuzz(args) = cli.command else {
            panic!("expected fuzz");
        };
        assert_eq!(args.seed, 1);
        assert_eq!(args.iterations, 100);
        assert_eq!(args.days, 30);
    }
}

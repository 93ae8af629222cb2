// lemonstand-engine/src/runtime.rs

/*!
# Runtime Engine

Shared entry points for front ends: a deterministic simulation run driven by
the greedy policy, and a fuzz loop that drives many seeds with random plans and
checks the stand's invariants after every day.
*/

use opentelemetry::KeyValue;
use tracing::{debug, error, info, instrument, warn};

use lemonstand_config::StandConfig;
use lemonstand_core::demand::DemandModel;
use lemonstand_core::plan::DayPlan;
use lemonstand_core::stand::{DayConditions, DayResult, RunSummary, StandState};
use lemonstand_core::SimulationError;
use lemonstand_simulator::{DecisionPolicy, GreedyPolicy, RandomPolicy, SimulationEngine};
use lemonstand_telemetry::{logging::EventLogger, metrics::MetricsRecorder};

use crate::diagnostics::{DiagnosticsCollector, ViolationReport};
use crate::error::EngineError;

/// Allowed gap between committed cash and the rounded day figures.
const CONSERVATION_TOLERANCE: f64 = 0.011;

/// Command-line values that take precedence over configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationOverrides {
    pub seed: Option<u32>,
    pub days: Option<u32>,
}

/// Outcome of a completed simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub seed: u32,
    pub summary: RunSummary,
    pub fingerprint: String,
    pub history: Vec<DayResult>,
}

/// Totals over a fuzz session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FuzzReport {
    pub iterations: u32,
    pub days_committed: u64,
    pub rejected_days: u64,
    pub violations: usize,
}

fn build_engine(config: &StandConfig, seed: u32) -> Result<SimulationEngine, EngineError> {
    let state = config.starting_state()?;
    Ok(SimulationEngine::new(seed, state)
        .with_demand_model(DemandModel::from(&config.demand))
        .with_spoilage_fraction(config.simulation.spoilage_fraction))
}

/// Runs the configured simulation with the greedy policy.
///
/// * `validate_hash` - expected fingerprint; a mismatch fails the run.
#[instrument(level = "info", name = "run_simulation_mode", skip(config, metrics))]
pub fn run_simulation_mode(
    config: &StandConfig,
    overrides: SimulationOverrides,
    validate_hash: Option<&str>,
    metrics: &MetricsRecorder,
) -> Result<RunReport, EngineError> {
    let seed = overrides.seed.unwrap_or(config.simulation.seed);
    let days = overrides.days.unwrap_or(config.simulation.days);
    let mut engine = build_engine(config, seed)?;
    let recipe = *engine.state().recipe();
    let mut policy = GreedyPolicy::new(*engine.demand_model(), recipe);

    debug!(seed, days, "Starting simulation");
    for _ in 0..days {
        match engine.run_day(&mut policy) {
            Ok(result) => metrics.record_day(result),
            Err(e) => {
                metrics.inc_settlement_failures();
                return Err(e.into());
            }
        }
    }

    let fingerprint = engine.fingerprint();
    info!("Simulation complete. State hash: {}", fingerprint);
    if let Some(expected) = validate_hash {
        if fingerprint != expected {
            error!("Hash mismatch! Expected: {}", expected);
            return Err(EngineError::Validation(format!(
                "State hash mismatch!\nExpected: {}\nActual: {}",
                expected, fingerprint
            )));
        }
        info!("Hash validation successful");
    }

    let summary = engine.state().summary();
    EventLogger::log_event(
        "simulation_complete",
        vec![
            KeyValue::new("seed", i64::from(seed)),
            KeyValue::new("days", i64::from(summary.days)),
            KeyValue::new("cash", summary.cash),
            KeyValue::new("final_hash", fingerprint.clone()),
        ],
    );

    Ok(RunReport {
        seed,
        summary,
        fingerprint,
        history: engine.state().history().to_vec(),
    })
}

/// Plays `iterations` runs of `days_per_run` days with random plans, seeds
/// counting up from `base_seed`.
///
/// Every committed day is checked for cash conservation and spoilage, every
/// rejected day for an untouched stand. A rejected day is retried with an empty
/// order under the same weather and prices. Broken invariants land in
/// `diagnostics`; they do not abort the session.
#[instrument(level = "info", name = "run_fuzz_mode", skip(config, metrics, diagnostics))]
pub fn run_fuzz_mode(
    config: &StandConfig,
    base_seed: u32,
    iterations: u32,
    days_per_run: u32,
    metrics: &MetricsRecorder,
    diagnostics: &mut DiagnosticsCollector,
) -> Result<FuzzReport, EngineError> {
    info!("Starting fuzz testing");
    let mut report = FuzzReport::default();

    for iteration in 0..iterations {
        let seed = base_seed.wrapping_add(iteration);
        let mut engine = build_engine(config, seed)?;
        let mut policy = RandomPolicy::new(u64::from(seed));
        debug!(iteration = iteration + 1, seed, "Starting fuzz iteration");

        for _ in 0..days_per_run {
            let mut check = DayCheck {
                seed,
                day: engine.state().next_day(),
                conditions: engine.forecast_next(),
                spoilage_fraction: config.simulation.spoilage_fraction,
                diagnostics: &mut *diagnostics,
                violations: 0,
            };
            let plan = policy.plan(
                engine.state(),
                &check.conditions.weather,
                &check.conditions.prices,
                check.day,
            );
            let committed = check.play(&mut engine, plan, metrics)?;
            report.violations += check.violations;
            match committed {
                DayOutcome::Committed => report.days_committed += 1,
                DayOutcome::Retried => {
                    report.rejected_days += 1;
                    report.days_committed += 1;
                }
                DayOutcome::Abandoned => {
                    report.rejected_days += 1;
                    break;
                }
            }
        }

        report.iterations += 1;
        if (iteration + 1) % 10 == 0 {
            info!("Progress: {}/{}", iteration + 1, iterations);
        }
    }

    info!(
        iterations = report.iterations,
        days = report.days_committed,
        rejected = report.rejected_days,
        violations = report.violations,
        "Fuzz testing complete"
    );
    Ok(report)
}

enum DayOutcome {
    Committed,
    Retried,
    Abandoned,
}

/// Invariant checks for a single fuzzed day under fixed conditions.
struct DayCheck<'a> {
    seed: u32,
    day: u32,
    conditions: DayConditions,
    spoilage_fraction: f64,
    diagnostics: &'a mut DiagnosticsCollector,
    violations: usize,
}

impl DayCheck<'_> {
    fn play(
        &mut self,
        engine: &mut SimulationEngine,
        plan: DayPlan,
        metrics: &MetricsRecorder,
    ) -> Result<DayOutcome, EngineError> {
        let before = engine.state().clone();
        let fingerprint = engine.fingerprint();

        let rejection = match engine.run_manual_day(plan, Some(self.conditions)) {
            Ok(result) => {
                let result = result.clone();
                metrics.record_day(&result);
                self.check_committed(&before, engine.state(), &result, plan)?;
                return Ok(DayOutcome::Committed);
            }
            Err(rejection) => rejection,
        };

        metrics.inc_settlement_failures();
        let SimulationError::InsufficientFunds {
            required,
            available,
            ..
        } = rejection;
        if engine.state() != &before || engine.fingerprint() != fingerprint {
            self.violation("abort_without_mutation", "rejected day changed the stand".into(), plan)?;
        }
        if required <= available {
            self.violation(
                "rejection_justified",
                format!("order of {required} rejected with {available} on hand"),
                plan,
            )?;
        }

        let retry = plan.without_purchases();
        match engine.run_manual_day(retry, Some(self.conditions)) {
            Ok(result) => {
                let result = result.clone();
                metrics.record_day(&result);
                self.check_committed(&before, engine.state(), &result, retry)?;
                Ok(DayOutcome::Retried)
            }
            Err(e) => {
                warn!(seed = self.seed, day = self.day, error = %e, "Empty order rejected");
                self.violation("empty_order_settles", e.to_string(), retry)?;
                Ok(DayOutcome::Abandoned)
            }
        }
    }

    fn check_committed(
        &mut self,
        before: &StandState,
        after: &StandState,
        result: &DayResult,
        plan: DayPlan,
    ) -> Result<(), EngineError> {
        let expected = before.cash() - result.supply_cost + result.gross_revenue;
        if (after.cash() - expected).abs() > CONSERVATION_TOLERANCE {
            self.violation(
                "cash_conservation",
                format!("cash {} but expected {}", after.cash(), expected),
                plan,
            )?;
        }
        if after.cash() < 0.0 {
            self.violation("non_negative_cash", format!("cash {}", after.cash()), plan)?;
        }

        let stocked_ice = before.production().ice().saturating_add(plan.order().ice);
        let max_ice = (f64::from(stocked_ice) * (1.0 - self.spoilage_fraction)).floor();
        if f64::from(result.leftovers.ice) > max_ice {
            self.violation(
                "ice_spoilage",
                format!("{} ice left, at most {} allowed", result.leftovers.ice, max_ice),
                plan,
            )?;
        }
        if result.units_sold > result.customers {
            self.violation(
                "sales_within_traffic",
                format!("{} sold to {} customers", result.units_sold, result.customers),
                plan,
            )?;
        }
        Ok(())
    }

    fn violation(
        &mut self,
        invariant: &str,
        detail: String,
        plan: DayPlan,
    ) -> Result<(), EngineError> {
        error!(seed = self.seed, day = self.day, invariant, %detail, "Invariant violated");
        EventLogger::log_event(
            "fuzz_violation",
            vec![
                KeyValue::new("seed", i64::from(self.seed)),
                KeyValue::new("day", i64::from(self.day)),
                KeyValue::new("invariant", invariant.to_string()),
            ],
        );
        self.diagnostics.record(ViolationReport {
            seed: self.seed,
            day: self.day,
            invariant: invariant.to_string(),
            detail,
            conditions: self.conditions,
            plan,
        })?;
        self.violations += 1;
        Ok(())
    }
}

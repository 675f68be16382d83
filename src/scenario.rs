use crate::config::ScenarioConfig;
use crate::rainfall::RainfallObservation;
use crate::resolver::{self, ResolveError};
use crate::rollup::{self, AnnualSummary, EmptyLedgerError, MonthlyRollup};
use crate::simulator::{self, DailyBalanceLedger, SimulationError};
use rayon::prelude::*;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Everything one scenario evaluation produces: the daily ledger plus
/// the monthly and whole-run roll-ups derived from it. Owned by the
/// caller that requested the scenario, discarded after presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub ledger: DailyBalanceLedger,
    pub monthly: Vec<MonthlyRollup>,
    pub annual: AnnualSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    Resolve(ResolveError),
    Simulation(SimulationError),
    EmptyLedger(EmptyLedgerError),
}

impl Display for ScenarioError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolve(e) => write!(f, "{}", e),
            Self::Simulation(e) => write!(f, "{}", e),
            Self::EmptyLedger(e) => write!(f, "{}", e),
        }
    }
}

impl Error for ScenarioError {}

impl From<ResolveError> for ScenarioError {
    fn from(e: ResolveError) -> Self {
        Self::Resolve(e)
    }
}

impl From<SimulationError> for ScenarioError {
    fn from(e: SimulationError) -> Self {
        Self::Simulation(e)
    }
}

impl From<EmptyLedgerError> for ScenarioError {
    fn from(e: EmptyLedgerError) -> Self {
        Self::EmptyLedger(e)
    }
}

/// Evaluates one scenario end to end: resolve the daily series for the
/// configured aggregation mode and year range, run the water-balance
/// recurrence, and derive the roll-ups. A run either yields a complete
/// outcome or fails fast with the first error; there are no partial
/// results.
pub fn evaluate(
    series: &[RainfallObservation],
    config: &ScenarioConfig,
) -> Result<ScenarioOutcome, ScenarioError> {
    let resolved = resolver::resolve(series, config)?;
    let ledger = simulator::simulate(&resolved, config)?;
    let monthly = rollup::monthly(&ledger)?;
    let annual = rollup::annual(&ledger)?;
    Ok(ScenarioOutcome {
        ledger,
        monthly,
        annual,
    })
}

/// Evaluates independent scenario configurations against the same
/// rainfall record in parallel. Each run reads disjoint immutable
/// input and produces a fresh outcome, so no coordination is needed.
pub fn evaluate_many(
    series: &[RainfallObservation],
    configs: &[ScenarioConfig],
) -> Vec<Result<ScenarioOutcome, ScenarioError>> {
    configs
        .par_iter()
        .map(|config| evaluate(series, config))
        .collect()
}

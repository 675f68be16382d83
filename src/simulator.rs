use crate::config::{InvalidConfigError, ScenarioConfig};
use crate::rainfall::ResolvedDailySeries;
use crate::utils::round_to_unit;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of days processed in one simulation run. 363 rather than a
/// full calendar year sidesteps leap-day and 365-vs-366 alignment
/// between the resolved series and the simulated window.
pub const SIMULATION_DAYS: usize = 363;

/// The water balance of a single simulated day. All fields are stored
/// rounded to the nearest whole liter / millimeter; the closing level
/// of day `d` is the opening level of day `d + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBalanceRecord {
    pub date: NaiveDate,
    pub rainfall_mm: f64,
    pub opening_level_l: f64,
    pub usage_l: f64,
    pub potential_collection_l: f64,
    pub actual_collection_l: f64,
    pub overflow_l: f64,
    pub tanker_delivered_l: f64,
    pub closing_level_l: f64,
}

/// The complete ordered output of one simulation run, one record per
/// simulated day. Created by a single `simulate` call and never
/// mutated afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBalanceLedger {
    pub records: Vec<DailyBalanceRecord>,
}

impl DailyBalanceLedger {
    pub fn new(records: Vec<DailyBalanceRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_collection_l(&self) -> f64 {
        self.records.iter().map(|r| r.actual_collection_l).sum()
    }

    pub fn total_tanker_l(&self) -> f64 {
        self.records.iter().map(|r| r.tanker_delivered_l).sum()
    }

    pub fn total_overflow_l(&self) -> f64 {
        self.records.iter().map(|r| r.overflow_l).sum()
    }

    pub fn total_usage_l(&self) -> f64 {
        self.records.iter().map(|r| r.usage_l).sum()
    }

    /// Days on which the tank closed below zero: the scenario cannot
    /// sustain the configured usage on these days. The level is
    /// reported as-is, never clamped.
    pub fn deficit_days(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.closing_level_l < 0.0)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    InvalidConfig(InvalidConfigError),
    EmptySeries,
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(e) => write!(f, "invalid config: {}", e),
            Self::EmptySeries => {
                write!(f, "resolved series has no days to simulate")
            }
        }
    }
}

impl Error for SimulationError {}

impl From<InvalidConfigError> for SimulationError {
    fn from(e: InvalidConfigError) -> Self {
        Self::InvalidConfig(e)
    }
}

/// Runs the day-by-day water-balance recurrence over the first
/// `min(SIMULATION_DAYS, series.len())` days of the resolved series,
/// producing the daily ledger. Deterministic: the same inputs always
/// yield a bit-identical ledger.
///
/// The recurrence carries a single piece of state, the prior day's
/// closing level:
/// 1. opening level = tank level at initial percentage on day one,
///    else yesterday's closing level;
/// 2. potential collection = rainfall x roof size x efficiency;
/// 3. collection is clipped only when it would push the tank past
///    capacity, the remainder counts as overflow;
/// 4. a tanker delivery of whole refill units is triggered when the
///    *opening* level sits below the reorder threshold, so a day that
///    opened low can both overflow and take a delivery;
/// 5. closing level = opening - usage + collection + delivery, with no
///    upper clamp and no floor at zero.
///
/// Every stored value is rounded to the nearest whole unit and the
/// rounded closing level feeds the next day.
pub fn simulate(
    series: &ResolvedDailySeries,
    config: &ScenarioConfig,
) -> Result<DailyBalanceLedger, SimulationError> {
    config.validate()?;
    if series.is_empty() {
        return Err(SimulationError::EmptySeries);
    }

    let num_days = SIMULATION_DAYS.min(series.len());
    let capacity = config.tank_capacity_l;
    let reorder_threshold = config.reorder_threshold_l();
    // usage is rounded once up front so that the per-day arithmetic
    // stays integral and collection + overflow always partitions the
    // potential collection exactly
    let usage = round_to_unit(config.daily_usage_l);

    let mut opening = round_to_unit(
        capacity * config.initial_water_level_pct / 100.0,
    );
    let mut records = Vec::<DailyBalanceRecord>::with_capacity(num_days);

    for observation in series.days[..num_days].iter() {
        let potential = round_to_unit(
            observation.rainfall_mm
                * config.roof_size_m2
                * config.roof_efficiency_pct
                / 100.0,
        );

        let (actual, overflow) = if (opening - usage) + potential < capacity
        {
            (potential, 0.0)
        } else {
            let actual = round_to_unit(capacity - (opening - usage));
            (actual, potential - actual)
        };

        // judged against yesterday's level, not today's post-collection
        // level
        let tanker = if opening < reorder_threshold {
            let headroom = capacity - opening;
            let units = (headroom / config.tanker_refill_unit_l).floor();
            round_to_unit(units * config.tanker_refill_unit_l)
        } else {
            0.0
        };

        let closing = round_to_unit((opening - usage) + actual + tanker);

        records.push(DailyBalanceRecord {
            date: observation.date,
            rainfall_mm: round_to_unit(observation.rainfall_mm),
            opening_level_l: opening,
            usage_l: usage,
            potential_collection_l: potential,
            actual_collection_l: actual,
            overflow_l: overflow,
            tanker_delivered_l: tanker,
            closing_level_l: closing,
        });

        opening = closing;
    }

    Ok(DailyBalanceLedger::new(records))
}

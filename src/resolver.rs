use crate::config::{AggregationMode, ScenarioConfig};
use crate::rainfall::{RainfallObservation, ResolvedDailySeries};
use crate::simulator::SIMULATION_DAYS;
use crate::utils;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No observation falls inside the requested year range.
    EmptyRange { begin_year: i32, end_year: i32 },
    /// The resolved series is shorter than the simulator's day count.
    InsufficientData { available: usize, required: usize },
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRange {
                begin_year,
                end_year,
            } => {
                write!(
                    f,
                    "no rainfall observations between {} and {}",
                    begin_year, end_year
                )
            }
            Self::InsufficientData {
                available,
                required,
            } => {
                write!(
                    f,
                    "resolved series has {} days, simulation requires {}",
                    available, required
                )
            }
        }
    }
}

impl Error for ResolveError {}

/// The synthetic year that averaged / extremal calendar-day values are
/// re-dated onto: the midpoint of the requested range, rounded half
/// away from zero.
pub fn representative_year(begin_year: i32, end_year: i32) -> i32 {
    (begin_year as f64 + ((end_year - begin_year) as f64) / 2.0).round()
        as i32
}

fn in_year_range(
    observation: &RainfallObservation,
    begin_year: i32,
    end_year: i32,
) -> bool {
    let year = observation.date.year();
    year >= begin_year && year <= end_year
}

/// Groups the in-range observations by calendar (month, day), ignoring
/// the year. Feb 29 is excluded entirely: not every year in the range
/// has it, and the representative year the groups are re-dated onto is
/// frequently not a leap year.
fn group_by_calendar_day(
    series: &[RainfallObservation],
    begin_year: i32,
    end_year: i32,
) -> BTreeMap<(u32, u32), Vec<f64>> {
    let mut groups = BTreeMap::<(u32, u32), Vec<f64>>::new();
    for observation in series
        .iter()
        .filter(|o| in_year_range(o, begin_year, end_year))
    {
        let month = observation.date.month();
        let day = observation.date.day();
        if (month, day) == (2, 29) {
            continue;
        }
        groups
            .entry((month, day))
            .or_default()
            .push(observation.rainfall_mm);
    }
    groups
}

/// Re-dates one value per calendar-day group onto the representative
/// year, in calendar order.
fn redate_onto_representative_year<F>(
    groups: &BTreeMap<(u32, u32), Vec<f64>>,
    begin_year: i32,
    end_year: i32,
    select: F,
) -> Vec<RainfallObservation>
where
    F: Fn(&[f64]) -> f64,
{
    let year = representative_year(begin_year, end_year);
    groups
        .iter()
        .map(|((month, day), values)| {
            // Feb 29 was filtered while grouping, so every remaining
            // (month, day) exists in any year.
            let date = NaiveDate::from_ymd_opt(year, *month, *day).unwrap();
            RainfallObservation::new(date, select(values.as_slice()))
        })
        .collect()
}

fn one_year(
    series: &[RainfallObservation],
    begin_year: i32,
    end_year: i32,
) -> Vec<RainfallObservation> {
    series
        .iter()
        .filter(|o| in_year_range(o, begin_year, end_year))
        .cloned()
        .collect()
}

fn largest(values: &[f64]) -> f64 {
    let mut largest = f64::NEG_INFINITY;
    for v in values.iter() {
        largest = largest.max(*v);
    }
    largest
}

fn smallest(values: &[f64]) -> f64 {
    let mut smallest = f64::INFINITY;
    for v in values.iter() {
        smallest = smallest.min(*v);
    }
    smallest
}

/// Produces the exact daily series the simulator will consume,
/// applying the scenario's aggregation mode to the raw multi-year
/// record. Pure function of its inputs.
pub fn resolve(
    series: &[RainfallObservation],
    config: &ScenarioConfig,
) -> Result<ResolvedDailySeries, ResolveError> {
    let begin_year = config.begin_year;
    let end_year = config.end_year;
    let days = match config.aggregation_mode {
        AggregationMode::OneYear => one_year(series, begin_year, end_year),
        AggregationMode::Average => redate_onto_representative_year(
            &group_by_calendar_day(series, begin_year, end_year),
            begin_year,
            end_year,
            utils::mean,
        ),
        AggregationMode::WorstDay => redate_onto_representative_year(
            &group_by_calendar_day(series, begin_year, end_year),
            begin_year,
            end_year,
            largest,
        ),
        AggregationMode::BestDay => redate_onto_representative_year(
            &group_by_calendar_day(series, begin_year, end_year),
            begin_year,
            end_year,
            smallest,
        ),
    };
    if days.is_empty() {
        return Err(ResolveError::EmptyRange {
            begin_year,
            end_year,
        });
    }
    if days.len() < SIMULATION_DAYS {
        return Err(ResolveError::InsufficientData {
            available: days.len(),
            required: SIMULATION_DAYS,
        });
    }
    Ok(ResolvedDailySeries::new(days))
}

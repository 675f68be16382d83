use crate::simulator::DailyBalanceLedger;
use chrono::Datelike;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyLedgerError;

impl Display for EmptyLedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot roll up an empty ledger")
    }
}

impl Error for EmptyLedgerError {}

/// One simulated month: summed flows plus the tank level at the
/// opening of the month's first simulated day.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRollup {
    pub year: i32,
    pub month: u32,
    pub collection_l: f64,
    pub tanker_delivered_l: f64,
    pub usage_l: f64,
    pub opening_level_l: f64,
}

/// Totals over the whole simulated run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualSummary {
    pub collection_l: f64,
    pub tanker_delivered_l: f64,
    pub usage_l: f64,
}

/// Groups the daily ledger by calendar month, in simulation order.
pub fn monthly(
    ledger: &DailyBalanceLedger,
) -> Result<Vec<MonthlyRollup>, EmptyLedgerError> {
    if ledger.is_empty() {
        return Err(EmptyLedgerError);
    }
    let mut rollups = Vec::<MonthlyRollup>::new();
    for record in ledger.records.iter() {
        let year = record.date.year();
        let month = record.date.month();
        let same_month = rollups
            .last()
            .map(|r| r.year == year && r.month == month)
            .unwrap_or(false);
        if !same_month {
            rollups.push(MonthlyRollup {
                year,
                month,
                collection_l: 0.0,
                tanker_delivered_l: 0.0,
                usage_l: 0.0,
                opening_level_l: record.opening_level_l,
            });
        }
        let rollup = rollups.last_mut().unwrap();
        rollup.collection_l += record.actual_collection_l;
        rollup.tanker_delivered_l += record.tanker_delivered_l;
        rollup.usage_l += record.usage_l;
    }
    Ok(rollups)
}

/// Sums the whole run into a single summary.
pub fn annual(
    ledger: &DailyBalanceLedger,
) -> Result<AnnualSummary, EmptyLedgerError> {
    if ledger.is_empty() {
        return Err(EmptyLedgerError);
    }
    Ok(AnnualSummary {
        collection_l: ledger.total_collection_l(),
        tanker_delivered_l: ledger.total_tanker_l(),
        usage_l: ledger.total_usage_l(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;
    use crate::rainfall::{RainfallObservation, ResolvedDailySeries};
    use crate::simulator::simulate;
    use chrono::NaiveDate;

    fn ledger_for_january_and_february() -> DailyBalanceLedger {
        let first = NaiveDate::from_ymd_opt(2005, 1, 1).unwrap();
        let days: Vec<RainfallObservation> = (0..60)
            .map(|i| {
                RainfallObservation::new(
                    first + chrono::Days::new(i),
                    ((i % 7) * 2) as f64,
                )
            })
            .collect();
        let series = ResolvedDailySeries::new(days);
        simulate(&series, &ScenarioConfig::default()).unwrap()
    }

    #[test]
    fn test_monthly_groups_by_calendar_month() {
        let ledger = ledger_for_january_and_february();
        let rollups = monthly(&ledger).unwrap();
        assert_eq!(rollups.len(), 3);
        assert_eq!((rollups[0].year, rollups[0].month), (2005, 1));
        assert_eq!((rollups[1].year, rollups[1].month), (2005, 2));
        assert_eq!((rollups[2].year, rollups[2].month), (2005, 3));
    }

    #[test]
    fn test_monthly_sums_match_daily_records() {
        let ledger = ledger_for_january_and_february();
        let rollups = monthly(&ledger).unwrap();
        let january: Vec<_> = ledger
            .records
            .iter()
            .filter(|r| r.date.month() == 1)
            .collect();
        let collection: f64 =
            january.iter().map(|r| r.actual_collection_l).sum();
        let tanker: f64 =
            january.iter().map(|r| r.tanker_delivered_l).sum();
        let usage: f64 = january.iter().map(|r| r.usage_l).sum();
        assert_eq!(rollups[0].collection_l, collection);
        assert_eq!(rollups[0].tanker_delivered_l, tanker);
        assert_eq!(rollups[0].usage_l, usage);
        assert_eq!(rollups[0].usage_l, 31.0 * 500.0);
    }

    #[test]
    fn test_monthly_keeps_first_day_opening_level() {
        let ledger = ledger_for_january_and_february();
        let rollups = monthly(&ledger).unwrap();
        assert_eq!(rollups[0].opening_level_l, 5000.0);
        let first_of_february = ledger
            .records
            .iter()
            .find(|r| r.date.month() == 2)
            .unwrap();
        assert_eq!(
            rollups[1].opening_level_l,
            first_of_february.opening_level_l
        );
    }

    #[test]
    fn test_annual_sums_whole_run() {
        let ledger = ledger_for_january_and_february();
        let summary = annual(&ledger).unwrap();
        assert_eq!(summary.collection_l, ledger.total_collection_l());
        assert_eq!(summary.tanker_delivered_l, ledger.total_tanker_l());
        assert_eq!(summary.usage_l, 60.0 * 500.0);
    }

    #[test]
    fn test_empty_ledger_is_rejected() {
        let ledger = DailyBalanceLedger::new(vec![]);
        assert_eq!(monthly(&ledger), Err(EmptyLedgerError));
        assert_eq!(annual(&ledger), Err(EmptyLedgerError));
    }
}

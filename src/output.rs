use crate::rollup::{AnnualSummary, MonthlyRollup};
use crate::simulator::DailyBalanceLedger;

use csv::Writer;
use serde;
use std::error::Error;

#[derive(serde::Serialize)]
struct DailyBalanceOutput {
    date: String,
    rainfall_mm: f64,
    opening_level_l: f64,
    usage_l: f64,
    potential_collection_l: f64,
    actual_collection_l: f64,
    overflow_l: f64,
    tanker_delivered_l: f64,
    closing_level_l: f64,
}

fn write_daily_balance(
    ledger: &DailyBalanceLedger,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    let mut wtr =
        Writer::from_path(&(path.to_owned() + "/daily_balance.csv"))?;
    for record in ledger.records.iter() {
        wtr.serialize(DailyBalanceOutput {
            date: record.date.to_string(),
            rainfall_mm: record.rainfall_mm,
            opening_level_l: record.opening_level_l,
            usage_l: record.usage_l,
            potential_collection_l: record.potential_collection_l,
            actual_collection_l: record.actual_collection_l,
            overflow_l: record.overflow_l,
            tanker_delivered_l: record.tanker_delivered_l,
            closing_level_l: record.closing_level_l,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(serde::Serialize)]
struct MonthlyRollupOutput {
    year: i32,
    month: u32,
    collection_l: f64,
    tanker_delivered_l: f64,
    usage_l: f64,
    opening_level_l: f64,
}

fn write_monthly_rollup(
    rollups: &[MonthlyRollup],
    path: &str,
) -> Result<(), Box<dyn Error>> {
    let mut wtr =
        Writer::from_path(&(path.to_owned() + "/monthly_rollup.csv"))?;
    for rollup in rollups.iter() {
        wtr.serialize(MonthlyRollupOutput {
            year: rollup.year,
            month: rollup.month,
            collection_l: rollup.collection_l,
            tanker_delivered_l: rollup.tanker_delivered_l,
            usage_l: rollup.usage_l,
            opening_level_l: rollup.opening_level_l,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(serde::Serialize)]
struct AnnualSummaryOutput {
    collection_l: f64,
    tanker_delivered_l: f64,
    usage_l: f64,
}

fn write_annual_summary(
    summary: &AnnualSummary,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    let mut wtr =
        Writer::from_path(&(path.to_owned() + "/annual_summary.csv"))?;
    wtr.serialize(AnnualSummaryOutput {
        collection_l: summary.collection_l,
        tanker_delivered_l: summary.tanker_delivered_l,
        usage_l: summary.usage_l,
    })?;
    wtr.flush()?;
    Ok(())
}

pub fn generate_outputs(
    ledger: &DailyBalanceLedger,
    monthly: &[MonthlyRollup],
    annual: &AnnualSummary,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    write_daily_balance(ledger, path)?;
    write_monthly_rollup(monthly, path)?;
    write_annual_summary(annual, path)?;
    Ok(())
}

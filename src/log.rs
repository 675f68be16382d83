use crate::config::ScenarioConfig;
use crate::rollup::AnnualSummary;
use crate::simulator::DailyBalanceLedger;
use std::time::Duration;

pub fn show_greeting() {
    println!("# raintank {}", env!("CARGO_PKG_VERSION"));
}

pub fn input_reading_line(path: &str) {
    println!("\nReading inputs from: {path}");
}

/// Helper function for displaying the scenario criteria before the run
pub fn scenario_greeting(config: &ScenarioConfig) {
    println!("\n# Scenario");
    println!("- Location: {}", config.location);
    println!("- Roof size (m2): {}", config.roof_size_m2);
    println!("- Tank capacity (l): {}", config.tank_capacity_l);
    println!("- Daily usage (l): {}", config.daily_usage_l);
    println!("- Roof efficiency (%): {}", config.roof_efficiency_pct);
    println!(
        "- Initial water level (%): {}",
        config.initial_water_level_pct
    );
    println!("- Tank reorder level (%): {}", config.tank_reorder_pct);
    println!("- Tanker refill unit (l): {}", config.tanker_refill_unit_l);
    println!(
        "- Aggregation: {:?} over {}-{}",
        config.aggregation_mode, config.begin_year, config.end_year
    );
}

/// Helper function for displaying the run totals after the simulation
pub fn simulation_stats(
    ledger: &DailyBalanceLedger,
    summary: &AnnualSummary,
) {
    println!("\n# Results");
    println!("- Days simulated: {}", ledger.len());
    println!("- Rainfall collected (l): {}", summary.collection_l);
    println!("- Tanker delivered (l): {}", summary.tanker_delivered_l);
    println!("- Water used (l): {}", summary.usage_l);
    println!("- Overflowed (l): {}", ledger.total_overflow_l());
    println!("- Days with an empty tank: {}", ledger.deficit_days());
}

pub fn output_generation_line(path: &str) {
    println!("\nWriting outputs to: {path}");
}

pub fn show_farewell(time: Duration) {
    println!("\nTotal time: {:.2} s", time.as_millis() as f64 / 1000.0)
}

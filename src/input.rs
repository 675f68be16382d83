use crate::config::{AggregationMode, InvalidConfigError, ScenarioConfig};
use crate::rainfall::RainfallObservation;
use chrono::NaiveDate;
use serde::Deserialize;
use std::error::Error;
use std::fs;

/// Raw scenario criteria as they appear in the input file, before
/// validation.
#[derive(Deserialize)]
pub struct ScenarioInput {
    pub location: String,
    pub roof_size_m2: f64,
    pub tank_capacity_l: f64,
    pub daily_usage_l: f64,
    pub roof_efficiency_pct: f64,
    pub initial_water_level_pct: f64,
    pub tank_reorder_pct: f64,
    pub tanker_refill_unit_l: f64,
    pub aggregation_method: String,
    pub begin_year: i32,
    pub end_year: i32,
}

pub fn read_scenario_input(
    filepath: &str,
) -> Result<ScenarioInput, Box<dyn Error>> {
    let contents = fs::read_to_string(filepath)?;
    let parsed: ScenarioInput = serde_json::from_str(&contents)?;
    Ok(parsed)
}

impl ScenarioInput {
    pub fn build_scenario_config(
        &self,
    ) -> Result<ScenarioConfig, InvalidConfigError> {
        let aggregation_mode =
            AggregationMode::from_name(&self.aggregation_method).ok_or(
                InvalidConfigError::UnknownAggregationMode(
                    self.aggregation_method.clone(),
                ),
            )?;
        ScenarioConfig::new(
            self.location.clone(),
            self.roof_size_m2,
            self.tank_capacity_l,
            self.daily_usage_l,
            self.roof_efficiency_pct,
            self.initial_water_level_pct,
            self.tank_reorder_pct,
            self.tanker_refill_unit_l,
            aggregation_mode,
            self.begin_year,
            self.end_year,
        )
    }
}

#[derive(Deserialize)]
struct RainfallRecord {
    date: String,
    rainfall: f64,
}

/// Reads the historical rainfall record: one `date,rainfall` row per
/// observed day, dates as `YYYY/MM/DD`. The series is sorted by date
/// after loading so the core can rely on date order.
pub fn read_rainfall_input(
    filepath: &str,
) -> Result<Vec<RainfallObservation>, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_path(filepath)?;
    let mut observations = Vec::<RainfallObservation>::new();
    for result in rdr.deserialize() {
        let record: RainfallRecord = result?;
        let date = NaiveDate::parse_from_str(&record.date, "%Y/%m/%d")?;
        if record.rainfall < 0.0 {
            return Err(format!(
                "negative rainfall {} on {}",
                record.rainfall, record.date
            )
            .into());
        }
        observations.push(RainfallObservation::new(date, record.rainfall));
    }
    observations.sort_by_key(|o| o.date);
    Ok(observations)
}

pub struct Input {
    pub scenario: ScenarioInput,
    pub rainfall: Vec<RainfallObservation>,
}

impl Input {
    pub fn build(path: &str) -> Result<Self, Box<dyn Error>> {
        let scenario =
            read_scenario_input(&(path.to_owned() + "/scenario.json"))?;
        let rainfall =
            read_rainfall_input(&(path.to_owned() + "/rainfall.csv"))?;
        Ok(Self { scenario, rainfall })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_scenario() {
        let filepath = "example/scenario.json";
        let scenario = read_scenario_input(filepath).unwrap();
        assert_eq!(scenario.location, "Kathmandu, Nepal");
        assert_eq!(scenario.roof_size_m2, 100.0);
        assert_eq!(scenario.tank_capacity_l, 10000.0);
        assert_eq!(scenario.aggregation_method, "average");
        assert_eq!(scenario.begin_year, 2004);
        assert_eq!(scenario.end_year, 2005);
    }

    #[test]
    fn test_build_scenario_config() {
        let filepath = "example/scenario.json";
        let scenario = read_scenario_input(filepath).unwrap();
        let config = scenario.build_scenario_config().unwrap();
        assert_eq!(config.aggregation_mode, AggregationMode::Average);
        assert_eq!(config.daily_usage_l, 500.0);
    }

    #[test]
    fn test_build_scenario_config_unknown_mode() {
        let filepath = "example/scenario.json";
        let mut scenario = read_scenario_input(filepath).unwrap();
        scenario.aggregation_method = "lots_of_others".to_string();
        assert_eq!(
            scenario.build_scenario_config(),
            Err(InvalidConfigError::UnknownAggregationMode(
                "lots_of_others".to_string()
            ))
        );
    }

    #[test]
    fn test_read_rainfall() {
        let filepath = "example/rainfall.csv";
        let rainfall = read_rainfall_input(filepath).unwrap();
        // 2004 and 2005, including the 2004 leap day
        assert_eq!(rainfall.len(), 731);
        assert_eq!(
            rainfall.first().unwrap().date,
            NaiveDate::from_ymd_opt(2004, 1, 1).unwrap()
        );
        for pair in rainfall.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn test_read_input() {
        let path = "example";
        let input = Input::build(path).unwrap();
        assert_eq!(input.scenario.begin_year, 2004);
        assert_eq!(input.rainfall.len(), 731);
    }
}

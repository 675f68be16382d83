use std::error::Error;
use std::fmt::{Display, Formatter};

/// How the raw multi-year rainfall record is turned into the single
/// year of daily values fed to the simulator. Dispatch on this enum is
/// exhaustive, so adding a mode is a compile-time-checked extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationMode {
    OneYear,
    Average,
    WorstDay,
    BestDay,
}

impl AggregationMode {
    /// Maps the aggregation method name used in the scenario input
    /// file to the closed enum.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "one_year" => Some(Self::OneYear),
            "average" => Some(Self::Average),
            "worst_day" => Some(Self::WorstDay),
            "best_day" => Some(Self::BestDay),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvalidConfigError {
    NonPositive { field: &'static str, value: f64 },
    Negative { field: &'static str, value: f64 },
    PercentOutOfRange { field: &'static str, value: f64 },
    YearRangeInverted { begin_year: i32, end_year: i32 },
    UnknownAggregationMode(String),
}

impl Display for InvalidConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{} must be positive, got {}", field, value)
            }
            Self::Negative { field, value } => {
                write!(f, "{} must not be negative, got {}", field, value)
            }
            Self::PercentOutOfRange { field, value } => {
                write!(f, "{} must be in [0, 100], got {}", field, value)
            }
            Self::YearRangeInverted {
                begin_year,
                end_year,
            } => {
                write!(
                    f,
                    "begin_year {} is after end_year {}",
                    begin_year, end_year
                )
            }
            Self::UnknownAggregationMode(name) => {
                write!(f, "aggregation method {} not supported", name)
            }
        }
    }
}

impl Error for InvalidConfigError {}

/// The validated parameter set for one scenario evaluation. Built once
/// per request and immutable for the duration of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub location: String,
    pub roof_size_m2: f64,
    pub tank_capacity_l: f64,
    pub daily_usage_l: f64,
    pub roof_efficiency_pct: f64,
    pub initial_water_level_pct: f64,
    pub tank_reorder_pct: f64,
    pub tanker_refill_unit_l: f64,
    pub aggregation_mode: AggregationMode,
    pub begin_year: i32,
    pub end_year: i32,
}

fn validate_positive(
    field: &'static str,
    value: f64,
) -> Result<(), InvalidConfigError> {
    if value <= 0.0 {
        return Err(InvalidConfigError::NonPositive { field, value });
    }
    Ok(())
}

fn validate_non_negative(
    field: &'static str,
    value: f64,
) -> Result<(), InvalidConfigError> {
    if value < 0.0 {
        return Err(InvalidConfigError::Negative { field, value });
    }
    Ok(())
}

fn validate_percent(
    field: &'static str,
    value: f64,
) -> Result<(), InvalidConfigError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(InvalidConfigError::PercentOutOfRange { field, value });
    }
    Ok(())
}

impl ScenarioConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        location: String,
        roof_size_m2: f64,
        tank_capacity_l: f64,
        daily_usage_l: f64,
        roof_efficiency_pct: f64,
        initial_water_level_pct: f64,
        tank_reorder_pct: f64,
        tanker_refill_unit_l: f64,
        aggregation_mode: AggregationMode,
        begin_year: i32,
        end_year: i32,
    ) -> Result<Self, InvalidConfigError> {
        let config = Self {
            location,
            roof_size_m2,
            tank_capacity_l,
            daily_usage_l,
            roof_efficiency_pct,
            initial_water_level_pct,
            tank_reorder_pct,
            tanker_refill_unit_l,
            aggregation_mode,
            begin_year,
            end_year,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every field against its allowed range. Called eagerly on
    /// construction and again by the simulator, so a run fails before
    /// any simulation work begins.
    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        validate_positive("roof_size_m2", self.roof_size_m2)?;
        validate_positive("tank_capacity_l", self.tank_capacity_l)?;
        validate_positive("tanker_refill_unit_l", self.tanker_refill_unit_l)?;
        validate_non_negative("daily_usage_l", self.daily_usage_l)?;
        validate_percent("roof_efficiency_pct", self.roof_efficiency_pct)?;
        validate_percent(
            "initial_water_level_pct",
            self.initial_water_level_pct,
        )?;
        validate_percent("tank_reorder_pct", self.tank_reorder_pct)?;
        if self.begin_year > self.end_year {
            return Err(InvalidConfigError::YearRangeInverted {
                begin_year: self.begin_year,
                end_year: self.end_year,
            });
        }
        Ok(())
    }

    /// The tank level, in liters, below which a tanker delivery is
    /// triggered.
    pub fn reorder_threshold_l(&self) -> f64 {
        self.tank_capacity_l * self.tank_reorder_pct / 100.0
    }

    pub fn default() -> Self {
        Self {
            location: "Kathmandu, Nepal".to_string(),
            roof_size_m2: 100.0,
            tank_capacity_l: 10000.0,
            daily_usage_l: 500.0,
            roof_efficiency_pct: 80.0,
            initial_water_level_pct: 50.0,
            tank_reorder_pct: 30.0,
            tanker_refill_unit_l: 6000.0,
            aggregation_mode: AggregationMode::Average,
            begin_year: 2004,
            end_year: 2013,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_default_config() {
        let config = ScenarioConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.reorder_threshold_l(), 3000.0);
    }

    #[test]
    fn test_mode_from_name() {
        assert_eq!(
            AggregationMode::from_name("one_year"),
            Some(AggregationMode::OneYear)
        );
        assert_eq!(
            AggregationMode::from_name("average"),
            Some(AggregationMode::Average)
        );
        assert_eq!(
            AggregationMode::from_name("worst_day"),
            Some(AggregationMode::WorstDay)
        );
        assert_eq!(
            AggregationMode::from_name("best_day"),
            Some(AggregationMode::BestDay)
        );
        assert_eq!(AggregationMode::from_name("lots_of_others"), None);
    }

    #[test]
    fn test_validate_rejects_out_of_range_percent() {
        let mut config = ScenarioConfig::default();
        config.roof_efficiency_pct = 120.0;
        assert_eq!(
            config.validate(),
            Err(InvalidConfigError::PercentOutOfRange {
                field: "roof_efficiency_pct",
                value: 120.0
            })
        );
    }

    #[test]
    fn test_validate_rejects_non_positive_capacity() {
        let mut config = ScenarioConfig::default();
        config.tank_capacity_l = 0.0;
        assert_eq!(
            config.validate(),
            Err(InvalidConfigError::NonPositive {
                field: "tank_capacity_l",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_validate_rejects_negative_usage() {
        let mut config = ScenarioConfig::default();
        config.daily_usage_l = -1.0;
        assert_eq!(
            config.validate(),
            Err(InvalidConfigError::Negative {
                field: "daily_usage_l",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_validate_rejects_inverted_year_range() {
        let mut config = ScenarioConfig::default();
        config.begin_year = 2013;
        config.end_year = 2004;
        assert_eq!(
            config.validate(),
            Err(InvalidConfigError::YearRangeInverted {
                begin_year: 2013,
                end_year: 2004
            })
        );
    }

    #[test]
    fn test_zero_usage_is_valid() {
        let mut config = ScenarioConfig::default();
        config.daily_usage_l = 0.0;
        assert!(config.validate().is_ok());
    }
}

use chrono::NaiveDate;

/// A single observed day of rainfall, in millimeters. The source
/// series is produced by the loader already de-duplicated and sorted
/// by date, and may span multiple years.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainfallObservation {
    pub date: NaiveDate,
    pub rainfall_mm: f64,
}

impl RainfallObservation {
    pub fn new(date: NaiveDate, rainfall_mm: f64) -> Self {
        Self { date, rainfall_mm }
    }
}

/// The exact ordered daily series the simulator consumes, selected
/// and transformed from the raw multi-year record by the resolver.
/// Dates are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDailySeries {
    pub days: Vec<RainfallObservation>,
}

impl ResolvedDailySeries {
    pub fn new(days: Vec<RainfallObservation>) -> Self {
        Self { days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_observation() {
        let date = NaiveDate::from_ymd_opt(2004, 1, 1).unwrap();
        let obs = RainfallObservation::new(date, 2.5);
        assert_eq!(obs.date, date);
        assert_eq!(obs.rainfall_mm, 2.5);
    }

    #[test]
    fn test_resolved_series_len() {
        let date = NaiveDate::from_ymd_opt(2004, 1, 1).unwrap();
        let series =
            ResolvedDailySeries::new(vec![RainfallObservation::new(
                date, 0.0,
            )]);
        assert_eq!(series.len(), 1);
        assert!(!series.is_empty());
    }
}

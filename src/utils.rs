/// Helper function for rounding a computed volume (or rainfall depth)
/// to the nearest whole unit. Every field stored in the daily ledger
/// goes through this rounding before being carried into the next day,
/// so rounding error accumulates across the run on purpose.
///
/// ## Example
///
/// ```
/// let rounded = raintank_rs::utils::round_to_unit(4499.5);
/// assert_eq!(rounded, 4500.0);
/// ```
pub fn round_to_unit(value: f64) -> f64 {
    value.round()
}

/// Helper function for evaluating the arithmetic mean of a slice.
/// The slice is expected to be non-empty.
///
/// ## Example
///
/// ```
/// let values = vec![1.0, 2.0, 3.0];
///
/// let mean = raintank_rs::utils::mean(&values);
/// assert_eq!(mean, 2.0);
/// ```
pub fn mean(values: &[f64]) -> f64 {
    assert!(!values.is_empty());
    let mut total = 0.0;
    for v in values.iter() {
        total += v;
    }
    total / (values.len() as f64)
}

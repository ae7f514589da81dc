// Order-statistic selection and the median error type.

use thiserror::Error;

/// Errors produced while reading records or selecting the median.
#[derive(Debug, Error)]
pub enum MedianError {
    /// The first line did not hold a non-negative record count.
    #[error("invalid count: '{0}'")]
    InvalidCount(String),
    /// Zero records were declared, so there is no middle element.
    #[error("empty input: no records to take a median of")]
    EmptyInput,
    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Sort values ascending in place.
///
/// Equal values are indistinguishable, so an unstable sort is sufficient.
pub fn sort_values(values: &mut [u64]) {
    values.sort_unstable();
}

/// Sort `values` and return the element at index `len / 2`.
///
/// For an even number of values this is the larger of the two central
/// elements (the upper median). An empty slice is an error.
///
/// ```
/// use medjudge::median::upper_median;
///
/// assert_eq!(upper_median(&mut [3, 1, 4, 1, 5]).unwrap(), 3);
/// assert_eq!(upper_median(&mut [10, 20, 30, 40]).unwrap(), 30);
/// ```
pub fn upper_median(values: &mut [u64]) -> Result<u64, MedianError> {
    if values.is_empty() {
        return Err(MedianError::EmptyInput);
    }
    sort_values(values);
    Ok(values[values.len() / 2])
}

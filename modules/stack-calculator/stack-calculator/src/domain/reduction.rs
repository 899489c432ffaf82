//! Reductions over a finite sequence of `i32` values.
//!
//! Pure functions with no shared state. `gcd` and `lcm` work on absolute
//! values and compute in a wider unsigned domain; a result that does not fit
//! in `i32` is reported as [`ReductionError::ResultOverflow`].

use stack_calculator_sdk::ReduceOperator;

/// Failures of the reduction functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReductionError {
    #[error("cannot reduce an empty sequence")]
    EmptyInput,

    #[error("result does not fit in a 32-bit signed integer")]
    ResultOverflow,
}

const I32_MAX: u64 = 2_147_483_647;

/// Apply `operator` to `values`.
///
/// # Errors
/// [`ReductionError::EmptyInput`] if `values` is empty,
/// [`ReductionError::ResultOverflow`] if the result does not fit in `i32`.
pub fn apply(operator: ReduceOperator, values: &[i32]) -> Result<i32, ReductionError> {
    match operator {
        ReduceOperator::Min => min(values),
        ReduceOperator::Max => max(values),
        ReduceOperator::Gcd => gcd(values),
        ReduceOperator::Lcm => lcm(values),
    }
}

/// Smallest value.
///
/// # Errors
/// [`ReductionError::EmptyInput`] if `values` is empty.
pub fn min(values: &[i32]) -> Result<i32, ReductionError> {
    values
        .iter()
        .copied()
        .min()
        .ok_or(ReductionError::EmptyInput)
}

/// Largest value.
///
/// # Errors
/// [`ReductionError::EmptyInput`] if `values` is empty.
pub fn max(values: &[i32]) -> Result<i32, ReductionError> {
    values
        .iter()
        .copied()
        .max()
        .ok_or(ReductionError::EmptyInput)
}

/// Greatest common divisor of the absolute values, folded left to right.
///
/// Always non-negative; `gcd(a, 0) = |a|`.
///
/// # Errors
/// [`ReductionError::EmptyInput`] if `values` is empty,
/// [`ReductionError::ResultOverflow`] if the result is `2^31` (only
/// possible when every value is `i32::MIN` or zero).
pub fn gcd(values: &[i32]) -> Result<i32, ReductionError> {
    let (first, rest) = values.split_first().ok_or(ReductionError::EmptyInput)?;
    let result = rest.iter().fold(u64::from(first.unsigned_abs()), |acc, v| {
        euclid(acc, u64::from(v.unsigned_abs()))
    });
    narrow(result)
}

/// Least common multiple of the absolute values.
///
/// Any zero operand makes the whole result zero. Otherwise computed pairwise
/// as `|a * b| / gcd(a, b)` in 64-bit arithmetic.
///
/// # Errors
/// [`ReductionError::EmptyInput`] if `values` is empty,
/// [`ReductionError::ResultOverflow`] if the result exceeds `i32::MAX`.
pub fn lcm(values: &[i32]) -> Result<i32, ReductionError> {
    let (first, rest) = values.split_first().ok_or(ReductionError::EmptyInput)?;
    if values.contains(&0) {
        return Ok(0);
    }

    // The running value never decreases, so the first step past i32::MAX
    // already decides the outcome.
    let mut acc = checked(u64::from(first.unsigned_abs()))?;
    for v in rest {
        let v = u64::from(v.unsigned_abs());
        acc = checked(acc.div_euclid(euclid(acc, v)) * v)?;
    }
    narrow(acc)
}

fn euclid(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn checked(value: u64) -> Result<u64, ReductionError> {
    if value > I32_MAX {
        return Err(ReductionError::ResultOverflow);
    }
    Ok(value)
}

fn narrow(value: u64) -> Result<i32, ReductionError> {
    i32::try_from(value).map_err(|_| ReductionError::ResultOverflow)
}

//! Bit-manipulation helpers for the progress scale
//!
//! Power-of-two rounding lets the estimator replace per-item division with
//! shifts and masks on the hot path.

/// Round a value up to the nearest power of two.
///
/// Zero rounds to 1, so downstream mask arithmetic always operates on a
/// genuine power of two. Values above `2^63` saturate to `2^63`, the largest
/// power of two representable in a `u64`.
pub fn nearest_power_of_two(value: u64) -> u64 {
    value.checked_next_power_of_two().unwrap_or(1 << 63)
}

/// Exponent of a power-of-two scale factor.
///
/// A factor of 0 means "no relationship scaling" and maps to shift 0, the
/// same shift a factor of 1 produces.
pub fn power_of_two_shift(factor: u64) -> u32 {
    if factor == 0 {
        0
    } else {
        factor.trailing_zeros()
    }
}

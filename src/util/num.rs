/// Default relative tolerance used for equality comparisons.
pub const REL_TOLERANCE: f64 = 1e-10;
/// Default absolute tolerance used for equality comparisons.
pub const ABS_TOLERANCE: f64 = 1e-12;

/// Number of decimals kept when a number is displayed.
const DISPLAY_DECIMALS: i32 = 10;

/// Checks whether two numbers are equal within the given tolerances.
///
/// The absolute difference is compared to the larger of `abs_tol` and
/// `rel_tol` times the larger magnitude of the two operands.
///
/// ## Example
/// ```
/// use linecalc::util::num::{ABS_TOLERANCE, REL_TOLERANCE, is_close};
///
/// assert!(is_close(0.1 + 0.2, 0.3, ABS_TOLERANCE, REL_TOLERANCE));
/// assert!(!is_close(1.0, 1.001, ABS_TOLERANCE, REL_TOLERANCE));
/// ```
#[must_use]
pub fn is_close(left: f64, right: f64, abs_tol: f64, rel_tol: f64) -> bool {
    let difference = (left - right).abs();
    let max_norm = left.abs().max(right.abs());
    difference <= abs_tol.max(rel_tol * max_norm)
}

/// Rounds a number to the precision used for display.
///
/// Very large magnitudes are returned unchanged, and negative zero becomes
/// zero.
///
/// ## Example
/// ```
/// use linecalc::util::num::round_for_display;
///
/// assert_eq!(round_for_display(0.1 + 0.2), 0.3);
/// assert_eq!(round_for_display(-0.0).to_string(), "0");
/// ```
#[must_use]
pub fn round_for_display(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= 1e15 {
        return value;
    }

    let scale = 10f64.powi(DISPLAY_DECIMALS);
    let rounded = (value * scale).round() / scale;

    if rounded == 0.0 { 0.0 } else { rounded }
}

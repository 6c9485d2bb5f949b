/// Numeric helpers.
///
/// This module provides the tolerance-based comparison used for equality of
/// computed numbers and the rounding applied before numbers are displayed.
pub mod num;
/// Culture-aware formatting of values for display.
pub mod format;

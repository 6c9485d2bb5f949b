/// Unit support.
///
/// Defines the static table of measurement units, grouped by dimension, and
/// the conversions between a unit and the base unit of its dimension.
pub mod unit;

pub mod core;

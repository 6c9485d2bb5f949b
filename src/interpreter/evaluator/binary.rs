/// Arithmetic operators (`+`, `-`, `*`, `/`, `^`) on numbers, units and
/// percentages.
pub mod arithmetic;
/// Relational operators (`==`, `!=`, `<`, `<=`, `>`, `>=`).
pub mod comparison;

/// The physical quantity a unit measures.
///
/// Two units can only be added, subtracted, compared or converted into each
/// other when they share a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Base unit: metre.
    Length,
    /// Base unit: gram.
    Mass,
    /// Base unit: second.
    Duration,
    /// Base unit: byte.
    Data,
}

/// A measurement unit.
#[derive(Debug, PartialEq)]
pub struct Unit {
    /// The symbol used when displaying a value, such as `km`.
    pub symbol:    &'static str,
    /// Every spelling accepted after a number, including the symbol.
    pub aliases:   &'static [&'static str],
    /// What the unit measures.
    pub dimension: Dimension,
    /// How many base units one of this unit is worth.
    pub factor:    f64,
}

macro_rules! unit {
    ($symbol:literal, $dimension:ident, $factor:expr, [$($alias:literal),*]) => {
        Unit { symbol:    $symbol,
               aliases:   &[$symbol, $($alias),*],
               dimension: Dimension::$dimension,
               factor:    $factor, }
    };
}

/// Every unit the arithmetic grammar recognizes.
pub static UNITS: &[Unit] =
    &[unit!("mm", Length, 0.001, ["millimeter", "millimeters", "millimetre", "millimetres"]),
      unit!("cm", Length, 0.01, ["centimeter", "centimeters", "centimetre", "centimetres"]),
      unit!("m", Length, 1.0, ["meter", "meters", "metre", "metres"]),
      unit!("km", Length, 1000.0, ["kilometer", "kilometers", "kilometre", "kilometres"]),
      unit!("inch", Length, 0.0254, ["inches"]),
      unit!("ft", Length, 0.3048, ["foot", "feet"]),
      unit!("yd", Length, 0.9144, ["yard", "yards"]),
      unit!("mi", Length, 1609.344, ["mile", "miles"]),
      unit!("mg", Mass, 0.001, ["milligram", "milligrams"]),
      unit!("g", Mass, 1.0, ["gram", "grams"]),
      unit!("kg", Mass, 1000.0, ["kilogram", "kilograms"]),
      unit!("t", Mass, 1_000_000.0, ["tonne", "tonnes"]),
      unit!("oz", Mass, 28.349_523_125, ["ounce", "ounces"]),
      unit!("lb", Mass, 453.592_37, ["lbs", "pound", "pounds"]),
      unit!("ms", Duration, 0.001, ["millisecond", "milliseconds"]),
      unit!("s", Duration, 1.0, ["sec", "secs", "second", "seconds"]),
      unit!("min", Duration, 60.0, ["mins", "minute", "minutes"]),
      unit!("h", Duration, 3600.0, ["hr", "hrs", "hour", "hours"]),
      unit!("day", Duration, 86_400.0, ["days"]),
      unit!("week", Duration, 604_800.0, ["weeks"]),
      unit!("B", Data, 1.0, ["byte", "bytes"]),
      unit!("KB", Data, 1e3, ["kilobyte", "kilobytes"]),
      unit!("MB", Data, 1e6, ["megabyte", "megabytes"]),
      unit!("GB", Data, 1e9, ["gigabyte", "gigabytes"]),
      unit!("TB", Data, 1e12, ["terabyte", "terabytes"])];

impl Unit {
    /// Finds the unit spelled by `word`.
    ///
    /// Symbols of one or two characters are case-sensitive (`m` is not `M`);
    /// longer spellings match regardless of case.
    ///
    /// # Example
    /// ```
    /// use linecalc::interpreter::value::unit::{Dimension, Unit};
    ///
    /// let unit = Unit::lookup("Kilometers").unwrap();
    /// assert_eq!(unit.symbol, "km");
    /// assert_eq!(unit.dimension, Dimension::Length);
    ///
    /// assert!(Unit::lookup("M").is_none());
    /// ```
    #[must_use]
    pub fn lookup(word: &str) -> Option<&'static Self> {
        UNITS.iter().find(|unit| {
                        unit.aliases.iter().any(|alias| {
                                               *alias == word
                                               || (alias.len() > 2
                                                   && alias.eq_ignore_ascii_case(word))
                                           })
                    })
    }

    /// Converts a magnitude in this unit to the base unit of its dimension.
    #[must_use]
    pub fn to_base(&self, magnitude: f64) -> f64 {
        magnitude * self.factor
    }

    /// Converts a magnitude in the base unit of this unit's dimension to this
    /// unit.
    #[must_use]
    pub fn from_base(&self, magnitude: f64) -> f64 {
        magnitude / self.factor
    }
}

use crate::interpreter::{culture::Culture, value::core::Value};

/// Formats a value for display under a culture.
///
/// The text matches the value's `Display` output with `.` replaced by the
/// culture's decimal separator.
///
/// # Example
/// ```
/// use linecalc::{
///     interpreter::{culture::Culture, value::core::Value},
///     util::format::format_value,
/// };
///
/// let culture = Culture::lookup("de-DE").unwrap();
/// assert_eq!(format_value(&Value::from(2.5), culture), "2,5");
/// ```
#[must_use]
pub fn format_value(value: &Value, culture: &Culture) -> String {
    let text = value.to_string();

    match value {
        Value::Bool(b) => format_bool(*b, culture).to_string(),
        Value::Number(_) | Value::Percentage(_) if culture.decimal_separator != '.' => {
            text.replace('.', &culture.decimal_separator.to_string())
        },
        _ => text,
    }
}

/// The culture's spelling of a boolean.
fn format_bool(value: bool, culture: &Culture) -> &'static str {
    let spellings = if value {
        culture.keywords.true_words
    } else {
        culture.keywords.false_words
    };

    spellings.first()
             .copied()
             .unwrap_or(if value { "true" } else { "false" })
}

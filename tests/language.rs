use std::fs::{self};

use linecalc::{
    error::EvalError,
    evaluate,
    interpreter::{
        document::{Interpreter, LineOutcome},
        value::core::Value,
    },
    util::format::format_value,
};
use walkdir::WalkDir;

/// Renders every line the way the command line tool prints it.
fn render(locale: &str, document: &str) -> Vec<String> {
    let interpreter = Interpreter::new(locale).unwrap_or_else(|e| panic!("{e}"));

    interpreter.evaluate(document)
               .lines
               .into_iter()
               .map(|line| match line.outcome {
                   LineOutcome::NoResult => format!("{}:", line.line_number),
                   LineOutcome::Value { value, .. } => {
                       format!("{}: {}", line.line_number, format_value(&value, interpreter.culture()))
                   },
                   LineOutcome::Error { error, .. } => {
                       format!("{}: error: {error}", line.line_number)
                   },
               })
               .collect()
}

#[test]
fn document_fixtures_match_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/documents").into_iter()
                                       .filter_map(Result::ok)
                                       .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let locale = path.parent()
                         .and_then(|dir| dir.file_name())
                         .and_then(|name| name.to_str())
                         .unwrap_or_else(|| panic!("No locale directory for {path:?}"));
        let document =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("expected");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                             panic!("Failed to read {expected_path:?}: {e}")
                                                         });

        count += 1;
        let actual = render(locale, &document);
        let expected: Vec<&str> = expected.lines().collect();
        assert_eq!(actual, expected, "Fixture {path:?} does not match");
    }

    assert!(count > 0, "No fixtures found in tests/documents");
}

fn value_of(document: &str) -> Value {
    let evaluation = evaluate("en-US", document).unwrap();
    match &evaluation.lines[0].outcome {
        LineOutcome::Value { value, .. } => value.clone(),
        other => panic!("Expected a value for {document:?}, got {other:?}"),
    }
}

fn error_of(document: &str) -> EvalError {
    let evaluation = evaluate("en-US", document).unwrap();
    match &evaluation.lines[0].outcome {
        LineOutcome::Error { error, .. } => error.clone(),
        other => panic!("Expected an error for {document:?}, got {other:?}"),
    }
}

fn assert_displays(document: &str, expected: &str) {
    assert_eq!(value_of(document).to_string(), expected, "for {document:?}");
}

#[test]
fn arithmetic_precedence() {
    assert_displays("1 + 2 * 3", "7");
    assert_displays("(1 + 2) * 3", "9");
    assert_displays("2 ^ 3 ^ 2", "512");
    assert_displays("10 - 4 - 3", "3");
    assert_displays("-2 ^ 2", "4");
    assert_displays("8 / 2 / 2", "2");
    assert_displays("0.1 + 0.2", "0.3");
    assert_displays(".5 * 4", "2");
}

#[test]
fn numbers_with_group_separators() {
    assert_displays("1,234,567 + 1", "1234568");
    assert_displays("1,234.5", "1234.5");
}

#[test]
fn trailing_operator_is_left_alone() {
    assert_displays("5 +", "5");
    assert_displays("3 * (", "3");
}

#[test]
fn units_and_conversions() {
    assert_displays("5 km in m", "5000 m");
    assert_displays("1 km + 500 m", "1.5 km");
    assert_displays("2 hours to minutes", "120 min");
    assert_displays("3 kg * 2", "6 kg");
    assert_displays("1 GB / 500 MB", "2");
    assert_displays("10 + 5 m", "15 m");
    assert_eq!(error_of("5 kg + 3 m"),
               EvalError::IncompatibleUnits { left:  "kg".to_string(),
                                              right: "m".to_string(), });
    assert!(matches!(error_of("5 kg in m"), EvalError::IncompatibleUnits { .. }));
}

#[test]
fn percentages() {
    assert_displays("200 + 10%", "220");
    assert_displays("200 - 25%", "150");
    assert_displays("50% * 8", "4");
    assert_displays("15%", "15%");
    assert_displays("10% + 5%", "15%");
}

#[test]
fn evaluation_errors() {
    assert_eq!(error_of("10 / 0"), EvalError::DivisionByZero);
    assert_eq!(error_of("10 ^ 1000"), EvalError::Overflow);
    assert_eq!(error_of("if 5 then 1"), EvalError::ExpectedBoolean);
    assert_eq!(error_of("missing * 2"),
               EvalError::UndefinedVariable { name: "missing".to_string() });

    let evaluation = evaluate("en-US", "flag = true\nflag + 1").unwrap();
    assert!(matches!(evaluation.line(2),
                     Some(LineOutcome::Error { error: EvalError::ExpectedNumber, .. })));
}

#[test]
fn comparisons() {
    assert_eq!(value_of("5 < 10"), Value::Bool(true));
    assert_eq!(value_of("1 km == 1000 m"), Value::Bool(true));
    assert_eq!(value_of("0.1 + 0.2 == 0.3"), Value::Bool(true));
    assert_eq!(value_of("3 >= 4"), Value::Bool(false));
    assert_eq!(value_of("5 apples < 10"), Value::Bool(true));
    assert_eq!(value_of("2 != 2"), Value::Bool(false));
    assert!(matches!(error_of("1 kg < 1 m"), EvalError::IncompatibleUnits { .. }));
}

#[test]
fn boolean_comparisons() {
    assert_eq!(value_of("true == false"), Value::Bool(false));
    assert_eq!(value_of("false != true"), Value::Bool(true));
    assert_eq!(error_of("true < false"), EvalError::ExpectedNumber);

    let evaluation = evaluate("en-US", "flag = 1 > 2\nflag == false").unwrap();
    assert!(matches!(evaluation.line(2),
                     Some(LineOutcome::Value { value: Value::Bool(true), .. })));
}

#[test]
fn conditionals() {
    assert_eq!(value_of("if 1 < 2 then 10 else 20"), Value::from(10.0));
    assert_eq!(value_of("if 1 > 2 then 10 else 20"), Value::from(20.0));
    assert_eq!(value_of("if 1 > 2 then 10"), Value::Bool(false));
    assert_eq!(value_of("if true then if false then 1 else 2 else 3"), Value::from(2.0));
    // The branch not taken may fail without affecting the result.
    assert_eq!(value_of("if true then 1 else 1 / 0"), Value::from(1.0));
}

#[test]
fn variables_carry_over_lines() {
    let evaluation = evaluate("en-US", "x = 5\nx + 1\n").unwrap();
    assert_eq!(evaluation.line(2),
               Some(&LineOutcome::Value { span:  span_of("x = 5\nx + 1\n", "x + 1"),
                                          value: Value::from(6.0), }));
    assert_eq!(evaluation.variables.get("x"), Some(&Value::from(5.0)));

    let evaluation = evaluate("en-US", "x + 1\n").unwrap();
    assert!(matches!(evaluation.line(1),
                     Some(LineOutcome::Error { error: EvalError::UndefinedVariable { .. }, .. })));
}

#[test]
fn identifiers_may_contain_digits() {
    let evaluation = evaluate("en-US", "item2 = 30\nitem2 * 2").unwrap();

    assert!(matches!(evaluation.line(2),
                     Some(LineOutcome::Value { value, .. }) if *value == Value::from(60.0)));
    assert_eq!(evaluation.variables.get("item2"), Some(&Value::from(30.0)));
    assert!(!evaluation.variables.contains("item"));
}

#[test]
fn failed_assignment_keeps_previous_value() {
    let evaluation = evaluate("en-US", "x = 2\nx = 1 / 0\nx").unwrap();
    assert!(matches!(evaluation.line(2),
                     Some(LineOutcome::Error { error: EvalError::DivisionByZero, .. })));
    assert!(matches!(evaluation.line(3),
                     Some(LineOutcome::Value { value, .. }) if *value == Value::from(2.0)));
}

#[test]
fn prose_around_calculations() {
    let document = "Shopping list\nApples: 3 * 1.25 dollars\n";
    let evaluation = evaluate("en-US", document).unwrap();

    assert_eq!(evaluation.line(1), Some(&LineOutcome::NoResult));
    assert_eq!(evaluation.line(2),
               Some(&LineOutcome::Value { span:  span_of(document, "3 * 1.25"),
                                          value: Value::from(3.75), }));
    assert_eq!(evaluation.line(3), Some(&LineOutcome::NoResult));
}

#[test]
fn empty_document_has_one_line() {
    let evaluation = evaluate("en-US", "").unwrap();
    assert_eq!(evaluation.lines.len(), 1);
    assert_eq!(evaluation.line(1), Some(&LineOutcome::NoResult));
    assert!(!evaluation.cancelled);
}

#[test]
fn localized_documents() {
    let evaluation = evaluate("fr-FR", "1,5 km en m\nsi 2 > 1 alors vrai sinon faux").unwrap();
    assert!(matches!(evaluation.line(1),
                     Some(LineOutcome::Value { value, .. }) if value.to_string() == "1500 m"));
    assert!(matches!(evaluation.line(2),
                     Some(LineOutcome::Value { value: Value::Bool(true), .. })));

    let evaluation = evaluate("fr-FR", "1\u{202F}000 + 1\n1\u{00A0}000 + 1\n1 000").unwrap();
    for line in [1, 2] {
        assert!(matches!(evaluation.line(line),
                         Some(LineOutcome::Value { value, .. }) if *value == Value::from(1001.0)));
    }
    // A plain space does not group digits.
    assert!(matches!(evaluation.line(3),
                     Some(LineOutcome::Value { value, .. }) if *value == Value::from(1.0)));

    let evaluation = evaluate("de-DE", "1.000,25 * 2").unwrap();
    assert!(matches!(evaluation.line(1),
                     Some(LineOutcome::Value { value, .. }) if *value == Value::from(2000.5)));
}

#[test]
fn unknown_locale_is_rejected() {
    assert!(evaluate("tlh-KL", "1 + 1").is_err());
}

fn span_of(document: &str, needle: &str) -> linecalc::interpreter::registry::Span {
    let start = document.find(needle)
                        .unwrap_or_else(|| panic!("{needle:?} not in {document:?}"));
    linecalc::interpreter::registry::Span { start,
                                            end: start + needle.len() }
}

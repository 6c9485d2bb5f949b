use linecalc::interpreter::{
    culture::Culture,
    lexer::{Terminator, TokenType, tokenize, tokenize_culture},
};

fn types(locale: &str, line: &str) -> Vec<TokenType> {
    let lines = tokenize(locale, line).unwrap();
    lines[0].tokens().iter().map(|t| t.token_type()).collect()
}

fn texts(locale: &str, line: &str) -> Vec<String> {
    let lines = tokenize(locale, line).unwrap();
    lines[0].tokens().iter().map(|t| t.text().to_string()).collect()
}

#[test]
fn splits_addition_into_tokens() {
    let lines = tokenize("en-US", "5 + 3\n").unwrap();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].line_number(), 1);
    assert_eq!(lines[0].terminator(), Terminator::Lf);
    assert_eq!(texts("en-US", "5 + 3"), ["5", " ", "+", " ", "3"]);
    assert_eq!(types("en-US", "5 + 3"),
               [TokenType::Digit,
                TokenType::Whitespace,
                TokenType::AdditionOperator,
                TokenType::Whitespace,
                TokenType::Digit]);

    assert_eq!(lines[1].line_number(), 2);
    assert!(lines[1].tokens().is_empty());
    assert_eq!(lines[1].terminator(), Terminator::None);
}

#[test]
fn empty_document_yields_one_empty_line() {
    let lines = tokenize("en-US", "").unwrap();

    assert_eq!(lines.len(), 1);
    assert!(lines[0].is_empty());
    assert!(lines[0].tokens().is_empty());
}

#[test]
fn keeps_every_line_terminator() {
    let lines = tokenize("en-US", "a\r\nb\rc\nd").unwrap();

    let terminators: Vec<_> = lines.iter().map(|l| l.terminator()).collect();
    assert_eq!(terminators,
               [Terminator::CrLf, Terminator::Cr, Terminator::Lf, Terminator::None]);

    let starts: Vec<_> = lines.iter().map(|l| l.start()).collect();
    assert_eq!(starts, [0, 3, 5, 7]);
}

#[test]
fn separators_follow_the_culture() {
    assert_eq!(types("en-US", "1,5"),
               [TokenType::Digit, TokenType::GroupSeparator, TokenType::Digit]);
    assert_eq!(types("fr-FR", "1,5"),
               [TokenType::Digit, TokenType::DecimalSeparator, TokenType::Digit]);
    assert_eq!(types("de-DE", "1.5"),
               [TokenType::Digit, TokenType::GroupSeparator, TokenType::Digit]);
    assert_eq!(types("fr-FR", "1.5"),
               [TokenType::Digit, TokenType::Punctuation, TokenType::Digit]);
}

#[test]
fn narrow_space_groups_digits_in_french() {
    assert_eq!(types("fr-FR", "1\u{202F}000"),
               [TokenType::Digit, TokenType::GroupSeparator, TokenType::Digit]);
    assert_eq!(types("fr-FR", "1\u{00A0}000"),
               [TokenType::Digit, TokenType::GroupSeparator, TokenType::Digit]);
    assert_eq!(types("fr-FR", "1 000"),
               [TokenType::Digit, TokenType::Whitespace, TokenType::Digit]);
    assert_eq!(types("en-US", "1\u{202F}000"),
               [TokenType::Digit, TokenType::Whitespace, TokenType::Digit]);
}

#[test]
fn keywords_are_localized() {
    assert_eq!(types("en-US", "if True then"),
               [TokenType::IfIdentifier,
                TokenType::Whitespace,
                TokenType::TrueIdentifier,
                TokenType::Whitespace,
                TokenType::ThenIdentifier]);
    assert_eq!(types("fr-FR", "si faux"),
               [TokenType::IfIdentifier, TokenType::Whitespace, TokenType::FalseIdentifier]);
    assert_eq!(types("en-US", "si"), [TokenType::Word]);
    assert_eq!(types("de-DE", "5 km nach m")[4], TokenType::ConversionIdentifier);
}

#[test]
fn operators_and_relations() {
    assert_eq!(types("en-US", "<=≥!=≠==="),
               [TokenType::LessThanOrEqualToOperator,
                TokenType::GreaterThanOrEqualToOperator,
                TokenType::NoEqualityOperator,
                TokenType::NoEqualityOperator,
                TokenType::EqualityOperator,
                TokenType::AssignmentOperator]);
    assert_eq!(types("en-US", "×÷−^%()"),
               [TokenType::MultiplicationOperator,
                TokenType::DivisionOperator,
                TokenType::SubtractionOperator,
                TokenType::ExponentOperator,
                TokenType::PercentSymbol,
                TokenType::LeftParenthesis,
                TokenType::RightParenthesis]);
    assert!(TokenType::GreaterThanOperator.is_relational());
    assert!(!TokenType::AssignmentOperator.is_relational());
}

#[test]
fn runs_of_the_same_class_merge() {
    assert_eq!(texts("en-US", "total_cost   42€€"), ["total_cost", "   ", "42", "€€"]);
    assert_eq!(texts("en-US", "item2 5km"), ["item2", " ", "5", "km"]);
    assert_eq!(types("en-US", "item2 5km"),
               [TokenType::Word, TokenType::Whitespace, TokenType::Digit, TokenType::Word]);
    assert_eq!(types("en-US", "?!")[0], TokenType::Punctuation);
    assert_eq!(types("en-US", "$")[0], TokenType::Symbol);
}

#[test]
fn unknown_characters_become_unsupported_tokens() {
    let lines = tokenize("en-US", "5 😀😀 3").unwrap();
    let tokens = lines[0].tokens();

    assert_eq!(tokens[2].token_type(), TokenType::Unsupported);
    assert_eq!(tokens[2].text(), "😀😀");
    assert_eq!(tokens[4].text(), "3");
}

#[test]
fn unsupported_locale_is_a_configuration_error() {
    assert!(tokenize("xx-XX", "1 + 1").is_err());
}

#[test]
fn token_offsets_are_relative_to_the_line() {
    let culture = Culture::lookup("en-US").unwrap();
    let lines = tokenize_culture(culture, "a\nbb + c");
    let plus = &lines[1].tokens()[2];

    assert_eq!(plus.start(), 3);
    assert_eq!(plus.end(), 4);
    assert_eq!(plus.len(), 1);
    assert_eq!(lines[1].start(), 2);
    assert_eq!(lines[1].text(), "bb + c");
}

use crate::{error::ConfigError, interpreter::lexer::TokenType};

/// Locale-specific spellings of the keywords recognized by the lexer.
///
/// Matching is case-insensitive. Every list may hold several spellings, e.g.
/// both `in` and `to` introduce a unit conversion in English.
#[derive(Debug, PartialEq, Eq)]
pub struct Keywords {
    /// Spellings of the boolean `true` literal.
    pub true_words:       &'static [&'static str],
    /// Spellings of the boolean `false` literal.
    pub false_words:      &'static [&'static str],
    /// Spellings of the `if` keyword.
    pub if_words:         &'static [&'static str],
    /// Spellings of the `then` keyword.
    pub then_words:       &'static [&'static str],
    /// Spellings of the `else` keyword.
    pub else_words:       &'static [&'static str],
    /// Words introducing a unit conversion, such as `5 km in m`.
    pub conversion_words: &'static [&'static str],
}

/// Numeric and keyword conventions of one locale.
///
/// A culture decides how the lexer classifies `.` and `,` (decimal or group
/// separator), which whitespace characters (if any) group digits, and how
/// keywords are spelled.
///
/// A plain space never groups digits: `1 000` is read as `1` followed by
/// `000`, since a space between two numbers is as likely to separate them.
#[derive(Debug, PartialEq, Eq)]
pub struct Culture {
    /// The locale name, such as `en-US`.
    pub name:              &'static str,
    /// Character separating the integer part from the fraction.
    pub decimal_separator: char,
    /// Characters grouping the digits of the integer part. The first one is
    /// the conventional spelling.
    pub group_separators:  &'static [char],
    /// Keyword spellings.
    pub keywords:          Keywords,
}

const ENGLISH: Keywords = Keywords { true_words:       &["true"],
                                     false_words:      &["false"],
                                     if_words:         &["if"],
                                     then_words:       &["then"],
                                     else_words:       &["else", "otherwise"],
                                     conversion_words: &["in", "to", "as"], };

/// Every registered culture.
pub static CULTURES: &[Culture] =
    &[Culture { name:              "en-US",
                decimal_separator: '.',
                group_separators:  &[','],
                keywords:          ENGLISH, },
      Culture { name:              "en-GB",
                decimal_separator: '.',
                group_separators:  &[','],
                keywords:          ENGLISH, },
      Culture { name:              "fr-FR",
                decimal_separator: ',',
                group_separators:  &['\u{202F}', '\u{00A0}'],
                keywords:          Keywords { true_words:       &["vrai"],
                                              false_words:      &["faux"],
                                              if_words:         &["si"],
                                              then_words:       &["alors"],
                                              else_words:       &["sinon"],
                                              conversion_words: &["en", "vers"], }, },
      Culture { name:              "de-DE",
                decimal_separator: ',',
                group_separators:  &['.'],
                keywords:          Keywords { true_words:       &["wahr"],
                                              false_words:      &["falsch"],
                                              if_words:         &["wenn", "falls"],
                                              then_words:       &["dann"],
                                              else_words:       &["sonst"],
                                              conversion_words: &["in", "nach"], }, }];

impl Culture {
    /// Finds the registered culture for a locale name.
    ///
    /// Names match case-insensitively and `_` is accepted in place of `-`.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedCulture`] when no culture is
    /// registered under that name.
    ///
    /// # Example
    /// ```
    /// use linecalc::interpreter::culture::Culture;
    ///
    /// let culture = Culture::lookup("fr_fr").unwrap();
    /// assert_eq!(culture.name, "fr-FR");
    /// assert_eq!(culture.decimal_separator, ',');
    ///
    /// assert!(Culture::lookup("xx-XX").is_err());
    /// ```
    pub fn lookup(name: &str) -> Result<&'static Self, ConfigError> {
        let normalized = name.trim().replace('_', "-");

        CULTURES.iter()
                .find(|culture| culture.name.eq_ignore_ascii_case(&normalized))
                .ok_or_else(|| ConfigError::UnsupportedCulture { name: name.to_string() })
    }

    /// Returns the keyword token type spelled by `word` in this culture.
    #[must_use]
    pub fn keyword(&self, word: &str) -> Option<TokenType> {
        let table = [(self.keywords.true_words, TokenType::TrueIdentifier),
                     (self.keywords.false_words, TokenType::FalseIdentifier),
                     (self.keywords.if_words, TokenType::IfIdentifier),
                     (self.keywords.then_words, TokenType::ThenIdentifier),
                     (self.keywords.else_words, TokenType::ElseIdentifier),
                     (self.keywords.conversion_words, TokenType::ConversionIdentifier)];

        table.into_iter()
             .find(|(spellings, _)| spellings.iter().any(|s| s.eq_ignore_ascii_case(word)))
             .map(|(_, token_type)| token_type)
    }

    /// Classifies a separator-like character (`.`, `,` or the group
    /// separator) for this culture.
    #[must_use]
    pub fn separator(&self, c: char) -> Option<TokenType> {
        if c == self.decimal_separator {
            Some(TokenType::DecimalSeparator)
        } else if self.is_group_separator(c) {
            Some(TokenType::GroupSeparator)
        } else {
            None
        }
    }

    /// Returns `true` if `c` groups digits in this culture.
    ///
    /// # Example
    /// ```
    /// use linecalc::interpreter::culture::Culture;
    ///
    /// let french = Culture::lookup("fr-FR").unwrap();
    /// assert!(french.is_group_separator('\u{202F}'));
    /// assert!(french.is_group_separator('\u{00A0}'));
    /// assert!(!french.is_group_separator(' '));
    /// ```
    #[must_use]
    pub fn is_group_separator(&self, c: char) -> bool {
        self.group_separators.contains(&c)
    }
}

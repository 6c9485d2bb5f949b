use std::sync::Arc;

use logos::Logos;

use crate::{error::ConfigError, interpreter::culture::Culture};

/// Character classes recognized before any locale rule is applied.
///
/// Runs of digits, letters, whitespace, punctuation and symbols are matched
/// greedily so that consecutive characters of the same class merge into one
/// token. Operators are matched one at a time.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
enum RawToken {
    /// `42`
    #[regex(r"[0-9]+")]
    Digits,
    /// A letter or underscore followed by letters, digits or underscores,
    /// such as `total_cost` or `item2`. `5km` still splits before `km`.
    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*")]
    Letters,
    /// Horizontal whitespace, including non-breaking spaces.
    #[regex(r"[\p{Zs}\t\x0B\x0C]+")]
    Whitespace,
    /// `.`
    #[token(".")]
    Dot,
    /// `,`
    #[token(",")]
    Comma,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`, `−`
    #[token("-")]
    #[token("−")]
    Minus,
    /// `*`, `×`
    #[token("*")]
    #[token("×")]
    Star,
    /// `/`, `÷`
    #[token("/")]
    #[token("÷")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `%`
    #[token("%")]
    Percent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`, `≠`
    #[token("!=")]
    #[token("≠")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`, `≤`
    #[token("<=")]
    #[token("≤")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`, `≥`
    #[token(">=")]
    #[token("≥")]
    GreaterEqual,
    /// Runs of punctuation such as `:` or `?!`.
    #[regex(r"[!?:;'\x22\[\]{}]+")]
    Punctuation,
    /// Runs of symbols such as currency signs or `#`.
    #[regex(r"[\p{Sc}#@&|~`°\\]+")]
    Symbol,
}

/// The classification of a token.
///
/// Every character of a line belongs to exactly one token, and every token has
/// exactly one of these types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// An identifier-like run that is not a keyword of the culture.
    Word,
    /// A run of ASCII digits.
    Digit,
    /// A run of horizontal whitespace.
    Whitespace,
    /// A run of punctuation characters.
    Punctuation,
    /// A run of symbol characters (currency signs, `#`, `@`, ...).
    Symbol,
    /// Characters no other class accepts.
    Unsupported,
    /// The culture's decimal separator.
    DecimalSeparator,
    /// The culture's digit group separator.
    GroupSeparator,
    /// `+`
    AdditionOperator,
    /// `-`
    SubtractionOperator,
    /// `*`
    MultiplicationOperator,
    /// `/`
    DivisionOperator,
    /// `^`
    ExponentOperator,
    /// `%`
    PercentSymbol,
    /// `(`
    LeftParenthesis,
    /// `)`
    RightParenthesis,
    /// `=`
    AssignmentOperator,
    /// `==`
    EqualityOperator,
    /// `!=`
    NoEqualityOperator,
    /// `<`
    LessThanOperator,
    /// `<=`
    LessThanOrEqualToOperator,
    /// `>`
    GreaterThanOperator,
    /// `>=`
    GreaterThanOrEqualToOperator,
    /// The culture's spelling of `true`.
    TrueIdentifier,
    /// The culture's spelling of `false`.
    FalseIdentifier,
    /// The culture's spelling of `if`.
    IfIdentifier,
    /// The culture's spelling of `then`.
    ThenIdentifier,
    /// The culture's spelling of `else`.
    ElseIdentifier,
    /// The culture's spelling of a unit conversion (`in`, `to`).
    ConversionIdentifier,
}

impl TokenType {
    /// Returns `true` for the six relational operator categories.
    #[must_use]
    pub const fn is_relational(self) -> bool {
        matches!(self,
                 Self::EqualityOperator
                 | Self::NoEqualityOperator
                 | Self::LessThanOperator
                 | Self::LessThanOrEqualToOperator
                 | Self::GreaterThanOperator
                 | Self::GreaterThanOrEqualToOperator)
    }
}

/// A classified substring of one line.
///
/// The token does not copy its text. It keeps a shared handle to the line and
/// the byte offsets of its span; [`Token::text`] slices on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    token_type: TokenType,
    start:      usize,
    end:        usize,
    line:       Arc<str>,
}

impl Token {
    /// The classification of this token.
    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        self.token_type
    }

    /// Byte offset of the first character, relative to the line.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the last character, relative to the line.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Length in bytes. Never zero.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always `false`; tokens cover at least one character.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The text covered by this token.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.line[self.start..self.end]
    }

    /// Returns `true` if this token has the given type.
    #[must_use]
    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }

    /// Returns `true` if this token has the given type and, ignoring case, the
    /// given text.
    #[must_use]
    pub fn is_text(&self, token_type: TokenType, text: &str) -> bool {
        self.is(token_type) && self.text().eq_ignore_ascii_case(text)
    }
}

/// How a physical line ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// The last line of a document without a trailing line break.
    None,
    /// `\n`
    Lf,
    /// `\r`
    Cr,
    /// `\r\n`
    CrLf,
}

impl Terminator {
    /// The terminator characters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Lf => "\n",
            Self::Cr => "\r",
            Self::CrLf => "\r\n",
        }
    }

    /// Length of the terminator in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        self.as_str().len()
    }

    /// Returns `true` for [`Terminator::None`].
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::None)
    }
}

/// The tokens of one physical line together with its position in the
/// document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedLine {
    line_number: usize,
    start:       usize,
    text:        Arc<str>,
    terminator:  Terminator,
    tokens:      Vec<Token>,
}

impl TokenizedLine {
    /// 1-based line number.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line_number
    }

    /// Byte offset of the line in the document.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// The line text without its terminator.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// How the line ends.
    #[must_use]
    pub const fn terminator(&self) -> Terminator {
        self.terminator
    }

    /// Length of the line without its terminator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the line has no text (it may still have a
    /// terminator).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length of the line including its terminator.
    #[must_use]
    pub fn len_with_terminator(&self) -> usize {
        self.text.len() + self.terminator.len()
    }

    /// The tokens of the line, in order. Empty for blank lines.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// Tokenizes a document under the culture registered for `locale`.
///
/// # Errors
/// Returns [`ConfigError::UnsupportedCulture`] if `locale` is not registered.
/// Tokenization itself never fails.
///
/// # Example
/// ```
/// use linecalc::interpreter::lexer::{TokenType, tokenize};
///
/// let lines = tokenize("en-US", "5 + 3\n").unwrap();
/// assert_eq!(lines.len(), 2);
///
/// let types: Vec<_> = lines[0].tokens().iter().map(|t| t.token_type()).collect();
/// assert_eq!(types,
///            [TokenType::Digit,
///             TokenType::Whitespace,
///             TokenType::AdditionOperator,
///             TokenType::Whitespace,
///             TokenType::Digit]);
/// ```
pub fn tokenize(locale: &str, document: &str) -> Result<Vec<TokenizedLine>, ConfigError> {
    let culture = Culture::lookup(locale)?;
    Ok(tokenize_culture(culture, document))
}

/// Tokenizes a document under an already resolved culture.
///
/// The document is split on `\n`, `\r` and `\r\n`, keeping each terminator
/// with its line, so concatenating every line's text and terminator gives the
/// document back. A document always yields at least one line.
#[must_use]
pub fn tokenize_culture(culture: &Culture, document: &str) -> Vec<TokenizedLine> {
    let lines: Vec<TokenizedLine> =
        split_lines(document).into_iter()
                             .enumerate()
                             .map(|(index, (start, text, terminator))| {
                                 let text: Arc<str> = Arc::from(text);
                                 let tokens = lex_line(culture, &text);
                                 TokenizedLine { line_number: index + 1,
                                                 start,
                                                 text,
                                                 terminator,
                                                 tokens }
                             })
                             .collect();

    tracing::trace!(culture = culture.name, lines = lines.len(), "tokenized document");
    lines
}

fn split_lines(document: &str) -> Vec<(usize, &str, Terminator)> {
    let bytes = document.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let terminator = match bytes[i] {
            b'\n' => Terminator::Lf,
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => Terminator::CrLf,
            b'\r' => Terminator::Cr,
            _ => {
                i += 1;
                continue;
            },
        };

        lines.push((start, &document[start..i], terminator));
        i += terminator.len();
        start = i;
    }

    lines.push((start, &document[start..], Terminator::None));
    lines
}

fn lex_line(culture: &Culture, line: &Arc<str>) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut lexer = RawToken::lexer(line);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let token_type = match result {
            Ok(raw) => classify(culture, raw, lexer.slice()),
            Err(()) => TokenType::Unsupported,
        };
        push_token(&mut tokens, line, token_type, span.start, span.end);
    }

    tokens
}

fn classify(culture: &Culture, raw: RawToken, slice: &str) -> TokenType {
    match raw {
        RawToken::Digits => TokenType::Digit,
        RawToken::Letters => culture.keyword(slice).unwrap_or(TokenType::Word),
        RawToken::Whitespace => {
            let mut chars = slice.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if culture.is_group_separator(c) => TokenType::GroupSeparator,
                _ => TokenType::Whitespace,
            }
        },
        RawToken::Dot => culture.separator('.').unwrap_or(TokenType::Punctuation),
        RawToken::Comma => culture.separator(',').unwrap_or(TokenType::Punctuation),
        RawToken::Plus => TokenType::AdditionOperator,
        RawToken::Minus => TokenType::SubtractionOperator,
        RawToken::Star => TokenType::MultiplicationOperator,
        RawToken::Slash => TokenType::DivisionOperator,
        RawToken::Caret => TokenType::ExponentOperator,
        RawToken::Percent => TokenType::PercentSymbol,
        RawToken::LParen => TokenType::LeftParenthesis,
        RawToken::RParen => TokenType::RightParenthesis,
        RawToken::Equals => TokenType::AssignmentOperator,
        RawToken::EqualEqual => TokenType::EqualityOperator,
        RawToken::BangEqual => TokenType::NoEqualityOperator,
        RawToken::Less => TokenType::LessThanOperator,
        RawToken::LessEqual => TokenType::LessThanOrEqualToOperator,
        RawToken::Greater => TokenType::GreaterThanOperator,
        RawToken::GreaterEqual => TokenType::GreaterThanOrEqualToOperator,
        RawToken::Punctuation => TokenType::Punctuation,
        RawToken::Symbol => TokenType::Symbol,
    }
}

/// Appends a token, merging runs of unsupported characters.
///
/// The span of an unsupported token is widened to the next character
/// boundary, so a multi-byte character the raw lexer rejected byte by byte is
/// still reported as a single run.
fn push_token(tokens: &mut Vec<Token>,
              line: &Arc<str>,
              token_type: TokenType,
              start: usize,
              end: usize) {
    if token_type != TokenType::Unsupported {
        tokens.push(Token { token_type,
                            start,
                            end,
                            line: Arc::clone(line) });
        return;
    }

    let mut end = end;
    while end < line.len() && !line.is_char_boundary(end) {
        end += 1;
    }

    if let Some(last) = tokens.last_mut()
       && last.token_type == TokenType::Unsupported
       && start <= last.end
    {
        last.end = last.end.max(end);
        return;
    }

    tokens.push(Token { token_type,
                        start,
                        end,
                        line: Arc::clone(line) });
}

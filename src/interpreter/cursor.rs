use std::cell::{Cell, OnceCell};

use crate::interpreter::lexer::{Token, TokenType, TokenizedLine};

/// Index pair locating a token inside a [`TokenStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Index of the line in the document.
    pub line:  usize,
    /// Index of the token in its line.
    pub token: usize,
}

/// The tokenized lines of one document plus the memoized links between them.
///
/// Each token owns one cache slot holding the position of the token that
/// follows it. A slot is filled the first time [`LinkedToken::next`] is asked
/// for it and reused afterwards, so grammars probing the same position
/// repeatedly never redo the walk across blank lines.
pub struct TokenStream {
    lines:    Vec<TokenizedLine>,
    links:    Vec<Vec<OnceCell<Option<Position>>>>,
    resolved: Cell<usize>,
}

impl TokenStream {
    /// Wraps lexer output into a navigable stream.
    #[must_use]
    pub fn new(lines: Vec<TokenizedLine>) -> Self {
        let links = lines.iter()
                         .map(|line| line.tokens().iter().map(|_| OnceCell::new()).collect())
                         .collect();

        Self { lines,
               links,
               resolved: Cell::new(0) }
    }

    /// The tokenized lines, in document order.
    #[must_use]
    pub fn lines(&self) -> &[TokenizedLine] {
        &self.lines
    }

    /// The first token of the document, if there is any.
    #[must_use]
    pub fn first(&self) -> Option<LinkedToken<'_>> {
        self.first_from_line(0)
    }

    /// The first token of line `line_index`, or `None` if that line has no
    /// tokens.
    #[must_use]
    pub fn line_start(&self, line_index: usize) -> Option<LinkedToken<'_>> {
        self.at(Position { line:  line_index,
                           token: 0, })
    }

    /// The token at `position`, if it exists.
    #[must_use]
    pub fn at(&self, position: Position) -> Option<LinkedToken<'_>> {
        self.lines
            .get(position.line)?
            .tokens()
            .get(position.token)
            .map(|_| LinkedToken { stream: self,
                                   position })
    }

    /// Number of `next` links computed so far.
    #[must_use]
    pub fn resolved_links(&self) -> usize {
        self.resolved.get()
    }

    fn first_from_line(&self, line_index: usize) -> Option<LinkedToken<'_>> {
        self.lines
            .iter()
            .enumerate()
            .skip(line_index)
            .find(|(_, line)| !line.tokens().is_empty())
            .map(|(line, _)| LinkedToken { stream:   self,
                                           position: Position { line, token: 0 }, })
    }

    fn next_position(&self, position: Position) -> Option<Position> {
        *self.links[position.line][position.token].get_or_init(|| {
            self.resolved.set(self.resolved.get() + 1);

            if position.token + 1 < self.lines[position.line].tokens().len() {
                return Some(Position { line:  position.line,
                                       token: position.token + 1, });
            }
            self.first_from_line(position.line + 1)
                .map(|token| token.position)
        })
    }

    fn previous_position(&self, position: Position) -> Option<Position> {
        if position.token > 0 {
            return Some(Position { line:  position.line,
                                   token: position.token - 1, });
        }

        (0..position.line).rev()
                          .find(|&line| !self.lines[line].tokens().is_empty())
                          .map(|line| Position { line,
                                                 token: self.lines[line].tokens().len() - 1 })
    }
}

/// A cursor on one token of a [`TokenStream`].
///
/// Cursors are cheap to copy and never mutate the stream; every navigation
/// method returns a new cursor. Navigation crosses line boundaries
/// transparently and yields `None` past the last token of the document.
#[derive(Clone, Copy)]
pub struct LinkedToken<'s> {
    stream:   &'s TokenStream,
    position: Position,
}

impl PartialEq for LinkedToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.stream, other.stream) && self.position == other.position
    }
}

impl Eq for LinkedToken<'_> {}

impl std::fmt::Debug for LinkedToken<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedToken")
         .field("position", &self.position)
         .field("token_type", &self.token_type())
         .field("text", &self.text())
         .finish()
    }
}

impl<'s> LinkedToken<'s> {
    /// The token under the cursor.
    #[must_use]
    pub fn token(&self) -> &'s Token {
        &self.line().tokens()[self.position.token]
    }

    /// The line the token belongs to.
    #[must_use]
    pub fn line(&self) -> &'s TokenizedLine {
        &self.stream.lines[self.position.line]
    }

    /// Where the cursor is.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// The type of the current token.
    #[must_use]
    pub fn token_type(&self) -> TokenType {
        self.token().token_type()
    }

    /// The text of the current token.
    #[must_use]
    pub fn text(&self) -> &'s str {
        self.token().text()
    }

    /// Returns `true` if the current token has the given type.
    #[must_use]
    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type() == token_type
    }

    /// Byte offset of the current token in the document.
    #[must_use]
    pub fn document_start(&self) -> usize {
        self.line().start() + self.token().start()
    }

    /// Byte offset one past the current token in the document.
    #[must_use]
    pub fn document_end(&self) -> usize {
        self.line().start() + self.token().end()
    }

    /// The token that follows, possibly on a later line.
    ///
    /// The link is computed once and cached, so calling `next` twice at the
    /// same position returns the same node without extra work.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.stream
            .next_position(self.position)
            .map(|position| Self { stream: self.stream,
                                   position })
    }

    /// The token that precedes, possibly on an earlier line.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        self.stream
            .previous_position(self.position)
            .map(|position| Self { stream: self.stream,
                                   position })
    }

    /// Skips every contiguous token of `token_type`, starting with this one.
    ///
    /// Returns this cursor when it is not of that type, and `None` if the
    /// document ends inside the run.
    #[must_use]
    pub fn skip(self, token_type: TokenType) -> Option<Self> {
        self.skip_any(&[token_type])
    }

    /// Skips every contiguous token whose type is in `token_types`, starting
    /// with this one.
    #[must_use]
    pub fn skip_any(self, token_types: &[TokenType]) -> Option<Self> {
        let mut current = self;
        while token_types.contains(&current.token_type()) {
            current = current.next()?;
        }
        Some(current)
    }

    /// Scans forward, starting with this token, for a token of `token_type`
    /// whose text matches `text` (ignoring case) when one is given.
    #[must_use]
    pub fn jump_to(self, token_type: TokenType, text: Option<&str>) -> Option<Self> {
        let mut current = self;
        loop {
            let token = current.token();
            let found = match text {
                Some(text) => token.is_text(token_type, text),
                None => token.is(token_type),
            };
            if found {
                return Some(current);
            }
            current = current.next()?;
        }
    }

    /// The last token reachable from here, i.e. the last token of the
    /// document.
    #[must_use]
    pub fn last(self) -> Self {
        let mut current = self;
        while let Some(next) = current.next() {
            current = next;
        }
        current
    }

    /// The next token on the same line, skipping tokens of the given types.
    ///
    /// Grammars that must not span line breaks use this instead of
    /// [`LinkedToken::next`].
    #[must_use]
    pub fn next_on_line(&self, skipping: &[TokenType]) -> Option<Self> {
        self.next()?
            .skip_any(skipping)
            .filter(|token| token.position.line == self.position.line)
    }
}

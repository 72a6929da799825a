use std::fmt;

use smol_str::SmolStr;

use crate::error::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Colon,
    Null,
    False,
    True,
    Number,
    String,
    EndOfInput,
}

impl TokenKind {
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::LeftBrace => "`{`",
            TokenKind::RightBrace => "`}`",
            TokenKind::LeftBracket => "`[`",
            TokenKind::RightBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Null => "`null`",
            TokenKind::False => "`false`",
            TokenKind::True => "`true`",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::EndOfInput => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// One lexical unit. `text` holds the number lexeme, the raw string contents
/// (escapes undecoded), or the literal keyword; it is empty for punctuation
/// and `EndOfInput`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: SmolStr,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<SmolStr>, location: Location) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    pub fn punct(kind: TokenKind, location: Location) -> Self {
        Self {
            kind,
            text: SmolStr::default(),
            location,
        }
    }
}

/// Forward-only cursor over a materialized token sequence.
#[derive(Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, cursor: 0 }
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    /// Returns the current token and moves past it. At the end of the
    /// sequence the cursor stays put and `None` is returned.
    pub fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(token)
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.cursor..]
    }

    /// Location of the last token, used when the sequence runs out.
    pub fn last_location(&self) -> Option<Location> {
        self.tokens.last().map(|token| token.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind) -> Token {
        Token::punct(kind, Location::start())
    }

    #[rstest::rstest]
    fn test_cursor_moves_forward_and_stops_at_end() {
        let mut stream = TokenStream::new(vec![
            tok(TokenKind::LeftBracket),
            tok(TokenKind::RightBracket),
        ]);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.peek_kind(), Some(TokenKind::LeftBracket));
        assert_eq!(stream.advance().map(|t| t.kind), Some(TokenKind::LeftBracket));
        assert_eq!(stream.advance().map(|t| t.kind), Some(TokenKind::RightBracket));
        assert!(stream.advance().is_none());
        assert_eq!(stream.position(), 2);
        assert!(stream.remaining().is_empty());
    }

    #[rstest::rstest]
    fn test_empty_stream() {
        let stream = TokenStream::new(Vec::new());
        assert!(stream.is_empty());
        assert!(stream.peek().is_none());
        assert!(stream.last_location().is_none());
    }

    #[rstest::rstest]
    fn test_kind_display() {
        assert_eq!(TokenKind::Comma.to_string(), "`,`");
        assert_eq!(TokenKind::EndOfInput.to_string(), "end of input");
    }
}

use memchr::memchr2;

use crate::constants::{describe_byte, is_insignificant_whitespace, FALSE, NULL, TRUE};
use crate::error::{ErrorKind, Location};
use crate::options::NonAscii;
use crate::{DecodeOptions, Error, Result};

use super::token::{Token, TokenKind};

/// Where a number lexeme is in its grammar while it is being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    Sign,
    Zero,
    Int,
    FracStart,
    Frac,
    ExpStart,
    ExpSign,
    Exp,
}

pub struct Scanner<'a> {
    input: &'a [u8],
    position: usize,
    line: usize,
    column: usize,
    non_ascii: NonAscii,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_options(input, &DecodeOptions::default())
    }

    pub fn with_options(input: &'a [u8], options: &DecodeOptions) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
            column: 1,
            non_ascii: options.non_ascii,
        }
    }

    /// Scans the whole input. The returned sequence always ends with a single
    /// `EndOfInput` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan_token()?;
            let done = token.kind == TokenKind::EndOfInput;
            tokens.push(token);
            if done {
                break;
            }
        }
        log::trace!(
            "scanned {} tokens from {} bytes",
            tokens.len(),
            self.input.len()
        );
        Ok(tokens)
    }

    pub fn current_location(&self) -> Location {
        Location {
            offset: self.position,
            line: self.line,
            column: self.column,
        }
    }

    fn location_ahead(&self, distance: usize) -> Location {
        Location {
            offset: self.position + distance,
            line: self.line,
            column: self.column + distance,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let byte = *self.input.get(self.position)?;
        self.position += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(byte)
    }

    // Only for runs known to contain no newline.
    fn skip(&mut self, len: usize) {
        self.position += len;
        self.column += len;
    }

    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            if !is_insignificant_whitespace(byte) {
                break;
            }
            self.advance();
        }
    }

    pub fn scan_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        let location = self.current_location();

        let Some(byte) = self.peek() else {
            return Ok(Token::punct(TokenKind::EndOfInput, location));
        };

        let kind = match byte {
            b'{' => TokenKind::LeftBrace,
            b'}' => TokenKind::RightBrace,
            b'[' => TokenKind::LeftBracket,
            b']' => TokenKind::RightBracket,
            b',' => TokenKind::Comma,
            b':' => TokenKind::Colon,
            b'"' => return self.scan_string(),
            b't' => return self.scan_literal(TRUE, TokenKind::True),
            b'f' => return self.scan_literal(FALSE, TokenKind::False),
            b'n' => return self.scan_literal(NULL, TokenKind::Null),
            b'-' | b'0'..=b'9' => return self.scan_number(),
            b'\t' => {
                return Err(Error::scan(
                    ErrorKind::IllegalTab,
                    "illegal character: tab",
                    location,
                ))
            }
            other => {
                return Err(Error::scan(
                    ErrorKind::IllegalCharacter,
                    format!("illegal character: {}", describe_byte(other)),
                    location,
                ))
            }
        };
        self.skip(1);
        Ok(Token::punct(kind, location))
    }

    fn scan_literal(&mut self, literal: &'static str, kind: TokenKind) -> Result<Token> {
        let location = self.current_location();
        if !self.input[self.position..].starts_with(literal.as_bytes()) {
            return Err(Error::scan(
                ErrorKind::InvalidLiteral,
                format!("invalid literal, expected `{literal}`"),
                location,
            ));
        }
        self.skip(literal.len());
        Ok(Token::new(kind, literal, location))
    }

    fn scan_string(&mut self) -> Result<Token> {
        let input = self.input;
        let location = self.current_location();
        self.skip(1);
        let start = self.position;

        loop {
            let rest = &input[self.position..];
            let Some(stop) = memchr2(b'"', b'\\', rest) else {
                self.consume_run(rest.len())?;
                return Err(Error::scan(
                    ErrorKind::UnterminatedString,
                    "unterminated string",
                    location,
                ));
            };
            self.consume_run(stop)?;

            if input[self.position] == b'"' {
                let text = self.text(start, self.position, location)?;
                self.skip(1);
                return Ok(Token::new(TokenKind::String, text, location));
            }
            self.scan_escape()?;
        }
    }

    /// Validates and consumes `len` raw string bytes that contain neither a
    /// quote nor a backslash.
    fn consume_run(&mut self, len: usize) -> Result<()> {
        let input = self.input;
        let end = self.position + len;
        let run = &input[self.position..end];

        for (idx, &byte) in run.iter().enumerate() {
            match byte {
                b'\t' => {
                    return Err(Error::scan(
                        ErrorKind::IllegalTab,
                        "illegal tab character in string",
                        self.location_ahead(idx),
                    ))
                }
                0x00..=0x1f => {
                    return Err(Error::scan(
                        ErrorKind::IllegalControlCharacter,
                        format!(
                            "illegal control character {} in string",
                            describe_byte(byte)
                        ),
                        self.location_ahead(idx),
                    ))
                }
                0x80..=0xff if self.non_ascii == NonAscii::Reject => {
                    return Err(Error::scan(
                        ErrorKind::IllegalCharacter,
                        format!("illegal character {} in string", describe_byte(byte)),
                        self.location_ahead(idx),
                    ))
                }
                _ => {}
            }
        }

        if !run.is_ascii() {
            if let Err(err) = std::str::from_utf8(run) {
                // A sequence cut short by the end of input is reported as an
                // unterminated string by the caller.
                if err.error_len().is_some() || end < input.len() {
                    return Err(Error::scan(
                        ErrorKind::InvalidUtf8,
                        "invalid utf-8 sequence in string",
                        self.location_ahead(err.valid_up_to()),
                    ));
                }
            }
        }

        self.skip(len);
        Ok(())
    }

    fn scan_escape(&mut self) -> Result<()> {
        let location = self.current_location();
        self.skip(1);

        let Some(byte) = self.advance() else {
            return Err(Error::scan(
                ErrorKind::UnexpectedEof,
                "unexpected end of input in escape sequence",
                location,
            ));
        };

        match byte {
            b'\\' | b'/' | b'b' | b'"' | b'f' | b'n' | b'r' | b't' => Ok(()),
            b'u' => {
                for _ in 0..4 {
                    match self.advance() {
                        Some(digit) if digit.is_ascii_hexdigit() => {}
                        Some(_) => {
                            return Err(Error::scan(
                                ErrorKind::InvalidUnicodeEscape,
                                "invalid unicode escape, expected 4 hex digits",
                                location,
                            ))
                        }
                        None => {
                            return Err(Error::scan(
                                ErrorKind::UnexpectedEof,
                                "unexpected end of input in unicode escape",
                                location,
                            ))
                        }
                    }
                }
                Ok(())
            }
            other => Err(Error::scan(
                ErrorKind::InvalidEscape,
                format!("invalid escape sequence: \\{}", describe_byte(other)),
                location,
            )),
        }
    }

    fn scan_number(&mut self) -> Result<Token> {
        let location = self.current_location();
        let start = self.position;

        let mut state = if self.peek() == Some(b'-') {
            self.skip(1);
            NumberState::Sign
        } else {
            NumberState::Int
        };
        if state == NumberState::Int && self.peek() == Some(b'0') {
            self.skip(1);
            state = NumberState::Zero;
        }

        while let Some(byte) = self.peek() {
            state = match (state, byte) {
                (NumberState::Sign, b'0') => NumberState::Zero,
                (NumberState::Sign, b'1'..=b'9') => NumberState::Int,
                (NumberState::Zero, b'0'..=b'9') => {
                    return Err(Error::scan(
                        ErrorKind::LeadingZero,
                        "leading zeros are not allowed",
                        location,
                    ))
                }
                (NumberState::Int, b'0'..=b'9') => NumberState::Int,
                (NumberState::FracStart | NumberState::Frac, b'0'..=b'9') => NumberState::Frac,
                (NumberState::ExpStart | NumberState::ExpSign | NumberState::Exp, b'0'..=b'9') => {
                    NumberState::Exp
                }
                (NumberState::Zero | NumberState::Int, b'.') => NumberState::FracStart,
                (NumberState::Zero | NumberState::Int | NumberState::Frac, b'e' | b'E') => {
                    self.skip(1);
                    match self.peek() {
                        Some(b'+' | b'-' | b'0'..=b'9') => {}
                        _ => {
                            return Err(Error::scan(
                                ErrorKind::InvalidExponent,
                                "invalid exponent notation",
                                self.location_ahead(0),
                            ))
                        }
                    }
                    state = NumberState::ExpStart;
                    continue;
                }
                (NumberState::ExpStart, b'+' | b'-') => NumberState::ExpSign,
                (_, b'+' | b'-') => {
                    return Err(Error::scan(
                        ErrorKind::UnexpectedSign,
                        "unexpected sign in number",
                        self.current_location(),
                    ))
                }
                _ => break,
            };
            self.skip(1);
        }

        if matches!(
            state,
            NumberState::Sign | NumberState::FracStart | NumberState::ExpStart | NumberState::ExpSign
        ) {
            return Err(Error::scan(
                ErrorKind::IncompleteNumber,
                "incomplete number",
                location,
            ));
        }

        let text = self.text(start, self.position, location)?;
        Ok(Token::new(TokenKind::Number, text, location))
    }

    fn text(&self, start: usize, end: usize, location: Location) -> Result<&'a str> {
        let input: &'a [u8] = self.input;
        std::str::from_utf8(&input[start..end]).map_err(|err| {
            Error::scan(
                ErrorKind::InvalidUtf8,
                format!("invalid utf-8 in token: {err}"),
                location,
            )
        })
    }
}

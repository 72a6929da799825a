use crate::error::{ErrorKind, Location};
use crate::text::string::unescape;
use crate::types::{Map, Value};
use crate::{DecodeOptions, Error, Result};

use super::token::{Token, TokenKind, TokenStream};

pub fn parse(tokens: Vec<Token>, options: &DecodeOptions) -> Result<Value> {
    let mut stream = TokenStream::new(tokens);
    let parser = Parser::new(options);
    let value = parser.parse_document(&mut stream)?;
    log::trace!("parsed {} tokens into {}", stream.len(), value.type_name());
    Ok(value)
}

/// Recursive-descent parser. It holds only configuration; the cursor lives
/// in the `TokenStream` that every step borrows mutably.
struct Parser {
    max_depth: Option<usize>,
}

impl Parser {
    fn new(options: &DecodeOptions) -> Self {
        Self {
            max_depth: options.max_depth,
        }
    }

    fn parse_document(&self, stream: &mut TokenStream) -> Result<Value> {
        let value = self.parse_value(stream, 0)?;
        let leftover = match stream.remaining() {
            [] => None,
            [end] if end.kind == TokenKind::EndOfInput => None,
            [end, rest @ ..] if end.kind == TokenKind::EndOfInput => rest.first(),
            [token, ..] => Some(token),
        };
        match leftover {
            None => Ok(value),
            Some(token) => Err(Error::parse(
                ErrorKind::UnexpectedToken,
                format!(
                    "unexpected token {} after the end of the document",
                    token.kind
                ),
                Some(token.location),
            )),
        }
    }

    fn parse_value(&self, stream: &mut TokenStream, depth: usize) -> Result<Value> {
        let Some(token) = stream.peek() else {
            return Err(unexpected_end(stream, "a value"));
        };

        match token.kind {
            TokenKind::LeftBrace => self.parse_object(stream, depth + 1),
            TokenKind::LeftBracket => self.parse_array(stream, depth + 1),
            TokenKind::String => {
                let value = string_value(token)?;
                stream.advance();
                Ok(Value::String(value))
            }
            TokenKind::Number => {
                let value = number_value(token)?;
                stream.advance();
                Ok(Value::Number(value))
            }
            TokenKind::True => {
                stream.advance();
                Ok(Value::Bool(true))
            }
            TokenKind::False => {
                stream.advance();
                Ok(Value::Bool(false))
            }
            TokenKind::Null => {
                stream.advance();
                Ok(Value::Null)
            }
            TokenKind::EndOfInput => Err(unexpected_end(stream, "a value")),
            kind => Err(Error::parse(
                ErrorKind::UnexpectedToken,
                format!("unexpected token {kind}, expected a value"),
                Some(token.location),
            )),
        }
    }

    fn parse_object(&self, stream: &mut TokenStream, depth: usize) -> Result<Value> {
        let open = expect(stream, TokenKind::LeftBrace, "`{`")?.location;
        self.check_depth(depth, open)?;

        let mut map = Map::new();
        if stream.peek_kind() == Some(TokenKind::RightBrace) {
            stream.advance();
            return Ok(Value::Object(map));
        }

        loop {
            let key_token = expect(stream, TokenKind::String, "a string key")?;
            let key = string_value(key_token)?;
            expect(stream, TokenKind::Colon, "`:`")?;
            let value = self.parse_value(stream, depth)?;
            map.insert(key, value);

            let closing = expect_one_of(
                stream,
                &[TokenKind::Comma, TokenKind::RightBrace],
                "`,` or `}`",
            )?;
            if closing == TokenKind::RightBrace {
                break;
            }
        }
        Ok(Value::Object(map))
    }

    fn parse_array(&self, stream: &mut TokenStream, depth: usize) -> Result<Value> {
        let open = expect(stream, TokenKind::LeftBracket, "`[`")?.location;
        self.check_depth(depth, open)?;

        let mut items = Vec::new();
        if stream.peek_kind() == Some(TokenKind::RightBracket) {
            stream.advance();
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value(stream, depth)?);

            let closing = expect_one_of(
                stream,
                &[TokenKind::Comma, TokenKind::RightBracket],
                "`,` or `]`",
            )?;
            if closing == TokenKind::RightBracket {
                break;
            }
        }
        Ok(Value::Array(items))
    }

    fn check_depth(&self, depth: usize, location: Location) -> Result<()> {
        match self.max_depth {
            Some(max_depth) if depth > max_depth => Err(Error::parse(
                ErrorKind::NestingTooDeep,
                format!("nesting too deep, maximum depth is {max_depth}"),
                Some(location),
            )),
            _ => Ok(()),
        }
    }
}

fn expect<'s>(stream: &'s mut TokenStream, kind: TokenKind, expected: &str) -> Result<&'s Token> {
    match stream.peek() {
        Some(token) if token.kind == kind => {}
        Some(token) if token.kind != TokenKind::EndOfInput => {
            return Err(unexpected_token(token, expected));
        }
        _ => return Err(unexpected_end(stream, expected)),
    }
    stream
        .advance()
        .ok_or_else(|| Error::parse(ErrorKind::UnexpectedEnd, "unexpected end of input", None))
}

fn expect_one_of(
    stream: &mut TokenStream,
    kinds: &[TokenKind],
    expected: &str,
) -> Result<TokenKind> {
    match stream.peek() {
        Some(token) if kinds.contains(&token.kind) => {
            let kind = token.kind;
            stream.advance();
            Ok(kind)
        }
        Some(token) if token.kind != TokenKind::EndOfInput => {
            Err(unexpected_token(token, expected))
        }
        _ => Err(unexpected_end(stream, expected)),
    }
}

fn unexpected_token(token: &Token, expected: &str) -> Error {
    Error::parse(
        ErrorKind::UnexpectedToken,
        format!("unexpected token {}, expected {expected}", token.kind),
        Some(token.location),
    )
}

fn unexpected_end(stream: &TokenStream, expected: &str) -> Error {
    Error::parse(
        ErrorKind::UnexpectedEnd,
        format!("unexpected end of input, expected {expected}"),
        stream.peek().map(|token| token.location).or_else(|| stream.last_location()),
    )
}

fn string_value(token: &Token) -> Result<String> {
    unescape(&token.text)
        .map(|text| text.into_owned())
        .map_err(|err| err.with_location(token.location))
}

fn number_value(token: &Token) -> Result<f64> {
    match token.text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::parse(
            ErrorKind::InvalidNumber,
            format!("invalid number `{}`", token.text),
            Some(token.location),
        )),
    }
}

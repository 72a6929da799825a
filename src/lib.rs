//! Strict JSON decoding in two stages: a byte scanner that produces a flat
//! token sequence, and a recursive-descent parser that turns the tokens into
//! a [`Value`] tree.
//!
//! ```
//! let value = bytejson::from_slice(br#"{"name": "Ada", "tags": [1, 2]}"#).unwrap();
//! assert_eq!(value["name"].as_str(), Some("Ada"));
//! assert_eq!(value["tags"][1].as_f64(), Some(2.0));
//! ```
//!
//! The stages can also be driven separately:
//!
//! ```
//! use bytejson::TokenKind;
//!
//! let tokens = bytejson::tokenize(b"[true]").unwrap();
//! assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfInput));
//! let value = bytejson::parse_tokens(tokens).unwrap();
//! assert_eq!(value[0].as_bool(), Some(true));
//! ```

pub mod constants;
pub mod decode;
pub mod error;
pub mod options;
pub mod text;
pub mod types;

use std::io::Read;

pub use crate::decode::token::{Token, TokenKind, TokenStream};
pub use crate::error::{Error, ErrorKind, ErrorStage, Location};
pub use crate::options::{DecodeOptions, NonAscii};
pub use crate::types::{Map, Value};

pub type Result<T> = std::result::Result<T, Error>;

pub fn tokenize(input: &[u8]) -> Result<Vec<Token>> {
    tokenize_with_options(input, &DecodeOptions::default())
}

pub fn tokenize_with_options(input: &[u8], options: &DecodeOptions) -> Result<Vec<Token>> {
    decode::tokenize(input, options)
}

pub fn tokenize_reader<R: Read>(reader: R) -> Result<Vec<Token>> {
    tokenize_reader_with_options(reader, &DecodeOptions::default())
}

pub fn tokenize_reader_with_options<R: Read>(
    reader: R,
    options: &DecodeOptions,
) -> Result<Vec<Token>> {
    decode::tokenize_reader(reader, options)
}

pub fn parse_tokens(tokens: Vec<Token>) -> Result<Value> {
    parse_tokens_with_options(tokens, &DecodeOptions::default())
}

pub fn parse_tokens_with_options(tokens: Vec<Token>, options: &DecodeOptions) -> Result<Value> {
    decode::parse_tokens(tokens, options)
}

pub fn from_slice(input: &[u8]) -> Result<Value> {
    from_slice_with_options(input, &DecodeOptions::default())
}

pub fn from_slice_with_options(input: &[u8], options: &DecodeOptions) -> Result<Value> {
    decode::from_slice(input, options)
}

pub fn from_str(input: &str) -> Result<Value> {
    from_str_with_options(input, &DecodeOptions::default())
}

pub fn from_str_with_options(input: &str, options: &DecodeOptions) -> Result<Value> {
    decode::from_slice(input.as_bytes(), options)
}

pub fn from_reader<R: Read>(reader: R) -> Result<Value> {
    from_reader_with_options(reader, &DecodeOptions::default())
}

pub fn from_reader_with_options<R: Read>(reader: R, options: &DecodeOptions) -> Result<Value> {
    decode::from_reader(reader, options)
}

pub fn validate_slice(input: &[u8]) -> Result<()> {
    validate_slice_with_options(input, &DecodeOptions::default())
}

pub fn validate_slice_with_options(input: &[u8], options: &DecodeOptions) -> Result<()> {
    decode::validate_slice(input, options)
}

pub mod parser;
pub mod scanner;
pub mod token;

use std::io::Read;

use crate::types::Value;
use crate::{DecodeOptions, Error, Result};

use scanner::Scanner;
use token::Token;

pub fn tokenize(input: &[u8], options: &DecodeOptions) -> Result<Vec<Token>> {
    Scanner::with_options(input, options)
        .tokenize()
        .inspect_err(|err| log::debug!("scan failed: {err}"))
}

pub fn tokenize_reader<R: Read>(reader: R, options: &DecodeOptions) -> Result<Vec<Token>> {
    let buf = read_all(reader)?;
    tokenize(&buf, options)
}

pub fn parse_tokens(tokens: Vec<Token>, options: &DecodeOptions) -> Result<Value> {
    parser::parse(tokens, options).inspect_err(|err| log::debug!("parse failed: {err}"))
}

pub fn from_slice(input: &[u8], options: &DecodeOptions) -> Result<Value> {
    let tokens = tokenize(input, options)?;
    parse_tokens(tokens, options)
}

pub fn from_reader<R: Read>(reader: R, options: &DecodeOptions) -> Result<Value> {
    let buf = read_all(reader)?;
    from_slice(&buf, options)
}

pub fn validate_slice(input: &[u8], options: &DecodeOptions) -> Result<()> {
    from_slice(input, options).map(|_| ())
}

fn read_all<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .map_err(|err| Error::read(format!("read failed: {err}")))?;
    log::trace!("read {} bytes", buf.len());
    Ok(buf)
}

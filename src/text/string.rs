use std::borrow::Cow;

use memchr::memchr;

use crate::constants::describe_byte;
use crate::error::ErrorKind;
use crate::{Error, Result};

const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// Decodes the escape sequences kept verbatim in a string token's text.
///
/// Text without a backslash is borrowed as is. Surrogate pairs written as two
/// `\u` escapes combine into one character; an unpaired surrogate decodes to
/// U+FFFD. Errors carry no location, the caller attaches the token's.
pub fn unescape(raw: &str) -> Result<Cow<'_, str>> {
    let bytes = raw.as_bytes();
    let Some(first) = memchr(b'\\', bytes) else {
        return Ok(Cow::Borrowed(raw));
    };

    let mut out = String::with_capacity(raw.len());
    out.push_str(&raw[..first]);
    let mut idx = first;

    while idx < bytes.len() {
        let Some(&escape) = bytes.get(idx + 1) else {
            return Err(Error::parse(
                ErrorKind::InvalidEscape,
                "dangling backslash at end of string",
                None,
            ));
        };
        idx += 2;

        match escape {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{08}'),
            b'f' => out.push('\u{0c}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let unit = read_hex4(bytes, idx)?;
                idx += 4;
                let ch = if (0xD800..0xDC00).contains(&unit) {
                    match low_surrogate_at(bytes, idx) {
                        Some(low) => {
                            idx += 6;
                            let scalar = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                            char::from_u32(scalar).unwrap_or(REPLACEMENT)
                        }
                        None => REPLACEMENT,
                    }
                } else {
                    char::from_u32(unit).unwrap_or(REPLACEMENT)
                };
                out.push(ch);
            }
            other => {
                return Err(Error::parse(
                    ErrorKind::InvalidEscape,
                    format!("invalid escape sequence: \\{}", describe_byte(other)),
                    None,
                ))
            }
        }

        let next = memchr(b'\\', &bytes[idx..]).map_or(bytes.len(), |offset| idx + offset);
        out.push_str(&raw[idx..next]);
        idx = next;
    }

    Ok(Cow::Owned(out))
}

fn read_hex4(bytes: &[u8], idx: usize) -> Result<u32> {
    let digits = bytes.get(idx..idx + 4).ok_or_else(|| {
        Error::parse(
            ErrorKind::InvalidUnicodeEscape,
            "invalid unicode escape, expected 4 hex digits",
            None,
        )
    })?;
    digits.iter().try_fold(0u32, |acc, &byte| {
        let digit = (byte as char).to_digit(16).ok_or_else(|| {
            Error::parse(
                ErrorKind::InvalidUnicodeEscape,
                "invalid unicode escape, expected 4 hex digits",
                None,
            )
        })?;
        Ok(acc * 16 + digit)
    })
}

fn low_surrogate_at(bytes: &[u8], idx: usize) -> Option<u32> {
    if bytes.get(idx..idx + 2)? != b"\\u" {
        return None;
    }
    let low = read_hex4(bytes, idx + 2).ok()?;
    (0xDC00..0xE000).contains(&low).then_some(low)
}

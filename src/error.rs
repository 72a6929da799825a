use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    IllegalCharacter,
    IllegalControlCharacter,
    IllegalTab,
    InvalidEscape,
    InvalidUnicodeEscape,
    InvalidUtf8,
    LeadingZero,
    UnexpectedSign,
    IncompleteNumber,
    InvalidExponent,
    InvalidLiteral,
    UnterminatedString,
    UnexpectedEof,
    UnexpectedToken,
    UnexpectedEnd,
    InvalidNumber,
    NestingTooDeep,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    Read,
    Scan,
    Parse,
}

/// Position of a byte in the source. `line` and `column` are 1-based, the
/// column counts bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub const fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}{}", LocationSuffix(.location))]
pub struct Error {
    pub kind: ErrorKind,
    pub stage: ErrorStage,
    pub message: String,
    pub location: Option<Location>,
}

impl Error {
    pub fn scan(kind: ErrorKind, message: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            stage: ErrorStage::Scan,
            message: message.into(),
            location: Some(location),
        }
    }

    pub fn parse(kind: ErrorKind, message: impl Into<String>, location: Option<Location>) -> Self {
        Self {
            kind,
            stage: ErrorStage::Parse,
            message: message.into(),
            location,
        }
    }

    pub fn read(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Io,
            stage: ErrorStage::Read,
            message: message.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

struct LocationSuffix<'a>(&'a Option<Location>);

impl fmt::Display for LocationSuffix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(location) => write!(f, " at {location}"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_display_appends_location() {
        let err = Error::scan(
            ErrorKind::IllegalTab,
            "illegal character: tab",
            Location {
                offset: 4,
                line: 2,
                column: 3,
            },
        );
        assert_eq!(err.to_string(), "illegal character: tab at line 2, column 3");
    }

    #[rstest::rstest]
    fn test_display_without_location() {
        let err = Error::read("read failed: broken pipe");
        assert_eq!(err.to_string(), "read failed: broken pipe");
        assert_eq!(err.stage, ErrorStage::Read);
        assert_eq!(err.kind, ErrorKind::Io);
    }
}

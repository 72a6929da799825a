use crate::constants::MAX_DEPTH;

/// How the scanner treats bytes at or above 0x80 inside string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonAscii {
    /// Every non-ASCII byte is an illegal character.
    #[default]
    Reject,
    /// Well-formed UTF-8 sequences are accepted, malformed ones are rejected.
    Utf8,
}

#[derive(Debug, Clone)]
pub struct DecodeOptions {
    pub max_depth: Option<usize>,
    pub non_ascii: NonAscii,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` removes the nesting limit; deeply nested input then recurses
    /// as deep as the document goes.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_non_ascii(mut self, non_ascii: NonAscii) -> Self {
        self.non_ascii = non_ascii;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(MAX_DEPTH),
            non_ascii: NonAscii::default(),
        }
    }
}

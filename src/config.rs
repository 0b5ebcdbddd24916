use crate::tokenizer::DelimiterClass;

/// Placeholder substituted for an out-of-range index.
pub const DEFAULT_PLACEHOLDER: &str = "\u{FFFD}";

/// Options for a [`Codec`](crate::Codec).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Delimiters used to split text when compressing
    pub delimiters: DelimiterClass,

    /// Turn recoverable decode warnings into errors
    pub strict: bool,

    /// Word written in place of an out-of-range dictionary index
    pub placeholder: String,
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiters(mut self, delimiters: DelimiterClass) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            delimiters: DelimiterClass::ALL,
            strict: false,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
        }
    }
}

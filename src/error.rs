use std::fmt;

/// Errors produced while loading a dictionary or running the codec.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A token the selector marked as dictionary-representable was not found
    /// after cleaning. Indicates a selector/catalog inconsistency.
    #[error("token {token:?} cleaned to {cleaned:?}, which is not in the dictionary")]
    DictionaryMiss { token: String, cleaned: String },

    #[error("literal block at offset {offset} declares {declared} bytes but only {available} remain")]
    TruncatedLiteralBlock {
        offset: usize,
        declared: usize,
        available: usize,
    },

    #[error("literal block at offset {offset} is not valid UTF-8")]
    InvalidUtf8 {
        offset: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("no operator with id {0}")]
    UnknownOperatorId(u8),

    #[error("reserved bits {bits:#04x} set in {field} at offset {offset}")]
    ReservedBits {
        field: Field,
        bits: u8,
        offset: usize,
    },

    #[error("packed operators at offset {offset} encode two operators of the same category")]
    ConflictingOperators { offset: usize },

    #[error("invalid literal continuation byte {value:#04x} at offset {offset}")]
    InvalidContinuation { value: u8, offset: usize },

    #[error("buffer ends inside {field} at offset {offset}")]
    UnexpectedEnd { field: Field, offset: usize },

    #[error("varint at offset {offset} does not fit in 32 bits")]
    VarintOverflow { offset: usize },

    #[error("dictionary index {index} at offset {offset} is out of range (size {size})")]
    IndexOutOfRange {
        index: u32,
        offset: usize,
        size: usize,
    },

    #[error("token of {0} bytes is too long for a literal block")]
    LiteralTooLong(usize),

    #[error("dictionary has {0} entries, at most 65536 are addressable")]
    DictionaryTooLarge(usize),

    #[error("failed to read word list")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// The part of the compressed stream an error or warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    InfoByte,
    PackedOps,
    Index,
    LiteralLength,
    LiteralContinuation,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::InfoByte => "info byte",
            Field::PackedOps => "packed operators",
            Field::Index => "index field",
            Field::LiteralLength => "literal length",
            Field::LiteralContinuation => "literal continuation byte",
        };
        f.write_str(name)
    }
}

/// Recoverable problems found while decompressing.
///
/// In non-strict mode these are collected instead of aborting the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// An index past the end of the dictionary; a placeholder was substituted.
    OutOfRangeIndex { index: u32, offset: usize },
    /// The buffer ended mid-field; output stops at the last complete field.
    TruncatedTrailingField { field: Field, offset: usize },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::OutOfRangeIndex { index, offset } => {
                write!(f, "index {index} at offset {offset} is out of range")
            }
            DecodeWarning::TruncatedTrailingField { field, offset } => {
                write!(f, "buffer ends inside {field} at offset {offset}")
            }
        }
    }
}

//! # lexpack - Dictionary Text Compression
//!
//! A lossless compressor for natural-language text. Common words are replaced
//! by variable-length indices into a shared word table, and the exact surface
//! form is rebuilt through a small catalog of reversible operators:
//! 1. **Casing**: capitalized or all-caps words
//! 2. **Punctuation**: `. ! ? ... , : ;` at the end of a word
//! 3. **Quotes**: opening and closing quotation marks
//! 4. **Whitespace**: line feeds, paragraph breaks and tabs
//!
//! Tokens that no operator combination can reduce to a dictionary word are
//! stored as raw UTF-8, so every input round-trips exactly.
//!
//! ## Example
//!
//! ```
//! use lexpack_rs::{Codec, Dictionary};
//!
//! let dictionary = Dictionary::builtin();
//! let codec = Codec::new(&dictionary);
//!
//! let text = "The cat sat on the mat.\n\"Hello, world!\"";
//! let compressed = codec.compress(text).unwrap();
//! assert!(compressed.len() < text.len());
//!
//! // Reconstructs the original text
//! assert_eq!(codec.decompress(&compressed).unwrap(), text);
//! ```
//!
//! ## Sharing
//!
//! A [`Dictionary`] is built once and only read afterwards. Any number of
//! [`Codec`]s, on any number of threads, can borrow the same instance.

mod codec;
mod config;
mod dictionary;
mod error;
mod operator;
pub mod packed;
mod selector;
mod tokenizer;
pub mod varint;

#[cfg(test)]
mod tests;

pub use codec::{compress, decompress, Codec, CompressionStats, Decompressed};
pub use config::{CodecConfig, DEFAULT_PLACEHOLDER};
pub use dictionary::Dictionary;
pub use error::{DecodeWarning, Error, Field, Result};
pub use operator::{Category, Operator};
pub use packed::PackedOps;
pub use selector::{min_applicable_ops, OperatorList};
pub use tokenizer::{tokenize, DelimiterClass, Tokens};

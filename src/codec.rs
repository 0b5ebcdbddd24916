//! Compress and decompress state machines.
//!
//! Stream layout: one info byte (bit 0 set when packed operators for the first
//! token follow), then one field per token. A field is either a literal block
//! (varint length, raw UTF-8, one continuation byte) or a dictionary index
//! whose final byte carries the ops-follow flag. Packed operators for token
//! `i + 1` are written right after field `i`.

use crate::config::CodecConfig;
use crate::dictionary::Dictionary;
use crate::error::{DecodeWarning, Error, Field, Result};
use crate::packed;
use crate::selector::{min_applicable_ops, OperatorList};
use crate::tokenizer::Tokens;
use crate::varint::{read_index, read_varint, write_index, write_varint};

const INFO_OPS_FOLLOW: u8 = 0x01;

/// Characters after which no separator space is inserted.
const TRAILING_WHITESPACE: [char; 3] = [' ', '\t', '\n'];

/// Dictionary codec bound to a word table.
///
/// Cheap to create. Holds no per-call state, so one instance can serve any
/// number of calls.
#[derive(Debug, Clone)]
pub struct Codec<'d> {
    dictionary: &'d Dictionary,
    config: CodecConfig,
}

impl<'d> Codec<'d> {
    /// Creates a codec with the default configuration.
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self::with_config(dictionary, CodecConfig::default())
    }

    pub fn with_config(dictionary: &'d Dictionary, config: CodecConfig) -> Self {
        Self { dictionary, config }
    }

    pub fn dictionary(&self) -> &'d Dictionary {
        self.dictionary
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compresses `text` into a self-contained buffer.
    ///
    /// Empty text compresses to an empty buffer.
    pub fn compress(&self, text: &str) -> Result<Vec<u8>> {
        self.compress_with_stats(text).map(|(bytes, _)| bytes)
    }

    /// Compresses `text` and reports what the stream is made of.
    pub fn compress_with_stats(&self, text: &str) -> Result<(Vec<u8>, CompressionStats)> {
        let raw: Vec<&str> = Tokens::new(text, self.config.delimiters).collect();
        let mut stats = CompressionStats {
            input_bytes: text.len(),
            tokens: raw.len(),
            ..CompressionStats::default()
        };
        if raw.is_empty() {
            return Ok((Vec::new(), stats));
        }

        // The decoder reinserts single separator spaces
        let last = raw.len() - 1;
        let tokens: Vec<&str> = raw
            .iter()
            .enumerate()
            .map(|(i, &token)| if i < last { strip_separator(token) } else { token })
            .collect();

        let mut out = Vec::with_capacity(text.len() / 2 + 8);
        let mut ops = min_applicable_ops(tokens[0], self.dictionary);
        if ops.is_empty() {
            out.push(0);
        } else {
            out.push(INFO_OPS_FOLLOW);
            packed::encode_into(&ops, &mut out);
        }

        for (i, token) in tokens.iter().enumerate() {
            let next = match tokens.get(i + 1) {
                Some(next_token) => min_applicable_ops(next_token, self.dictionary),
                None => OperatorList::new(),
            };
            let ops_follow = !next.is_empty();

            if ops.is_literal() {
                let len =
                    u32::try_from(token.len()).map_err(|_| Error::LiteralTooLong(token.len()))?;
                write_varint(len, &mut out);
                out.extend_from_slice(token.as_bytes());
                out.push(u8::from(ops_follow));
                stats.literal_blocks += 1;
                stats.literal_bytes += token.len();
                tracing::trace!(token, len, "literal block");
            } else {
                let cleaned = ops.clean(token);
                let index = self.dictionary.lookup(&cleaned).ok_or_else(|| {
                    Error::DictionaryMiss {
                        token: (*token).to_owned(),
                        cleaned: cleaned.clone(),
                    }
                })?;
                write_index(u32::from(index), ops_follow, &mut out);
                stats.dictionary_fields += 1;
                tracing::trace!(token, index, ops = ?ops, "dictionary field");
            }

            if ops_follow {
                packed::encode_into(&next, &mut out);
            }
            ops = next;
        }

        stats.output_bytes = out.len();
        tracing::debug!(
            input_bytes = stats.input_bytes,
            output_bytes = stats.output_bytes,
            tokens = stats.tokens,
            literal_blocks = stats.literal_blocks,
            "compressed"
        );
        Ok((out, stats))
    }

    /// Decompresses a buffer produced by [`compress`](Self::compress).
    ///
    /// Recoverable problems are logged and otherwise ignored unless the codec
    /// is strict; use [`decompress_with_warnings`](Self::decompress_with_warnings)
    /// to inspect them.
    pub fn decompress(&self, bytes: &[u8]) -> Result<String> {
        self.decompress_with_warnings(bytes).map(|out| out.text)
    }

    /// Decompresses a buffer, collecting recoverable problems.
    ///
    /// An out-of-range index is replaced by the configured placeholder. A
    /// buffer that ends mid-field yields the text decoded so far. Structural
    /// corruption is always an error.
    pub fn decompress_with_warnings(&self, bytes: &[u8]) -> Result<Decompressed> {
        let mut out = Decompressed {
            text: String::with_capacity(bytes.len() * 4),
            warnings: Vec::new(),
        };
        let Some(&info) = bytes.first() else {
            return Ok(out);
        };
        if info & !INFO_OPS_FOLLOW != 0 {
            return Err(Error::ReservedBits {
                field: Field::InfoByte,
                bits: info & !INFO_OPS_FOLLOW,
                offset: 0,
            });
        }

        let mut cursor = 1;
        let mut ops = OperatorList::new();
        if info & INFO_OPS_FOLLOW != 0 {
            match packed::decode(bytes, cursor) {
                Ok((first, next)) => {
                    ops = first;
                    cursor = next;
                }
                Err(err) => {
                    self.recover(err, &mut out.warnings)?;
                    return Ok(out);
                }
            }
        }

        while cursor < bytes.len() {
            let field_start = cursor;

            let (separated, ops_follow) = if ops.is_literal() {
                let (len, start) = match read_varint(bytes, cursor, Field::LiteralLength) {
                    Ok(value) => value,
                    Err(err) => {
                        self.recover(err, &mut out.warnings)?;
                        break;
                    }
                };
                let declared = len as usize;
                let available = bytes.len() - start;
                if declared > available {
                    return Err(Error::TruncatedLiteralBlock {
                        offset: field_start,
                        declared,
                        available,
                    });
                }
                let end = start + declared;
                let literal = std::str::from_utf8(&bytes[start..end])
                    .map_err(|source| Error::InvalidUtf8 { offset: start, source })?;
                out.text.push_str(literal);
                cursor = end;
                tracing::trace!(offset = field_start, literal, "literal block");

                let ops_follow = match bytes.get(cursor) {
                    Some(0) => false,
                    Some(1) => true,
                    Some(&value) => {
                        return Err(Error::InvalidContinuation {
                            value,
                            offset: cursor,
                        })
                    }
                    None => {
                        self.recover(
                            Error::UnexpectedEnd {
                                field: Field::LiteralContinuation,
                                offset: cursor,
                            },
                            &mut out.warnings,
                        )?;
                        break;
                    }
                };
                cursor += 1;
                (!literal.ends_with(TRAILING_WHITESPACE), ops_follow)
            } else {
                let (index, ops_follow, next) = match read_index(bytes, cursor) {
                    Ok(value) => value,
                    Err(err) => {
                        self.recover(err, &mut out.warnings)?;
                        break;
                    }
                };
                cursor = next;

                let word = match self.dictionary.resolve(index) {
                    Some(word) => word,
                    None => {
                        if self.config.strict {
                            return Err(Error::IndexOutOfRange {
                                index,
                                offset: field_start,
                                size: self.dictionary.len(),
                            });
                        }
                        let warning = DecodeWarning::OutOfRangeIndex {
                            index,
                            offset: field_start,
                        };
                        tracing::warn!(%warning, "substituting placeholder");
                        out.warnings.push(warning);
                        self.config.placeholder.as_str()
                    }
                };
                out.text.push_str(&ops.apply(word));
                tracing::trace!(offset = field_start, index, "dictionary field");
                (!ops.overwrites_trailing_space(), ops_follow)
            };

            if ops_follow {
                match packed::decode(bytes, cursor) {
                    Ok((next_ops, next)) => {
                        ops = next_ops;
                        cursor = next;
                    }
                    Err(err) => {
                        self.recover(err, &mut out.warnings)?;
                        break;
                    }
                }
            } else {
                ops = OperatorList::new();
            }

            if separated && cursor < bytes.len() {
                out.text.push(' ');
            }
        }

        tracing::debug!(
            input_bytes = bytes.len(),
            output_bytes = out.text.len(),
            warnings = out.warnings.len(),
            "decompressed"
        );
        Ok(out)
    }

    /// Turns a truncated field into a warning, unless strict. Any other error
    /// is returned as is.
    fn recover(&self, err: Error, warnings: &mut Vec<DecodeWarning>) -> Result<()> {
        match err {
            Error::UnexpectedEnd { field, offset } if !self.config.strict => {
                let warning = DecodeWarning::TruncatedTrailingField { field, offset };
                tracing::warn!(%warning, "stopping at truncated field");
                warnings.push(warning);
                Ok(())
            }
            err => Err(err),
        }
    }
}

/// Drops the separator space from a non-final token.
///
/// The space stays when the remainder itself ends in whitespace, since the
/// decoder never inserts a separator after whitespace.
fn strip_separator(token: &str) -> &str {
    match token.strip_suffix(' ') {
        Some(rest) if !rest.ends_with(TRAILING_WHITESPACE) => rest,
        _ => token,
    }
}

/// Decompressed text together with any recoverable problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decompressed {
    pub text: String,
    pub warnings: Vec<DecodeWarning>,
}

impl Decompressed {
    /// True if the buffer decoded without warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Statistics about one compress call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressionStats {
    /// Bytes of input text
    pub input_bytes: usize,
    /// Bytes of compressed output
    pub output_bytes: usize,
    /// Number of tokens
    pub tokens: usize,
    /// Tokens stored as dictionary indices
    pub dictionary_fields: usize,
    /// Tokens stored as raw UTF-8
    pub literal_blocks: usize,
    /// Payload bytes inside literal blocks
    pub literal_bytes: usize,
}

impl CompressionStats {
    /// Returns the output size as a percentage of the input size.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            (self.output_bytes as f64 / self.input_bytes as f64) * 100.0
        }
    }
}

/// Compresses `text` against `dictionary` with the default configuration.
pub fn compress(text: &str, dictionary: &Dictionary) -> Result<Vec<u8>> {
    Codec::new(dictionary).compress(text)
}

/// Decompresses `bytes` against `dictionary` with the default configuration.
pub fn decompress(bytes: &[u8], dictionary: &Dictionary) -> Result<String> {
    Codec::new(dictionary).decompress(bytes)
}

//! Bit-packed encoding of operator lists.
//!
//! Primary byte, MSB first:
//!
//! | bits | field |
//! |------|-------|
//! | 7    | extension byte follows |
//! | 6-5  | casing: 0 none, 1 capitalize, 2 all caps |
//! | 4-2  | 0 none, 1 `.`, 2 `,`, 3 `?`, 4 `!`, 5 `...`, 6 `:`, 7 single line feed |
//! | 1-0  | bit 0 open quote, bit 1 close quote |
//!
//! Extension byte:
//!
//! | bits | field |
//! |------|-------|
//! | 7-6  | whitespace: 0 none, 1 single line feed, 2 double line feed, 3 tab |
//! | 5    | literal block |
//! | 4    | semicolon |
//! | 3-0  | reserved, zero |
//!
//! A single line feed uses the 3-bit field when no punctuation occupies it,
//! and the whitespace class otherwise. The semicolon has no code in the 3-bit
//! field and always lives in the extension.

use crate::error::{Error, Field, Result};
use crate::operator::Operator;
use crate::selector::OperatorList;

const EXTENSION: u8 = 0x80;
const OPEN_QUOTE: u8 = 0x01;
const CLOSE_QUOTE: u8 = 0x02;
const LITERAL_FLAG: u8 = 0x20;
const SEMICOLON_FLAG: u8 = 0x10;
const RESERVED_BITS: u8 = 0x0F;

const CASING_CAPITALIZE: u8 = 1;
const CASING_ALL_CAPS: u8 = 2;

const PUNCT_LINE_FEED: u8 = 7;

const SPACE_LINE_FEED: u8 = 1;
const SPACE_PARAGRAPH: u8 = 2;
const SPACE_TAB: u8 = 3;

/// Punctuation operators by their 3-bit code; code 0 is "none".
const PUNCT_CODES: [Option<Operator>; 7] = [
    None,
    Some(Operator::Period),
    Some(Operator::Comma),
    Some(Operator::Question),
    Some(Operator::Exclamation),
    Some(Operator::Ellipsis),
    Some(Operator::Colon),
];

/// One or two packed bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedOps {
    bytes: [u8; 2],
    len: usize,
}

impl PackedOps {
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn has_extension(&self) -> bool {
        self.len == 2
    }
}

/// Packs an operator list into one byte, or two if an extension is needed.
pub fn encode(ops: &OperatorList) -> PackedOps {
    if ops.is_literal() {
        return PackedOps {
            bytes: [EXTENSION, LITERAL_FLAG],
            len: 2,
        };
    }

    let mut casing = 0u8;
    let mut punct = 0u8;
    let mut quotes = 0u8;
    let mut space = 0u8;
    let mut semicolon = false;
    let mut line_feed = false;

    for op in ops {
        match op {
            Operator::Capitalize => casing = CASING_CAPITALIZE,
            Operator::AllCaps => casing = CASING_ALL_CAPS,
            Operator::OpenQuote => quotes |= OPEN_QUOTE,
            Operator::CloseQuote => quotes |= CLOSE_QUOTE,
            Operator::Semicolon => semicolon = true,
            Operator::LineFeed => line_feed = true,
            Operator::ParagraphBreak => space = SPACE_PARAGRAPH,
            Operator::Tab => space = SPACE_TAB,
            Operator::Literal => {}
            other => {
                punct = PUNCT_CODES
                    .iter()
                    .position(|code| *code == Some(*other))
                    .unwrap_or_default() as u8;
            }
        }
    }

    if line_feed {
        if punct == 0 {
            punct = PUNCT_LINE_FEED;
        } else {
            space = SPACE_LINE_FEED;
        }
    }

    let extended = semicolon || space != 0;
    let flag = if extended { EXTENSION } else { 0 };
    let primary = flag | casing << 5 | punct << 2 | quotes;
    if extended {
        let mut ext = space << 6;
        if semicolon {
            ext |= SEMICOLON_FLAG;
        }
        PackedOps {
            bytes: [primary, ext],
            len: 2,
        }
    } else {
        PackedOps {
            bytes: [primary, 0],
            len: 1,
        }
    }
}

/// Appends the packed form of `ops` to `out`.
pub fn encode_into(ops: &OperatorList, out: &mut Vec<u8>) {
    out.extend_from_slice(encode(ops).as_slice());
}

/// Unpacks an operator list starting at `cursor`.
///
/// Operators come back in canonical category order. Returns the list and the
/// cursor just past the packed bytes.
pub fn decode(bytes: &[u8], cursor: usize) -> Result<(OperatorList, usize)> {
    let end = Error::UnexpectedEnd {
        field: Field::PackedOps,
        offset: cursor,
    };
    let primary = *bytes.get(cursor).ok_or(end)?;
    let mut pos = cursor + 1;

    let (mut space, mut literal, mut semicolon) = (0u8, false, false);
    if primary & EXTENSION != 0 {
        let ext = *bytes.get(pos).ok_or(Error::UnexpectedEnd {
            field: Field::PackedOps,
            offset: cursor,
        })?;
        if ext & RESERVED_BITS != 0 {
            return Err(Error::ReservedBits {
                field: Field::PackedOps,
                bits: ext & RESERVED_BITS,
                offset: pos,
            });
        }
        space = ext >> 6;
        literal = ext & LITERAL_FLAG != 0;
        semicolon = ext & SEMICOLON_FLAG != 0;
        pos += 1;
    }

    if literal {
        return Ok((OperatorList::literal(), pos));
    }

    let casing = (primary >> 5) & 0x03;
    let punct = (primary >> 2) & 0x07;
    let quotes = primary & 0x03;

    let mut ops = Vec::with_capacity(5);
    match casing {
        0 => {}
        CASING_CAPITALIZE => ops.push(Operator::Capitalize),
        CASING_ALL_CAPS => ops.push(Operator::AllCaps),
        _ => {
            return Err(Error::ReservedBits {
                field: Field::PackedOps,
                bits: primary & 0x60,
                offset: cursor,
            })
        }
    }

    if quotes & OPEN_QUOTE != 0 {
        ops.push(Operator::OpenQuote);
    }

    let punct_op = PUNCT_CODES.get(punct as usize).copied().flatten();
    match (punct_op, semicolon) {
        (Some(_), true) => return Err(Error::ConflictingOperators { offset: cursor }),
        (Some(op), false) => ops.push(op),
        (None, true) => ops.push(Operator::Semicolon),
        (None, false) => {}
    }

    if quotes & CLOSE_QUOTE != 0 {
        ops.push(Operator::CloseQuote);
    }

    let primary_line_feed = punct == PUNCT_LINE_FEED;
    match (space, primary_line_feed) {
        (0, true) | (SPACE_LINE_FEED, false) => ops.push(Operator::LineFeed),
        (0, false) => {}
        (SPACE_PARAGRAPH, false) => ops.push(Operator::ParagraphBreak),
        (SPACE_TAB, false) => ops.push(Operator::Tab),
        _ => return Err(Error::ConflictingOperators { offset: cursor }),
    }

    Ok((OperatorList::from_ordered(ops), pos))
}

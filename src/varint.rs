//! Variable-length integers used by the stream format.
//!
//! Readers take the buffer and a cursor and return the value together with
//! the cursor just past it.

use crate::error::{Error, Field, Result};

const CONTINUE: u8 = 0x80;
const DATA_BITS: u8 = 0x7F;
const OPS_FOLLOW: u8 = 0x40;
const INDEX_TAIL_BITS: u8 = 0x3F;

/// Appends `value` with 7 data bits per byte, bit 7 set on all but the last.
pub fn write_varint(mut value: u32, out: &mut Vec<u8>) {
    loop {
        let byte = (value as u8) & DATA_BITS;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | CONTINUE);
    }
}

/// Reads a varint written by [`write_varint`].
pub fn read_varint(bytes: &[u8], cursor: usize, field: Field) -> Result<(u32, usize)> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    let mut pos = cursor;
    loop {
        let byte = *bytes
            .get(pos)
            .ok_or(Error::UnexpectedEnd { field, offset: cursor })?;
        pos += 1;
        value |= u64::from(byte & DATA_BITS) << shift;
        if byte & CONTINUE == 0 {
            break;
        }
        shift += 7;
        if shift > 28 {
            return Err(Error::VarintOverflow { offset: cursor });
        }
    }
    let value = u32::try_from(value).map_err(|_| Error::VarintOverflow { offset: cursor })?;
    Ok((value, pos))
}

/// Appends a dictionary index.
///
/// Intermediate bytes carry 7 data bits and a continuation bit. The final
/// byte carries 6 data bits and bit 6 as the ops-follow flag.
pub fn write_index(mut value: u32, ops_follow: bool, out: &mut Vec<u8>) {
    while value > u32::from(INDEX_TAIL_BITS) {
        out.push((value as u8 & DATA_BITS) | CONTINUE);
        value >>= 7;
    }
    let mut last = value as u8 & INDEX_TAIL_BITS;
    if ops_follow {
        last |= OPS_FOLLOW;
    }
    out.push(last);
}

/// Reads an index written by [`write_index`], returning the index, the
/// ops-follow flag and the new cursor.
pub fn read_index(bytes: &[u8], cursor: usize) -> Result<(u32, bool, usize)> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    let mut pos = cursor;
    loop {
        let byte = *bytes.get(pos).ok_or(Error::UnexpectedEnd {
            field: Field::Index,
            offset: cursor,
        })?;
        pos += 1;
        if byte & CONTINUE != 0 {
            value |= u64::from(byte & DATA_BITS) << shift;
            shift += 7;
            if shift > 28 {
                return Err(Error::VarintOverflow { offset: cursor });
            }
        } else {
            value |= u64::from(byte & INDEX_TAIL_BITS) << shift;
            let value =
                u32::try_from(value).map_err(|_| Error::VarintOverflow { offset: cursor })?;
            return Ok((value, byte & OPS_FOLLOW != 0, pos));
        }
    }
}

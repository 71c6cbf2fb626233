//! The keywise order-preserving binary encoding.
//!
//! Every encoded key opens with a tag byte from [`tag`]; tags ascend with
//! the key order, scalar payloads are bit-munged so their byte order equals
//! their value order, and composites concatenate the embedded encodings of
//! their children behind an escape/terminator discipline that keeps them
//! prefix-free. The payoff is [`compare`]: plain unsigned bytewise
//! comparison of two encoded keys equals the total order of the values they
//! encode, so a store that only knows memcmp can serve range scans, prefix
//! queries, and componentwise joins over structured keys.

pub mod tag;

mod decode;
mod encode;

use std::cmp::Ordering;

use bytes::BytesMut;

use crate::error::KeyError;
use crate::types::KeyValue;

/// Default composite nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Codec configuration handle.
///
/// The codec is pure and stateless; this carries limits only. The free
/// functions [`encode`] and [`decode`] use the defaults.
#[derive(Debug, Clone, Copy)]
pub struct Codec {
    max_depth: usize,
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Codec {
    /// Creates a codec with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the composite nesting limit. Values (or inputs) nested deeper
    /// fail with [`KeyError::TooDeep`].
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    /// Encodes a key into an owned buffer. All-or-nothing: on error nothing
    /// is returned.
    pub fn encode(&self, value: &KeyValue) -> Result<Vec<u8>, KeyError> {
        let mut buf = BytesMut::new();
        encode::encode_value(&mut buf, value, self.max_depth)?;
        Ok(buf.to_vec())
    }

    /// Decodes a complete buffer into a key. Trailing bytes after a
    /// finished top-level value are malformed.
    pub fn decode(&self, bytes: &[u8]) -> Result<KeyValue, KeyError> {
        let mut cursor = bytes;
        let value = decode::decode_value(&mut cursor, self.max_depth)?;
        if !cursor.is_empty() {
            return Err(KeyError::Malformed(format!(
                "{} trailing bytes after a complete key",
                cursor.len()
            )));
        }
        Ok(value)
    }
}

/// Encodes a key with the default codec.
pub fn encode(value: &KeyValue) -> Result<Vec<u8>, KeyError> {
    Codec::default().encode(value)
}

/// Decodes a key with the default codec.
pub fn decode(bytes: &[u8]) -> Result<KeyValue, KeyError> {
    Codec::default().decode(bytes)
}

/// Compares two encoded keys.
///
/// This is nothing more than unsigned bytewise comparison; the encoding
/// carries the whole ordering contract. Tag monotonicity decides across
/// type classes, payload munging decides within scalars, and the
/// escape/terminator discipline makes embedded encodings prefix-free so
/// composites compare componentwise. No structure-aware comparator exists,
/// and none is needed.
pub fn compare(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

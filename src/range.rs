//! Prefix-range bounds over encoded composite keys.
//!
//! A composite's children encode verbatim, so every key that extends a
//! composite componentwise shares its encoding up to (but not including)
//! the outermost terminator. Appending the high byte to that shared form
//! yields an exclusive upper bound no real key can reach, giving the
//! half-open scan window `[start, end)` over a byte-ordered store.

use crate::codec::{self, tag};
use crate::error::KeyError;
use crate::types::KeyValue;

/// Returns `(start, end)` bounds covering exactly the encoded keys that
/// extend `prefix` componentwise, `prefix` itself included.
///
/// Only composites can be extended, so anything else is rejected. Child
/// terminators stay in place, which is what keeps a prefix ending in
/// `"foo"` from matching keys that continue with `"foobar"`.
pub fn prefix_range(prefix: &KeyValue) -> Result<(Vec<u8>, Vec<u8>), KeyError> {
    if !prefix.is_composite() {
        return Err(KeyError::BadValue("range prefixes must be composite".into()));
    }
    let mut start = codec::encode(prefix)?;
    start.pop();
    let mut end = start.clone();
    end.push(tag::HIGH);
    Ok((start, end))
}

//! Key decoding: bytes → `KeyValue`.

use bytes::Buf;

use super::tag;
use crate::error::KeyError;
use crate::types::KeyValue;

/// Decodes a single top-level key from the buffer.
///
/// The caller checks that the buffer is fully consumed afterwards; trailing
/// bytes after a complete key are not this function's concern.
pub(crate) fn decode_value(
    buf: &mut impl Buf,
    max_depth: usize,
) -> Result<KeyValue, KeyError> {
    if !buf.has_remaining() {
        return Err(KeyError::Malformed("empty input".into()));
    }

    let t = buf.get_u8();
    match t {
        tag::BOTTOM => Ok(KeyValue::Bottom),
        tag::NULL => Ok(KeyValue::Null),
        tag::FALSE => Ok(KeyValue::Bool(false)),
        tag::TRUE => Ok(KeyValue::Bool(true)),
        tag::NEG_INFINITY => Ok(KeyValue::Number(f64::NEG_INFINITY)),
        tag::POS_INFINITY => Ok(KeyValue::Number(f64::INFINITY)),
        tag::NEG_NUMBER => Ok(KeyValue::Number(read_negative(buf)?)),
        tag::POS_NUMBER => Ok(KeyValue::Number(read_non_negative(buf)?)),
        tag::NEG_DATE => Ok(KeyValue::Date(read_negative(buf)?)),
        tag::POS_DATE => Ok(KeyValue::Date(read_non_negative(buf)?)),
        tag::BYTES => Ok(KeyValue::Bytes(read_remaining(buf))),
        tag::TEXT => Ok(KeyValue::Text(into_text(read_remaining(buf))?)),
        tag::CODE => Ok(KeyValue::Code(into_text(read_remaining(buf))?)),
        tag::SET | tag::LIST | tag::MAP => decode_composite(buf, t, 0, max_depth),
        // A lone high byte is a stored range bound; composites reject it.
        tag::HIGH => Ok(KeyValue::High),
        unknown => Err(KeyError::Malformed(format!("unknown tag: 0x{unknown:02X}"))),
    }
}

/// Decodes a composite whose tag byte has already been consumed. `depth` is
/// the nesting level of this composite, zero at the top.
fn decode_composite(
    buf: &mut impl Buf,
    t: u8,
    depth: usize,
    max_depth: usize,
) -> Result<KeyValue, KeyError> {
    if depth >= max_depth {
        return Err(KeyError::TooDeep { limit: max_depth });
    }

    let mut items = Vec::new();
    while let Some(child) = decode_child(buf, depth, max_depth)? {
        items.push(child);
    }

    match t {
        tag::SET => Ok(KeyValue::Set(items)),
        tag::LIST => Ok(KeyValue::List(items)),
        _ => {
            if items.len() % 2 != 0 {
                return Err(KeyError::Malformed(
                    "map ended after a key with no value".into(),
                ));
            }
            let mut pairs = Vec::with_capacity(items.len() / 2);
            let mut it = items.into_iter();
            while let (Some(k), Some(v)) = (it.next(), it.next()) {
                pairs.push((k, v));
            }
            Ok(KeyValue::Map(pairs))
        }
    }
}

/// Reads one embedded child, or `None` at the composite's terminator.
fn decode_child(
    buf: &mut impl Buf,
    depth: usize,
    max_depth: usize,
) -> Result<Option<KeyValue>, KeyError> {
    if !buf.has_remaining() {
        return Err(KeyError::Malformed("composite is missing its terminator".into()));
    }

    let t = buf.get_u8();
    let child = match t {
        tag::TERMINATOR => return Ok(None),
        tag::BOTTOM => KeyValue::Bottom,
        tag::NULL => KeyValue::Null,
        tag::FALSE => KeyValue::Bool(false),
        tag::TRUE => KeyValue::Bool(true),
        tag::NEG_INFINITY => KeyValue::Number(f64::NEG_INFINITY),
        tag::POS_INFINITY => KeyValue::Number(f64::INFINITY),
        tag::NEG_NUMBER => KeyValue::Number(read_negative(buf)?),
        tag::POS_NUMBER => KeyValue::Number(read_non_negative(buf)?),
        tag::NEG_DATE => KeyValue::Date(read_negative(buf)?),
        tag::POS_DATE => KeyValue::Date(read_non_negative(buf)?),
        tag::BYTES => KeyValue::Bytes(read_escaped(buf)?),
        tag::TEXT => KeyValue::Text(into_text(read_escaped(buf)?)?),
        tag::CODE => KeyValue::Code(into_text(read_escaped(buf)?)?),
        tag::SET | tag::LIST | tag::MAP => decode_composite(buf, t, depth + 1, max_depth)?,
        tag::HIGH => {
            return Err(KeyError::Malformed(
                "high sentinel inside a composite".into(),
            ));
        }
        unknown => {
            return Err(KeyError::Malformed(format!("unknown tag: 0x{unknown:02X}")));
        }
    };
    Ok(Some(child))
}

fn read_u64(buf: &mut impl Buf) -> Result<u64, KeyError> {
    if buf.remaining() < 8 {
        return Err(KeyError::Malformed(format!(
            "need 8 payload bytes but only {} remaining",
            buf.remaining()
        )));
    }
    Ok(buf.get_u64())
}

/// Reads a POS_NUMBER / POS_DATE payload: raw big-endian bits. The encoder
/// writes infinities as nullary tags and routes negative signs to the NEG
/// tags, so anything non-finite or sign-negative here is non-canonical.
fn read_non_negative(buf: &mut impl Buf) -> Result<f64, KeyError> {
    let f = f64::from_bits(read_u64(buf)?);
    if !f.is_finite() || f.is_sign_negative() {
        return Err(KeyError::Malformed("non-canonical number payload".into()));
    }
    Ok(f)
}

/// Reads a NEG_NUMBER / NEG_DATE payload: the complement of the magnitude
/// bits. The recovered magnitude must be a finite non-negative double.
fn read_negative(buf: &mut impl Buf) -> Result<f64, KeyError> {
    let magnitude = f64::from_bits(!read_u64(buf)?);
    if !magnitude.is_finite() || magnitude.is_sign_negative() {
        return Err(KeyError::Malformed("non-canonical number payload".into()));
    }
    Ok(-magnitude)
}

fn read_remaining(buf: &mut impl Buf) -> Vec<u8> {
    let mut out = vec![0u8; buf.remaining()];
    buf.copy_to_slice(&mut out);
    out
}

/// Reads a shift-escaped payload up to its unescaped terminator.
fn read_escaped(buf: &mut impl Buf) -> Result<Vec<u8>, KeyError> {
    let mut out = Vec::new();
    loop {
        if !buf.has_remaining() {
            return Err(KeyError::Malformed(
                "embedded scalar is missing its terminator".into(),
            ));
        }
        match buf.get_u8() {
            tag::TERMINATOR => return Ok(out),
            tag::ESCAPE => {
                if !buf.has_remaining() {
                    return Err(KeyError::Malformed("truncated escape sequence".into()));
                }
                let escaped = buf.get_u8();
                if escaped < tag::ESCAPE_THRESHOLD {
                    return Err(KeyError::Malformed(format!(
                        "bad escape pair: 0xFF 0x{escaped:02X}"
                    )));
                }
                out.push(escaped);
            }
            shifted => out.push(shifted - 1),
        }
    }
}

fn into_text(bytes: Vec<u8>) -> Result<String, KeyError> {
    String::from_utf8(bytes).map_err(|e| KeyError::Malformed(format!("invalid UTF-8 text: {e}")))
}

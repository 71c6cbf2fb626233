//! The keywise value universe and its total order.

use std::cmp::Ordering;
use std::fmt;

use crate::codec::tag;

/// A value in the keywise universe, one variant per encodable type class.
///
/// Variants are listed in ascending key order. The split of numbers and
/// timestamps into their negative/non-negative tag classes (and booleans
/// into FALSE/TRUE) happens at tag-assignment time, not here.
#[derive(Debug, Clone)]
pub enum KeyValue {
    /// The absent value, below everything else.
    Bottom,
    /// The explicit null value.
    Null,
    Bool(bool),
    /// A double-precision number. `±infinity` are admissible and take the
    /// nullary infinity tags; NaN fails encoding.
    Number(f64),
    /// Milliseconds from the Unix epoch as a double. Non-finite timestamps
    /// fail encoding.
    Date(f64),
    /// An opaque byte string, ordered bitwise.
    Bytes(Vec<u8>),
    /// A Unicode string, ordered by its UTF-8 byte form.
    Text(String),
    /// An unordered multiset. Elements are canonically sorted before
    /// encoding, so permutations of the same members encode identically.
    /// Build with [`KeyValue::set`] to keep the stored order (and so the
    /// value order) aligned with the encoded order.
    Set(Vec<KeyValue>),
    /// An ordered sequence, position-significant.
    List(Vec<KeyValue>),
    /// An ordered sequence of key/value pairs, encoded in stored order.
    /// [`KeyValue::record`] builds the canonical string-keyed flavor.
    Map(Vec<(KeyValue, KeyValue)>),
    /// An executable value, carried and ordered by its canonical textual
    /// form. Revival into something runnable is the caller's business.
    Code(String),
    /// The exclusive-maximum sentinel. Never encodable from user input;
    /// range upper bounds come from [`crate::range::prefix_range`].
    High,
}

impl KeyValue {
    /// Builds a canonical set: elements sorted into the key order, with
    /// duplicates kept (multiset semantics).
    pub fn set(mut items: Vec<KeyValue>) -> KeyValue {
        items.sort();
        KeyValue::Set(items)
    }

    /// Builds an ordered map, preserving the given pair order.
    pub fn map(pairs: Vec<(KeyValue, KeyValue)>) -> KeyValue {
        KeyValue::Map(pairs)
    }

    /// Builds a string-keyed record with keys in ascending text order, the
    /// canonical flavor for record-like sources.
    pub fn record(mut pairs: Vec<(String, KeyValue)>) -> KeyValue {
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        KeyValue::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (KeyValue::Text(k), v))
                .collect(),
        )
    }

    /// Returns the value as a string slice, if it is a `Text` variant.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an f64, if it is a `Number` variant.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this value is a composite (set, list, or map).
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Set(_) | Self::List(_) | Self::Map(_))
    }

    /// The tag byte this value encodes under.
    ///
    /// Sign-carrying variants resolve their tag from the payload sign, so
    /// the rank used by [`Ord`] can never drift from the wire format.
    pub(crate) fn order_tag(&self) -> u8 {
        match self {
            Self::Bottom => tag::BOTTOM,
            Self::Null => tag::NULL,
            Self::Bool(false) => tag::FALSE,
            Self::Bool(true) => tag::TRUE,
            Self::Number(n) => {
                if *n == f64::NEG_INFINITY {
                    tag::NEG_INFINITY
                } else if *n == f64::INFINITY {
                    tag::POS_INFINITY
                } else if n.is_sign_negative() {
                    tag::NEG_NUMBER
                } else {
                    tag::POS_NUMBER
                }
            }
            Self::Date(ms) => {
                if ms.is_sign_negative() {
                    tag::NEG_DATE
                } else {
                    tag::POS_DATE
                }
            }
            Self::Bytes(_) => tag::BYTES,
            Self::Text(_) => tag::TEXT,
            Self::Set(_) => tag::SET,
            Self::List(_) => tag::LIST,
            Self::Map(_) => tag::MAP,
            Self::Code(_) => tag::CODE,
            Self::High => tag::HIGH,
        }
    }
}

impl Ord for KeyValue {
    /// The total order the encoding realizes: tag byte first, then the
    /// payload order of that type class. Sequences compare componentwise
    /// with a shorter prefix sorting first, matching the terminator byte
    /// sorting below every tag.
    fn cmp(&self, other: &Self) -> Ordering {
        let by_tag = self.order_tag().cmp(&other.order_tag());
        if by_tag != Ordering::Equal {
            return by_tag;
        }
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.total_cmp(b),
            (Self::Bytes(a), Self::Bytes(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Set(a), Self::Set(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) => a.cmp(b),
            (Self::Map(a), Self::Map(b)) => a.cmp(b),
            (Self::Code(a), Self::Code(b)) => a.cmp(b),
            // Equal tags with no payload: nullary variants.
            _ => Ordering::Equal,
        }
    }
}

impl PartialOrd for KeyValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Equality follows the total order, so `-0.0` and `0.0` are distinct keys
/// (they take different tags) exactly as their encodings are distinct.
impl PartialEq for KeyValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyValue {}

// -- Convenience conversions --

impl From<bool> for KeyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for KeyValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for KeyValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for KeyValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<String> for KeyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for KeyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<Vec<u8>> for KeyValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<Vec<KeyValue>> for KeyValue {
    fn from(items: Vec<KeyValue>) -> Self {
        Self::List(items)
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bottom => write!(f, "bottom"),
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(ms) => write!(f, "date({ms})"),
            Self::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Self::Text(s) => write!(f, "\"{s}\""),
            Self::Set(items) => {
                write!(f, "set(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(pairs) => {
                write!(f, "{{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Self::Code(s) => write!(f, "code({s})"),
            Self::High => write!(f, "high"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_rank_follows_the_universe_order() {
        let ascending = [
            KeyValue::Bottom,
            KeyValue::Null,
            KeyValue::Bool(false),
            KeyValue::Bool(true),
            KeyValue::Number(f64::NEG_INFINITY),
            KeyValue::Number(-1.0),
            KeyValue::Number(0.0),
            KeyValue::Number(f64::INFINITY),
            KeyValue::Date(-1.0),
            KeyValue::Date(1.0),
            KeyValue::Bytes(vec![]),
            KeyValue::Text(String::new()),
            KeyValue::Set(vec![]),
            KeyValue::List(vec![]),
            KeyValue::Map(vec![]),
            KeyValue::Code(String::new()),
            KeyValue::High,
        ];
        for pair in ascending.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort below {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn negative_zero_sorts_between_negatives_and_zero() {
        let neg = KeyValue::Number(-1.0e-300);
        let neg_zero = KeyValue::Number(-0.0);
        let zero = KeyValue::Number(0.0);
        assert!(neg < neg_zero);
        assert!(neg_zero < zero);
        assert_ne!(neg_zero, zero);
    }

    #[test]
    fn negatives_order_by_value_not_magnitude() {
        assert!(KeyValue::Number(-1.0e9) < KeyValue::Number(-1.0));
        assert!(KeyValue::Date(-1.0e9) < KeyValue::Date(-1.0));
    }

    #[test]
    fn shorter_list_sorts_before_its_extension() {
        let short = KeyValue::List(vec![KeyValue::from("a")]);
        let long = KeyValue::List(vec![KeyValue::from("a"), KeyValue::from("b")]);
        assert!(short < long);
    }

    #[test]
    fn record_sorts_keys_ascending() {
        let rec = KeyValue::record(vec![
            ("b".to_owned(), KeyValue::from(2)),
            ("a".to_owned(), KeyValue::from(1)),
        ]);
        match rec {
            KeyValue::Map(pairs) => {
                assert_eq!(pairs[0].0, KeyValue::from("a"));
                assert_eq!(pairs[1].0, KeyValue::from("b"));
            }
            other => panic!("expected a map, got {other}"),
        }
    }

    #[test]
    fn set_constructor_canonicalizes() {
        let a = KeyValue::set(vec![KeyValue::from(2), KeyValue::from(1)]);
        let b = KeyValue::set(vec![KeyValue::from(1), KeyValue::from(2)]);
        assert_eq!(a, b);
    }
}

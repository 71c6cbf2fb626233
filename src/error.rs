//! Error types for the keywise codec.

/// Errors that can occur while encoding or decoding keys.
///
/// Both directions are all-or-nothing: a failing call produces no partial
/// output, and there is no recovery step beyond rejecting the offending key.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    /// Input contains a value the codec refuses: a NaN number, a non-finite
    /// timestamp, or the high sentinel.
    #[error("bad value: {0}")]
    BadValue(String),

    /// A host runtime value with no variant in the key universe. The
    /// [`KeyValue`](crate::types::KeyValue) enum is closed, so the codec
    /// itself never produces this; it is reserved for embedding layers that
    /// map foreign values into the universe.
    #[error("unsupported value: {0}")]
    Unsupported(String),

    /// Decode input is not a valid keywise encoding.
    #[error("malformed encoding: {0}")]
    Malformed(String),

    /// Composite nesting exceeded the configured depth limit.
    #[error("nesting exceeds the depth limit of {limit}")]
    TooDeep { limit: usize },
}

//! keywise — an order-preserving binary key encoding.
//!
//! This crate defines a total order over a closed universe of structured
//! values and encodes them so that unsigned bytewise comparison of two
//! encodings equals the total order of the values. On top of a key/value
//! store whose only native ordering is memcmp, that turns range scans,
//! prefix queries, and componentwise joins over structured keys into plain
//! byte-range operations, with no indexing logic in the store.
//!
//! # Architecture
//!
//! - **`types`** — The [`KeyValue`] universe and its total order
//! - **`codec`** — Tag table, encoder, decoder, and the bytewise comparator
//! - **`range`** — Half-open scan bounds over composite prefixes
//! - **`error`** — Typed failure conditions
//!
//! # Example
//!
//! ```
//! use keywise::{compare, decode, encode, KeyValue};
//!
//! let a = encode(&KeyValue::List(vec![KeyValue::from("user"), KeyValue::from(1)]))?;
//! let b = encode(&KeyValue::List(vec![KeyValue::from("user"), KeyValue::from(2)]))?;
//! assert!(compare(&a, &b).is_lt());
//! assert_eq!(
//!     decode(&a)?,
//!     KeyValue::List(vec![KeyValue::from("user"), KeyValue::from(1)]),
//! );
//! # Ok::<(), keywise::KeyError>(())
//! ```

pub mod codec;
pub mod error;
pub mod range;
pub mod types;

pub use codec::{compare, decode, encode, Codec};
pub use error::KeyError;
pub use types::KeyValue;

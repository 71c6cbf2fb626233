//! Key value types.

mod value;

pub use value::KeyValue;

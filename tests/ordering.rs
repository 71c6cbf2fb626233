//! End-to-end ordering and codec properties.

use std::cmp::Ordering;

use keywise::{compare, decode, encode, KeyValue};
use proptest::prelude::*;

/// The reference sequence, listed in ascending key order.
fn reference_order() -> Vec<KeyValue> {
    vec![
        KeyValue::Bottom,
        KeyValue::Null,
        KeyValue::Bool(false),
        KeyValue::Bool(true),
        KeyValue::Number(f64::NEG_INFINITY),
        KeyValue::Number(-1.1),
        KeyValue::Number(42.0),
        // 2000-01-01T00:00:00Z
        KeyValue::Date(946_684_800_000.0),
        KeyValue::Text(String::new()),
        KeyValue::from("foo √"),
        KeyValue::List(vec![]),
        KeyValue::List(vec![KeyValue::Bottom]),
        KeyValue::List(vec![
            KeyValue::record(vec![("bar".to_owned(), KeyValue::from(1))]),
            KeyValue::record(vec![(
                "bar".to_owned(),
                KeyValue::List(vec![KeyValue::from("baz")]),
            )]),
        ]),
        KeyValue::Map(vec![]),
        KeyValue::record(vec![("bar".to_owned(), KeyValue::from(1))]),
    ]
}

#[test]
fn bytewise_sort_recovers_the_reference_order() {
    let values = reference_order();

    let mut encoded: Vec<Vec<u8>> = values.iter().map(|v| encode(v).unwrap()).collect();
    encoded.reverse();
    encoded.sort_by(|a, b| compare(a, b));

    let sorted: Vec<KeyValue> = encoded.iter().map(|b| decode(b).unwrap()).collect();
    assert_eq!(sorted, values);
}

#[test]
fn reference_order_is_strictly_ascending() {
    let values = reference_order();
    for pair in values.windows(2) {
        let a = encode(&pair[0]).unwrap();
        let b = encode(&pair[1]).unwrap();
        assert_eq!(
            compare(&a, &b),
            Ordering::Less,
            "{} should encode below {}",
            pair[0],
            pair[1]
        );
    }
}

// -- Arbitrary keys --

fn arb_number() -> impl Strategy<Value = KeyValue> {
    prop_oneof![
        any::<f64>()
            .prop_filter("NaN is not encodable", |n| !n.is_nan())
            .prop_map(KeyValue::Number),
        Just(KeyValue::Number(-0.0)),
        Just(KeyValue::Number(0.0)),
        Just(KeyValue::Number(f64::NEG_INFINITY)),
        Just(KeyValue::Number(f64::INFINITY)),
    ]
}

fn arb_date() -> impl Strategy<Value = KeyValue> {
    // The representable-timestamp window, ±100M days around the epoch.
    (-8.64e15..8.64e15).prop_map(KeyValue::Date)
}

fn arb_key() -> impl Strategy<Value = KeyValue> {
    let leaf = prop_oneof![
        Just(KeyValue::Bottom),
        Just(KeyValue::Null),
        any::<bool>().prop_map(KeyValue::Bool),
        arb_number(),
        arb_date(),
        proptest::collection::vec(any::<u8>(), 0..24).prop_map(KeyValue::Bytes),
        ".*".prop_map(KeyValue::Text),
        ".*".prop_map(KeyValue::Code),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(KeyValue::set),
            proptest::collection::vec(inner.clone(), 0..6).prop_map(KeyValue::List),
            proptest::collection::vec((inner.clone(), inner), 0..4).prop_map(KeyValue::Map),
        ]
    })
}

proptest! {
    #[test]
    fn round_trip(key in arb_key()) {
        let encoded = encode(&key).unwrap();
        let decoded = decode(&encoded).unwrap();
        prop_assert_eq!(decoded, key);
    }

    #[test]
    fn byte_order_equals_value_order(a in arb_key(), b in arb_key()) {
        let ea = encode(&a).unwrap();
        let eb = encode(&b).unwrap();
        prop_assert_eq!(compare(&ea, &eb), a.cmp(&b));
    }

    #[test]
    fn compare_is_reflexive_and_antisymmetric(a in arb_key(), b in arb_key()) {
        let ea = encode(&a).unwrap();
        let eb = encode(&b).unwrap();
        prop_assert_eq!(compare(&ea, &ea), Ordering::Equal);
        prop_assert_eq!(compare(&ea, &eb), compare(&eb, &ea).reverse());
    }

    #[test]
    fn sorting_by_bytes_matches_sorting_by_value(keys in proptest::collection::vec(arb_key(), 0..12)) {
        let mut by_value = keys.clone();
        by_value.sort();

        let mut by_bytes: Vec<Vec<u8>> = keys.iter().map(|k| encode(k).unwrap()).collect();
        by_bytes.sort_by(|x, y| compare(x, y));
        let decoded: Vec<KeyValue> = by_bytes.iter().map(|b| decode(b).unwrap()).collect();

        prop_assert_eq!(decoded, by_value);
    }

    #[test]
    fn set_encodings_are_permutation_invariant(
        items in proptest::collection::vec(arb_key(), 0..6).prop_shuffle()
    ) {
        let mut reversed = items.clone();
        reversed.reverse();
        let a = encode(&KeyValue::Set(items)).unwrap();
        let b = encode(&KeyValue::Set(reversed)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn embedded_scalars_stay_recoverable(payload in proptest::collection::vec(any::<u8>(), 0..64)) {
        // Escaping inside a composite must not lose payload bytes.
        let key = KeyValue::List(vec![KeyValue::Bytes(payload.clone())]);
        match decode(&encode(&key).unwrap()).unwrap() {
            KeyValue::List(items) => match items.as_slice() {
                [KeyValue::Bytes(recovered)] => prop_assert_eq!(recovered, &payload),
                other => prop_assert!(false, "unexpected children: {}", other.len()),
            },
            other => prop_assert!(false, "expected a list, got {}", other),
        }
    }
}

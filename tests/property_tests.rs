//! Property-based tests for the round-trip guarantees.
//!
//! Generated value trees stay within what WSON can write: finite floats, four-digit
//! years, whole-second timestamps and strings free of quotes and comment markers.

use chrono::NaiveDate;
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_wson::{
    classify, from_str, parse, serialize, split_top_level, strip_comments, to_string, Value,
    Version, WsonMap,
};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Wrapper<T> {
    value: T,
}

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: T,
) -> bool {
    let wrapped = Wrapper { value };
    match to_string(&wrapped) {
        Ok(serialized) => match from_str::<Wrapper<T>>(&serialized) {
            Ok(deserialized) => wrapped == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

fn key() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}"
}

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,:=.{}\\[\\]-]{0,12}"
}

fn finite_float() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO
}

fn date() -> impl Strategy<Value = NaiveDate> {
    (0i32..=9999, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default())
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        finite_float().prop_map(Value::Float),
        text().prop_map(Value::String),
        date().prop_map(Value::Date),
        (date(), 0u32..24, 0u32..60, 0u32..60).prop_map(|(d, h, m, s)| {
            Value::DateTime(d.and_hms_opt(h, m, s).unwrap_or_default())
        }),
        prop::collection::vec(any::<u64>(), 3..6)
            .prop_filter_map("version needs three components", |parts| {
                Version::new(parts).map(Value::Version)
            }),
    ]
}

fn object(inner: impl Strategy<Value = Value>) -> impl Strategy<Value = WsonMap> {
    prop::collection::vec((key(), inner), 0..6).prop_map(|entries| entries.into_iter().collect())
}

fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(3, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            object(inner).prop_map(Value::Object),
        ]
    })
}

proptest! {
    #[test]
    fn prop_document_round_trip(map in object(value())) {
        let text = serialize(&map).unwrap();
        let parsed = parse(&text);
        prop_assert!(parsed.is_ok(), "failed to parse:\n{}", text);
        prop_assert_eq!(parsed.unwrap(), map);
    }

    #[test]
    fn prop_serialize_is_canonical(map in object(value())) {
        let text = serialize(&map).unwrap();
        prop_assert_eq!(serialize(&parse(&text).unwrap()).unwrap(), text);
    }

    #[test]
    fn prop_strip_keeps_line_count(input in "[a-z /*#\n]{0,60}") {
        let stripped = strip_comments(&input);
        prop_assert_eq!(stripped.split('\n').count(), input.lines().count().max(1));
    }

    #[test]
    fn prop_split_recovers_items(items in prop::collection::vec(any::<i64>(), 1..10)) {
        let joined = items.iter().map(i64::to_string).collect::<Vec<_>>().join(", ");
        let segments = split_top_level(&joined).unwrap();
        prop_assert_eq!(segments.len(), items.len());
        for (segment, item) in segments.iter().zip(&items) {
            prop_assert_eq!(classify(segment).unwrap(), Value::Int(*item));
        }
    }

    #[test]
    fn prop_nested_commas_stay_together(a in any::<i32>(), b in any::<i32>()) {
        let span = format!("{}, {{x = {}, y = {}}}, [{}, {}]", a, a, b, a, b);
        prop_assert_eq!(split_top_level(&span).unwrap().len(), 3);
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(n));
    }

    #[test]
    fn prop_f64(f in finite_float()) {
        prop_assert!(roundtrip(f));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(b));
    }

    #[test]
    fn prop_string(s in text()) {
        prop_assert!(roundtrip(s));
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(opt));
    }

    #[test]
    fn prop_tuple_i32_bool(t in (any::<i32>(), any::<bool>())) {
        prop_assert!(roundtrip(t));
    }

    #[test]
    fn prop_date(d in date()) {
        prop_assert!(roundtrip(d));
    }
}

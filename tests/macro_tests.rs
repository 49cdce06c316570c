use chrono::NaiveDate;
use serde_wson::{parse, serialize_value, wson, Value, WsonMap};

#[test]
fn test_wson_macro_null() {
    assert_eq!(wson!(null), Value::Null);
}

#[test]
fn test_wson_macro_booleans() {
    assert_eq!(wson!(true), Value::Bool(true));
    assert_eq!(wson!(false), Value::Bool(false));
}

#[test]
fn test_wson_macro_numbers() {
    assert_eq!(wson!(42), Value::Int(42));
    assert_eq!(wson!(3.5), Value::Float(3.5));
    assert_eq!(wson!(-123), Value::Int(-123));
}

#[test]
fn test_wson_macro_strings() {
    assert_eq!(wson!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(wson!(""), Value::String(String::new()));
}

#[test]
fn test_wson_macro_arrays() {
    assert_eq!(wson!([]), Value::Array(vec![]));
    assert_eq!(
        wson!([1, "hello", true, null]),
        Value::Array(vec![
            Value::Int(1),
            Value::String("hello".to_string()),
            Value::Bool(true),
            Value::Null,
        ])
    );
}

#[test]
fn test_wson_macro_objects() {
    assert_eq!(wson!({}), Value::Object(WsonMap::new()));

    let object = wson!({
        "name": "Alice",
        "age": 30,
    });
    let map = object.as_object().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("name"), Some(&Value::from("Alice")));
    assert_eq!(map.get("age"), Some(&Value::Int(30)));
}

#[test]
fn test_wson_macro_extended_scalars() {
    let day = NaiveDate::from_ymd_opt(2024, 10, 9).unwrap();
    let value = wson!({ "day": day, "at": (day.and_hms_opt(9, 0, 0).unwrap()) });
    assert_eq!(value.get("day"), Some(&Value::String("2024-10-09".to_string())));
    assert!(value.get("at").unwrap().is_string());

    let native = wson!({ "day": (Value::Date(day)) });
    assert_eq!(native.get("day"), Some(&Value::Date(day)));
}

#[test]
fn test_wson_macro_matches_parsed_document() {
    let built = wson!({
        "status": "ok",
        "items": [{ "id": 1 }, { "id": 2 }],
        "meta": { "empty": null }
    });
    let parsed = parse(
        "{ status = \"ok\", items = [{ id = 1 }, { id = 2 }], meta = { empty = } }",
    )
    .unwrap();
    assert_eq!(built, Value::Object(parsed));

    let text = serialize_value(&built).unwrap();
    assert_eq!(Value::Object(parse(&text).unwrap()), built);
}

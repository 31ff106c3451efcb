//! Integration tests for destruct-value.

use destruct_value::{Sequence, Value, ValueError, number_to_key};
use pretty_assertions::assert_eq;

#[test]
fn test_missing_and_nullish() {
    assert!(Value::Undefined.is_missing());
    assert!(!Value::Null.is_missing());
    assert!(Value::Null.is_nullish());
    for falsy in [Value::from(0), Value::from(false), Value::from("")] {
        assert!(!falsy.is_missing());
        assert!(!falsy.is_nullish());
    }
}

#[test]
fn test_iteration_orders() {
    let chars: Vec<Value> = Value::from("héllo").iter_values().unwrap().collect();
    assert_eq!(chars.len(), 5);
    assert_eq!(chars[1], Value::from("é"));

    let set: Vec<Value> = Value::set([Value::from(3), Value::from(1), Value::from(3)])
        .iter_values()
        .unwrap()
        .collect();
    assert_eq!(set, vec![Value::from(3), Value::from(1)]);
}

#[test]
fn test_not_iterable() {
    let err = Value::Null.iter_values().err();
    assert_eq!(err, Some(ValueError::NotIterable { type_name: "null" }));
    assert!(!Value::object([("a", Value::from(1))]).is_iterable());
}

#[test]
fn test_sequence_shared_between_clones() {
    let seq = Sequence::naturals(1.0);
    let value = Value::from(seq.clone());
    let first: Vec<Value> = value.iter_values().unwrap().take(2).collect();
    assert_eq!(first, vec![Value::from(1), Value::from(2)]);
    // A second iterator continues where the first stopped.
    let next = value.iter_values().unwrap().next();
    assert_eq!(next, Some(Value::from(3)));
    assert_eq!(seq.pulled(), 3);
}

#[test]
fn test_property_lookup() {
    let arr = Value::array([Value::from("a"), Value::from("b")]);
    assert_eq!(arr.property("1").unwrap(), Value::from("b"));
    assert_eq!(arr.property("2").unwrap(), Value::Undefined);
    assert_eq!(arr.property("length").unwrap(), Value::from(2));
    assert_eq!(
        Value::Undefined.property("x"),
        Err(ValueError::NullishLookup { type_name: "undefined" })
    );
}

#[test]
fn test_set_property_grows_arrays() {
    let arr = Value::array(Vec::new());
    arr.set_property("2", Value::from(true)).unwrap();
    assert_eq!(
        arr.as_array().unwrap(),
        vec![Value::Undefined, Value::Undefined, Value::from(true)]
    );
    assert!(Value::from("s").set_property("0", Value::Null).is_err());
}

#[test]
fn test_property_keys() {
    assert_eq!(number_to_key(1.0), "1");
    assert_eq!(number_to_key(1.5), "1.5");
    assert_eq!(Value::from(true).to_property_key(), "true");
    assert_eq!(Value::Null.to_property_key(), "null");
}

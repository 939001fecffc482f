//! Test key extraction from record values.

use crate::number::{InvalidKeyInput, NumberKey};
use crate::types::{Value, ValueType};

#[test]
fn test_populate_overwrites_previous_state() {
    let mut key = NumberKey::default();
    key.populate_from(1, &[Value::Double(1.0)]).expect("valid input");
    key.populate_from(2, &[Value::Int(-4)]).expect("valid input");

    assert_eq!(key.value, -4.0);
    assert_eq!(key.entity_id, 2);
    assert!(!key.is_highest);
}

#[test]
fn test_populate_rejects_empty() {
    let mut key = NumberKey::default();
    assert_eq!(
        key.populate_from(1, &[]),
        Err(InvalidKeyInput::WrongArity(0))
    );
}

#[test]
fn test_populate_rejects_two_fields() {
    let mut key = NumberKey::default();
    assert_eq!(
        key.populate_from(1, &[Value::Double(1.0), Value::Double(2.0)]),
        Err(InvalidKeyInput::WrongArity(2))
    );
}

#[test]
fn test_populate_rejects_non_numeric() {
    let mut key = NumberKey::default();
    for (value, value_type) in [
        (Value::String("3.5".to_string()), ValueType::String),
        (Value::Boolean(true), ValueType::Boolean),
        (Value::Null, ValueType::Null),
    ] {
        assert_eq!(
            key.populate_from(1, &[value]),
            Err(InvalidKeyInput::NotNumeric(value_type))
        );
    }
}

#[test]
fn test_populate_never_sets_highest() {
    let mut key = NumberKey::default();
    for value in [
        Value::Double(f64::INFINITY),
        Value::Double(f64::MAX),
        Value::Long(i64::MAX),
    ] {
        key.populate_from(i64::MAX, &[value]).expect("valid input");
        assert!(!key.is_highest);
    }
}

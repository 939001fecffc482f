//! Single-number extraction from a record's value fields.

use crate::types::{Value, ValueType};

/// Return the only value in `values`, which must be numeric.
pub fn single_number(values: &[Value]) -> Result<&Value, InvalidKeyInput> {
    let [value] = values else {
        return Err(InvalidKeyInput::WrongArity(values.len()));
    };
    if !value.is_number() {
        return Err(InvalidKeyInput::NotNumeric(value.value_type()));
    }
    Ok(value)
}

/// Project the only value in `values` onto its `f64` comparison value.
pub fn single_number_as_f64(values: &[Value]) -> Result<f64, InvalidKeyInput> {
    let value = single_number(values)?;
    value
        .as_f64()
        .ok_or_else(|| InvalidKeyInput::NotNumeric(value.value_type()))
}

/// Key input that a numeric index cannot hold.
///
/// Always a caller bug; never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKeyInput {
    /// Numeric keys take exactly one value; carries the number supplied.
    WrongArity(usize),
    /// The single value was not a number.
    NotNumeric(ValueType),
}

impl std::fmt::Display for InvalidKeyInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongArity(count) => {
                write!(f, "invalid key input: expected exactly 1 value, got {count}")
            }
            Self::NotNumeric(value_type) => {
                write!(f, "invalid key input: expected a number, got {value_type:?}")
            }
        }
    }
}

impl std::error::Error for InvalidKeyInput {}

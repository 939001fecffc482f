//! Exact number payload stored next to each numeric key.
//!
//! The key compares by `f64`, so two longs above 2^53 can share one key
//! value. The entry keeps the exact number so scans can drop such accidental
//! matches.

use crate::number::extract::{InvalidKeyInput, single_number};
use crate::types::Value;

/// Numeric domain of the stored raw bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberType {
    /// Two's complement `i64`.
    #[default]
    Integral,
    /// IEEE-754 bits of an `f64`.
    Floating,
    /// A tag no numeric layout writes. Kept as read so the bytes are never
    /// reinterpreted as another type.
    Unknown(u8),
}

impl NumberType {
    const INTEGRAL_TAG: u8 = 0;
    const FLOATING_TAG: u8 = 1;

    #[must_use]
    pub const fn from_tag(tag: u8) -> Self {
        match tag {
            Self::INTEGRAL_TAG => Self::Integral,
            Self::FLOATING_TAG => Self::Floating,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Integral => Self::INTEGRAL_TAG,
            Self::Floating => Self::FLOATING_TAG,
            Self::Unknown(tag) => tag,
        }
    }
}

/// Exact value of an indexed number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberValue {
    pub number_type: NumberType,
    pub raw_bits: u64,
}

impl NumberValue {
    /// Serialized width: type (1) + raw bits (8).
    pub const SIZE: usize = 1 + 8;

    /// Overwrite from a record's indexed values.
    pub fn populate_from(&mut self, values: &[Value]) -> Result<(), InvalidKeyInput> {
        let value = single_number(values)?;
        *self =
            Self::of(value).ok_or_else(|| InvalidKeyInput::NotNumeric(value.value_type()))?;
        Ok(())
    }

    /// Exact representation of a numeric value, `None` for anything else.
    #[must_use]
    pub fn of(value: &Value) -> Option<Self> {
        if let Some(n) = value.as_i64() {
            return Some(Self {
                number_type: NumberType::Integral,
                raw_bits: u64::from_le_bytes(n.to_le_bytes()),
            });
        }
        match value {
            Value::Float(n) => Some(Self {
                number_type: NumberType::Floating,
                raw_bits: f64::from(*n).to_bits(),
            }),
            Value::Double(n) => Some(Self {
                number_type: NumberType::Floating,
                raw_bits: n.to_bits(),
            }),
            _ => None,
        }
    }

    /// Whether `value` is exactly the number this payload was built from.
    ///
    /// A payload with an unknown type matches nothing.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        Self::of(value).is_some_and(|other| other == *self)
    }

    pub(crate) fn write_to(&self, buf: &mut [u8]) {
        buf[0] = self.number_type.tag();
        buf[1..Self::SIZE].copy_from_slice(&self.raw_bits.to_le_bytes());
    }

    pub(crate) fn read_from(&mut self, buf: &[u8]) {
        self.number_type = NumberType::from_tag(buf[0]);
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&buf[1..Self::SIZE]);
        self.raw_bits = u64::from_le_bytes(raw);
    }
}

//! Numeric index key.

use crate::layout::IndexKey;
use crate::number::extract::{InvalidKeyInput, single_number_as_f64};
use crate::types::Value;

/// Comparison value plus entity id, so equal numbers stay addressable in
/// non-unique indexes.
///
/// The comparison value is the number as `f64`, which is lossy for large
/// longs. The exact number travels in the entry's
/// [`NumberValue`](crate::number::NumberValue).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberKey {
    pub value: f64,
    pub entity_id: i64,
    /// Sorts this key above every other key, including one with an equal
    /// `value`.
    ///
    /// Range scans have an exclusive upper bound, so without this flag an
    /// entry holding `+∞` could never be reached. In-memory only: never
    /// serialized.
    pub is_highest: bool,
}

impl NumberKey {
    /// Serialized width: comparison value bits (8) + entity id (8).
    pub const SIZE: usize = 8 + 8;

    /// Overwrite this key from an entity id and its indexed values.
    ///
    /// On error the key is left unchanged.
    pub fn populate_from(
        &mut self,
        entity_id: i64,
        values: &[Value],
    ) -> Result<(), InvalidKeyInput> {
        self.value = single_number_as_f64(values)?;
        self.entity_id = entity_id;
        self.is_highest = false;
        Ok(())
    }

    /// Comparison value only, for index diagnostics.
    #[must_use]
    pub fn properties_as_string(&self) -> String {
        self.value.to_string()
    }
}

impl IndexKey for NumberKey {
    fn init_as_lowest(&mut self) {
        self.value = f64::NEG_INFINITY;
        self.entity_id = i64::MIN;
        self.is_highest = false;
    }

    fn init_as_highest(&mut self) {
        self.value = f64::INFINITY;
        self.entity_id = i64::MAX;
        self.is_highest = true;
    }
}

impl std::fmt::Display for NumberKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "compareValue={},entityId={}", self.value, self.entity_id)
    }
}

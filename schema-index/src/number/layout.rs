//! Layouts for numeric indexes.
//!
//! Both orderings share one key shape and one byte format; they differ only
//! in how keys with equal numbers are ordered.
//!
//! # Key Format
//!
//! Keys are 16 bytes: `(value: f64 bits LE [8], entity_id: i64 LE [8])`.
//! The `is_highest` flag is not part of the format.
//!
//! # Value Format
//!
//! Values are 9 bytes: `(number_type: u8, raw_bits: u64 LE [8])`.

// NumberKey::SIZE is a compile-time constant that fits in u32.
#![allow(clippy::cast_possible_truncation)]

use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::layout::{Layout, named_identifier};
use crate::number::key::NumberKey;
use crate::number::value::NumberValue;

/// Tie-break policy applied when two keys hold the same number.
pub trait NumberOrdering: Send + Sync + 'static {
    /// Layout identifier tag, at most four ASCII characters.
    const TAG: &'static str;
    /// Whether equal keys name the same entry.
    const UNIQUE: bool;

    /// Order two keys whose values are equal and of which neither, or both,
    /// are the highest sentinel.
    fn tie_break(a: &NumberKey, b: &NumberKey) -> Ordering;
}

/// At most one entry per number. Entity ids are ignored.
///
/// Numbers are compared by their `f64` projection, so distinct longs beyond
/// 2^53 that project to the same `f64` are one key here: a unique index holds
/// only one of them. The exact payload only filters scan results.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unique;

/// Any number of entries per number, ordered by entity id.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonUnique;

impl NumberOrdering for Unique {
    const TAG: &'static str = "UNI";
    const UNIQUE: bool = true;

    fn tie_break(_a: &NumberKey, _b: &NumberKey) -> Ordering {
        Ordering::Equal
    }
}

impl NumberOrdering for NonUnique {
    const TAG: &'static str = "NUNI";
    const UNIQUE: bool = false;

    fn tie_break(a: &NumberKey, b: &NumberKey) -> Ordering {
        a.entity_id.cmp(&b.entity_id)
    }
}

/// Layout of numeric keys under the tie-break policy `O`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberLayout<O> {
    ordering: PhantomData<O>,
}

pub type UniqueNumberLayout = NumberLayout<Unique>;
pub type NonUniqueNumberLayout = NumberLayout<NonUnique>;

impl<O: NumberOrdering> NumberLayout<O> {
    pub const IDENTIFIER: u64 = named_identifier(O::TAG, NumberKey::SIZE as u32);
    pub const MAJOR_VERSION: u32 = 0;
    pub const MINOR_VERSION: u32 = 1;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            ordering: PhantomData,
        }
    }
}

/// Order by number, then by the highest sentinel, then by the policy.
///
/// Numbers use IEEE-754 total ordering, so `-0.0` sorts before `0.0`.
fn compare_number_keys<O: NumberOrdering>(a: &NumberKey, b: &NumberKey) -> Ordering {
    a.value
        .total_cmp(&b.value)
        .then_with(|| match (a.is_highest, b.is_highest) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            _ => O::tie_break(a, b),
        })
}

impl<O: NumberOrdering> Layout for NumberLayout<O> {
    type Key = NumberKey;
    type Value = NumberValue;

    fn key_size(&self) -> usize {
        NumberKey::SIZE
    }

    fn value_size(&self) -> usize {
        NumberValue::SIZE
    }

    fn write_key(&self, key: &NumberKey, buf: &mut [u8]) {
        buf[..8].copy_from_slice(&key.value.to_bits().to_le_bytes());
        buf[8..NumberKey::SIZE].copy_from_slice(&key.entity_id.to_le_bytes());
    }

    fn read_key(&self, buf: &[u8], into: &mut NumberKey) {
        let mut value = [0u8; 8];
        let mut entity_id = [0u8; 8];
        value.copy_from_slice(&buf[..8]);
        entity_id.copy_from_slice(&buf[8..NumberKey::SIZE]);

        into.value = f64::from_bits(u64::from_le_bytes(value));
        into.entity_id = i64::from_le_bytes(entity_id);
        into.is_highest = false;
    }

    fn write_value(&self, value: &NumberValue, buf: &mut [u8]) {
        value.write_to(buf);
    }

    fn read_value(&self, buf: &[u8], into: &mut NumberValue) {
        into.read_from(buf);
    }

    fn compare(&self, a: &NumberKey, b: &NumberKey) -> Ordering {
        compare_number_keys::<O>(a, b)
    }

    fn is_unique(&self) -> bool {
        O::UNIQUE
    }

    fn identifier(&self) -> u64 {
        Self::IDENTIFIER
    }

    fn major_version(&self) -> u32 {
        Self::MAJOR_VERSION
    }

    fn minor_version(&self) -> u32 {
        Self::MINOR_VERSION
    }
}

/// A numeric layout chosen at index configuration time.
#[derive(Debug, Clone, Copy)]
pub enum NumberIndexLayout {
    Unique(UniqueNumberLayout),
    NonUnique(NonUniqueNumberLayout),
}

impl NumberIndexLayout {
    #[must_use]
    pub const fn unique() -> Self {
        Self::Unique(UniqueNumberLayout::new())
    }

    #[must_use]
    pub const fn non_unique() -> Self {
        Self::NonUnique(NonUniqueNumberLayout::new())
    }
}

macro_rules! delegate {
    ($self:ident, $layout:ident => $body:expr) => {
        match $self {
            NumberIndexLayout::Unique($layout) => $body,
            NumberIndexLayout::NonUnique($layout) => $body,
        }
    };
}

impl Layout for NumberIndexLayout {
    type Key = NumberKey;
    type Value = NumberValue;

    fn key_size(&self) -> usize {
        NumberKey::SIZE
    }

    fn value_size(&self) -> usize {
        NumberValue::SIZE
    }

    fn write_key(&self, key: &NumberKey, buf: &mut [u8]) {
        delegate!(self, layout => layout.write_key(key, buf));
    }

    fn read_key(&self, buf: &[u8], into: &mut NumberKey) {
        delegate!(self, layout => layout.read_key(buf, into));
    }

    fn write_value(&self, value: &NumberValue, buf: &mut [u8]) {
        value.write_to(buf);
    }

    fn read_value(&self, buf: &[u8], into: &mut NumberValue) {
        into.read_from(buf);
    }

    fn compare(&self, a: &NumberKey, b: &NumberKey) -> Ordering {
        delegate!(self, layout => layout.compare(a, b))
    }

    fn is_unique(&self) -> bool {
        delegate!(self, layout => layout.is_unique())
    }

    fn identifier(&self) -> u64 {
        delegate!(self, layout => layout.identifier())
    }

    fn major_version(&self) -> u32 {
        delegate!(self, layout => layout.major_version())
    }

    fn minor_version(&self) -> u32 {
        delegate!(self, layout => layout.minor_version())
    }
}

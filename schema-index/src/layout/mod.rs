//! The layout contract between index key shapes and the tree engine.
//!
//! A layout decides, for one key shape:
//! - how many bytes a serialized key (and its value payload) occupies
//! - how keys and values are written to and read from page bytes
//! - how two keys are ordered
//! - how the layout identifies itself in an index header
//!
//! The engine works only through this trait, so numeric, string or composite
//! key shapes can be swapped at index configuration time. Keys are scratch
//! objects: the engine allocates a few per traversal and re-initializes them
//! in place with [`Layout::read_key`], [`IndexKey::init_as_lowest`] and
//! [`IndexKey::init_as_highest`].
//!
//! # Invariants
//!
//! - `key_size()` and `value_size()` are constants of the layout.
//! - `compare` is a total order over every key the engine can build,
//!   including both sentinels.
//! - Sentinel state is never written: `read_key(write_key(highest))` yields a
//!   plain key.

mod identity;

use std::cmp::Ordering;
use std::fmt::Display;

pub use identity::{MAX_TAG_LEN, describe_identifier, named_identifier};

/// A reusable in-memory key.
pub trait IndexKey: Default + Display {
    /// Reset to the key that sorts at or before every other key.
    fn init_as_lowest(&mut self);

    /// Reset to the key that sorts after every other key.
    ///
    /// Used as the exclusive upper bound of an unbounded range scan.
    fn init_as_highest(&mut self);

    /// Diagnostic rendering for logs. Not used for ordering or persistence.
    #[must_use]
    fn describe(&self) -> String {
        self.to_string()
    }
}

/// Key encoding and ordering for one index key shape.
///
/// Implementations hold no mutable state and are shared freely between
/// reader threads.
pub trait Layout: Send + Sync {
    type Key: IndexKey;
    type Value: Default;

    /// Serialized key width in bytes.
    fn key_size(&self) -> usize;

    /// Serialized value width in bytes.
    fn value_size(&self) -> usize;

    /// Write `key` into the first `key_size()` bytes of `buf`.
    fn write_key(&self, key: &Self::Key, buf: &mut [u8]);

    /// Overwrite `into` with the key stored in the first `key_size()` bytes of `buf`.
    ///
    /// Only defined for bytes produced by `write_key` of the same layout.
    fn read_key(&self, buf: &[u8], into: &mut Self::Key);

    fn write_value(&self, value: &Self::Value, buf: &mut [u8]);

    fn read_value(&self, buf: &[u8], into: &mut Self::Value);

    fn compare(&self, a: &Self::Key, b: &Self::Key) -> Ordering;

    /// Whether keys comparing equal identify the same entry.
    fn is_unique(&self) -> bool;

    /// Format identifier persisted in the index header.
    fn identifier(&self) -> u64;

    fn major_version(&self) -> u32;

    fn minor_version(&self) -> u32;

    #[must_use]
    fn new_key(&self) -> Self::Key {
        Self::Key::default()
    }

    #[must_use]
    fn new_value(&self) -> Self::Value {
        Self::Value::default()
    }

    /// Serialize a key into a freshly allocated buffer of `key_size()` bytes.
    #[must_use]
    fn serialize_key(&self, key: &Self::Key) -> Vec<u8> {
        let mut buf = vec![0u8; self.key_size()];
        self.write_key(key, &mut buf);
        buf
    }

    /// Deserialize a key into a freshly allocated key.
    #[must_use]
    fn deserialize_key(&self, buf: &[u8]) -> Self::Key {
        let mut key = self.new_key();
        self.read_key(buf, &mut key);
        key
    }
}

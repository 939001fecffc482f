//! Layout identifiers.
//!
//! An identifier packs a short ASCII tag and a 32-bit checksum into a `u64`:
//!
//! ```text
//! | tag byte 0 | tag byte 1 | tag byte 2 | tag byte 3 |  checksum (32 bits)  |
//! ```
//!
//! Tags shorter than four bytes are right-aligned in the upper half, so
//! `"UNI"` and `"NUNI"` never collide. The result is a pure function of its
//! inputs and is stable across processes and platforms.

/// Maximum number of tag characters that fit in the upper half of an identifier.
pub const MAX_TAG_LEN: usize = 4;

/// Build a layout identifier from a short ASCII tag and a checksum.
///
/// Evaluated in const context by the layouts, so an over-long or non-ASCII
/// tag fails the build instead of producing a truncated identifier.
///
/// ```
/// use schema_index::layout::named_identifier;
///
/// let id = named_identifier("UNI", 16);
/// assert_eq!(id >> 32, 0x0055_4E49);
/// assert_eq!(id & 0xFFFF_FFFF, 16);
/// ```
#[must_use]
#[allow(clippy::cast_lossless)] // u64::from is not const
pub const fn named_identifier(tag: &str, checksum: u32) -> u64 {
    let bytes = tag.as_bytes();
    assert!(
        bytes.len() <= MAX_TAG_LEN,
        "layout tag is limited to 4 characters"
    );

    let mut upper: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        assert!(bytes[i].is_ascii(), "layout tag must be ASCII");
        upper = (upper << 8) | bytes[i] as u64;
        i += 1;
    }

    (upper << 32) | checksum as u64
}

/// Render an identifier as `TAG/checksum` for diagnostics.
#[must_use]
pub fn describe_identifier(identifier: u64) -> String {
    let tag: String = (identifier >> 32)
        .to_be_bytes()
        .iter()
        .filter(|b| **b != 0)
        .map(|b| char::from(*b))
        .collect();
    format!("{tag}/{}", identifier & 0xFFFF_FFFF)
}

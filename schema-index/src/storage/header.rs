//! Index header structure and serialization.
//!
//! The header is a fixed-size, checksummed block that records which layout
//! wrote the index. Opening an index with any other layout is refused:
//! reading its bytes under a different key format would silently break the
//! ordering of every entry.

// Key and value sizes are small compile-time constants that fit in u32.
#![allow(clippy::cast_possible_truncation)]

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::layout::{Layout, describe_identifier};

/// Magic number identifying an index header: "SCHMAIDX"
pub const MAGIC: [u8; 8] = *b"SCHMAIDX";

/// Current header format version.
pub const FORMAT_VERSION: u32 = 1;

/// Serialized header size in bytes.
pub const HEADER_SIZE: usize = 64;

/// Header field offsets.
mod offsets {
    pub const MAGIC: usize = 0;
    pub const FORMAT_VERSION: usize = 8;
    pub const CHECKSUM: usize = 12;
    pub const LAYOUT_IDENTIFIER: usize = 16;
    pub const LAYOUT_MAJOR_VERSION: usize = 24;
    pub const LAYOUT_MINOR_VERSION: usize = 28;
    pub const KEY_SIZE: usize = 32;
    pub const VALUE_SIZE: usize = 36;
    pub const ENTRY_COUNT: usize = 40;
    // 48-63: reserved
}

/// Raw header bytes with little-endian field accessors.
struct HeaderBlock([u8; HEADER_SIZE]);

impl HeaderBlock {
    fn u32_at(&self, offset: usize) -> u32 {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&self.0[offset..offset + 4]);
        u32::from_le_bytes(buf)
    }

    fn u64_at(&self, offset: usize) -> u64 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.0[offset..offset + 8]);
        u64::from_le_bytes(buf)
    }

    fn put(&mut self, offset: usize, bytes: &[u8]) {
        self.0[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// CRC32 of the block with the checksum field read as zero.
    fn checksum(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&self.0[..offsets::CHECKSUM]);
        hasher.update(&[0u8; 4]);
        hasher.update(&self.0[offsets::CHECKSUM + 4..]);
        hasher.finalize()
    }
}

/// Identity of the layout an index was written with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IndexHeader {
    /// Layout format identifier.
    pub layout_identifier: u64,
    pub layout_major_version: u32,
    pub layout_minor_version: u32,
    /// Serialized key width in bytes.
    pub key_size: u32,
    /// Serialized value width in bytes.
    pub value_size: u32,
    /// Number of entries in the index.
    pub entry_count: u64,
}

impl IndexHeader {
    /// Create a header for a fresh, empty index written by `layout`.
    #[must_use]
    pub fn for_layout<L: Layout>(layout: &L) -> Self {
        Self {
            layout_identifier: layout.identifier(),
            layout_major_version: layout.major_version(),
            layout_minor_version: layout.minor_version(),
            key_size: layout.key_size() as u32,
            value_size: layout.value_size() as u32,
            entry_count: 0,
        }
    }

    /// Check that `layout` can read the index described by this header.
    ///
    /// # Errors
    ///
    /// - `FormatMismatch` if the layout identifiers differ
    /// - `LayoutVersionMismatch` if the identifiers match but versions differ
    pub fn verify<L: Layout>(&self, layout: &L) -> Result<(), HeaderError> {
        if self.layout_identifier != layout.identifier() {
            tracing::error!(
                "index layout mismatch: index was written by {}, opened with {}",
                describe_identifier(self.layout_identifier),
                describe_identifier(layout.identifier())
            );
            return Err(HeaderError::FormatMismatch {
                expected: layout.identifier(),
                found: self.layout_identifier,
            });
        }

        let expected = (layout.major_version(), layout.minor_version());
        let found = (self.layout_major_version, self.layout_minor_version);
        if expected != found {
            tracing::error!(
                "index layout version mismatch: index has {}.{}, layout is {}.{}",
                found.0,
                found.1,
                expected.0,
                expected.1
            );
            return Err(HeaderError::LayoutVersionMismatch { expected, found });
        }

        tracing::debug!(
            "verified index layout {}",
            describe_identifier(self.layout_identifier)
        );
        Ok(())
    }

    /// Serialize the header, checksum included.
    #[must_use]
    pub fn to_bytes(self) -> [u8; HEADER_SIZE] {
        let mut block = HeaderBlock([0u8; HEADER_SIZE]);
        block.put(offsets::MAGIC, &MAGIC);
        block.put(offsets::FORMAT_VERSION, &FORMAT_VERSION.to_le_bytes());
        block.put(
            offsets::LAYOUT_IDENTIFIER,
            &self.layout_identifier.to_le_bytes(),
        );
        block.put(
            offsets::LAYOUT_MAJOR_VERSION,
            &self.layout_major_version.to_le_bytes(),
        );
        block.put(
            offsets::LAYOUT_MINOR_VERSION,
            &self.layout_minor_version.to_le_bytes(),
        );
        block.put(offsets::KEY_SIZE, &self.key_size.to_le_bytes());
        block.put(offsets::VALUE_SIZE, &self.value_size.to_le_bytes());
        block.put(offsets::ENTRY_COUNT, &self.entry_count.to_le_bytes());

        let checksum = block.checksum();
        block.put(offsets::CHECKSUM, &checksum.to_le_bytes());
        block.0
    }

    /// Deserialize a header, rejecting bad magic, unknown format versions and
    /// checksum mismatches.
    pub fn from_bytes(bytes: [u8; HEADER_SIZE]) -> Result<Self, HeaderError> {
        let block = HeaderBlock(bytes);

        let mut magic = [0u8; 8];
        magic.copy_from_slice(&block.0[offsets::MAGIC..offsets::MAGIC + 8]);
        if magic != MAGIC {
            return Err(HeaderError::InvalidMagic(magic));
        }

        let format_version = block.u32_at(offsets::FORMAT_VERSION);
        if format_version != FORMAT_VERSION {
            return Err(HeaderError::UnsupportedVersion(format_version));
        }

        let expected = block.u32_at(offsets::CHECKSUM);
        let actual = block.checksum();
        if expected != actual {
            return Err(HeaderError::ChecksumMismatch { expected, actual });
        }

        Ok(Self {
            layout_identifier: block.u64_at(offsets::LAYOUT_IDENTIFIER),
            layout_major_version: block.u32_at(offsets::LAYOUT_MAJOR_VERSION),
            layout_minor_version: block.u32_at(offsets::LAYOUT_MINOR_VERSION),
            key_size: block.u32_at(offsets::KEY_SIZE),
            value_size: block.u32_at(offsets::VALUE_SIZE),
            entry_count: block.u64_at(offsets::ENTRY_COUNT),
        })
    }

    /// Write a new index header file for `layout`.
    ///
    /// Returns an error if the file already exists.
    pub fn create<L: Layout>(path: &Path, layout: &L) -> Result<Self, HeaderError> {
        let header = Self::for_layout(layout);

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => HeaderError::AlreadyExists(path.to_path_buf()),
                _ => HeaderError::Io(e),
            })?;
        file.write_all(&header.to_bytes()).map_err(HeaderError::Io)?;
        file.sync_all().map_err(HeaderError::Io)?;

        tracing::debug!(
            "created index header {} at {}",
            describe_identifier(header.layout_identifier),
            path.display()
        );
        Ok(header)
    }

    /// Read the header at `path` and check it against `layout`.
    pub fn open<L: Layout>(path: &Path, layout: &L) -> Result<Self, HeaderError> {
        let header = Self::read_from_path(path)?;
        header.verify(layout)?;
        Ok(header)
    }

    /// Overwrite the header at `path`.
    pub fn write_to_path(&self, path: &Path) -> Result<(), HeaderError> {
        std::fs::write(path, self.to_bytes()).map_err(HeaderError::Io)
    }

    /// Read a header from `path` without checking the layout.
    pub fn read_from_path(path: &Path) -> Result<Self, HeaderError> {
        let data = std::fs::read(path).map_err(HeaderError::Io)?;
        let bytes: [u8; HEADER_SIZE] = data
            .try_into()
            .map_err(|data: Vec<u8>| HeaderError::Truncated(data.len()))?;
        Self::from_bytes(bytes)
    }
}

/// Errors that can occur when reading or validating an index header.
#[derive(Debug)]
pub enum HeaderError {
    /// Invalid magic number.
    InvalidMagic([u8; 8]),
    /// Unsupported header format version.
    UnsupportedVersion(u32),
    /// Header bytes do not match their checksum.
    ChecksumMismatch { expected: u32, actual: u32 },
    /// The index was written by a different layout.
    FormatMismatch { expected: u64, found: u64 },
    /// Same layout, different layout version.
    LayoutVersionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },
    /// Header file is not exactly one header long.
    Truncated(usize),
    /// Header file already exists.
    AlreadyExists(PathBuf),
    /// I/O error.
    Io(std::io::Error),
}

impl std::fmt::Display for HeaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMagic(magic) => {
                write!(
                    f,
                    "invalid magic number: {:?}",
                    String::from_utf8_lossy(magic)
                )
            }
            Self::UnsupportedVersion(v) => write!(f, "unsupported header version: {v}"),
            Self::ChecksumMismatch { expected, actual } => write!(
                f,
                "index header checksum mismatch: stored {expected:#010x}, computed {actual:#010x}"
            ),
            Self::FormatMismatch { expected, found } => write!(
                f,
                "index format mismatch: expected layout {}, found {}",
                describe_identifier(*expected),
                describe_identifier(*found)
            ),
            Self::LayoutVersionMismatch { expected, found } => write!(
                f,
                "index layout version mismatch: expected {}.{}, found {}.{}",
                expected.0, expected.1, found.0, found.1
            ),
            Self::Truncated(len) => {
                write!(f, "index header is {len} bytes, expected {HEADER_SIZE}")
            }
            Self::AlreadyExists(path) => write!(f, "index already exists: {}", path.display()),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for HeaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

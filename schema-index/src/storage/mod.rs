//! Index persistence.
//!
//! Only the index header lives here: a fixed-size block naming the layout
//! the index was written with. Page and node formats belong to the tree
//! engine.
//!
//! # Usage
//!
//! ```
//! use schema_index::number::{NonUniqueNumberLayout, UniqueNumberLayout};
//! use schema_index::storage::{HeaderError, IndexHeader};
//!
//! let header = IndexHeader::for_layout(&UniqueNumberLayout::new());
//! let restored = IndexHeader::from_bytes(header.to_bytes())?;
//! assert!(restored.verify(&UniqueNumberLayout::new()).is_ok());
//! assert!(matches!(
//!     restored.verify(&NonUniqueNumberLayout::new()),
//!     Err(HeaderError::FormatMismatch { .. })
//! ));
//! # Ok::<(), HeaderError>(())
//! ```

mod header;

pub use header::{FORMAT_VERSION, HEADER_SIZE, HeaderError, IndexHeader, MAGIC};

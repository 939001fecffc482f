#![cfg_attr(
    test,
    allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp, clippy::panic)
)]
// Key encoding and ordering for property indexes.
//
// Life of an index lookup:
// 1. The engine owns a few scratch keys per traversal
// 2. Keys are filled from record values (`NumberKey::populate_from`) or reset
//    to a sentinel (`init_as_lowest` / `init_as_highest`)
// 3. The configured layout orders keys during search, insert and scan, and
//    reads stored keys from page bytes into the scratch keys
// 4. On open, the index header is checked against the layout's identifier
//
// System components:
//  - Layout contract (`layout`)
//  - Numeric keys and their unique / non-unique orderings (`number`)
//  - Index header (`storage`)
//  - Layout selection (`config`)

pub mod config;
pub mod layout;
pub mod number;
pub mod storage;
pub mod types;


pub use config::{IndexConfig, Uniqueness};
pub use layout::{IndexKey, Layout};

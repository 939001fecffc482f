//! Test that format identifiers are stable and guard index reopening.

use tempfile::tempdir;

use crate::config::IndexConfig;
use crate::layout::{Layout, named_identifier};
use crate::number::{NonUniqueNumberLayout, NumberIndexLayout, UniqueNumberLayout};
use crate::storage::{HeaderError, IndexHeader};
use crate::testing::init_tracing;

#[test]
fn test_identifier_is_stable_across_calls() {
    let layout = UniqueNumberLayout::new();
    let first = layout.identifier();
    for _ in 0..10 {
        assert_eq!(layout.identifier(), first);
    }
    assert_eq!(UniqueNumberLayout::new().identifier(), first);
}

#[test]
fn test_identifier_values_are_pinned() {
    // Persisted in existing index headers: these must never change.
    assert_eq!(UniqueNumberLayout::IDENTIFIER, 0x0055_4E49_0000_0010);
    assert_eq!(NonUniqueNumberLayout::IDENTIFIER, 0x4E55_4E49_0000_0010);
}

#[test]
fn test_identifier_depends_on_tag_and_size() {
    assert_ne!(
        UniqueNumberLayout::IDENTIFIER,
        NonUniqueNumberLayout::IDENTIFIER
    );
    assert_ne!(UniqueNumberLayout::IDENTIFIER, named_identifier("UNI", 24));
}

#[test]
fn test_identifier_survives_reopen() {
    init_tracing();
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("numbers.idx");

    let layout = IndexConfig::unique().number_layout();
    let written = IndexHeader::create(&path, &layout).expect("create");

    // A later process opens the same file with a freshly built layout.
    let reopened = IndexHeader::open(&path, &NumberIndexLayout::unique()).expect("open");
    assert_eq!(reopened.layout_identifier, written.layout_identifier);
}

#[test]
fn test_reopen_with_other_uniqueness_is_fatal() {
    init_tracing();
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("numbers.idx");

    IndexHeader::create(&path, &IndexConfig::non_unique().number_layout()).expect("create");

    let result = IndexHeader::open(&path, &IndexConfig::unique().number_layout());
    match result {
        Err(HeaderError::FormatMismatch { expected, found }) => {
            assert_eq!(expected, UniqueNumberLayout::IDENTIFIER);
            assert_eq!(found, NonUniqueNumberLayout::IDENTIFIER);
        }
        other => panic!("expected FormatMismatch, got {other:?}"),
    }
}

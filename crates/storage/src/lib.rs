// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! seqfile-storage: disk-backed sequential record store
//!
//! A [`SequentialStore`] behaves like an ordered list of records but keeps
//! them on disk, one encoded line per file line. Appends are buffered in
//! memory and flushed in batches; every record's line-start byte offset is
//! indexed, so a positional read costs one seek regardless of file size.
//!
//! The store assumes a single writer: no other writer may touch the
//! backing file between store operations.

pub mod cursor;
pub mod store;

pub use cursor::{Cursor, IndexedCursor, IndexedRecord};
pub use store::{SequentialStore, StoreConfig, StoreError};

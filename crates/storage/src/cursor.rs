// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lazy read-through cursors over the backing file
//!
//! A cursor owns its file handle and a record bound captured when the
//! store flushed, so appends buffered after its creation stay invisible.
//! It is forward-only and single-pass; once the store is mutated the
//! cursor is stale by contract. The handle is released when the cursor is
//! exhausted or dropped.

use crate::store::StoreError;
use seqfile_core::codec::LineCodec;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::Path;

/// Drop the trailing line terminator read_line leaves in place
pub(crate) fn strip_terminator(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

/// Lazy forward-only iterator over stored records
pub struct Cursor<T, C> {
    reader: BufReader<File>,
    codec: C,
    remaining: usize,
    line: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T, C> Cursor<T, C>
where
    C: LineCodec<T>,
{
    pub(crate) fn open(path: &Path, codec: C, records: usize) -> Result<Self, StoreError> {
        Ok(Self {
            reader: BufReader::new(File::open(path)?),
            codec,
            remaining: records,
            line: String::new(),
            _marker: PhantomData,
        })
    }
}

impl<T, C> Iterator for Cursor<T, C>
where
    C: LineCodec<T>,
{
    type Item = Result<T, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.line.clear();
        match self.reader.read_line(&mut self.line) {
            Ok(0) => None,
            Ok(_) => {
                self.remaining -= 1;
                strip_terminator(&mut self.line);
                Some(self.codec.decode(&self.line).map_err(StoreError::from))
            }
            Err(e) => {
                self.remaining = 0;
                Some(Err(StoreError::Io(e)))
            }
        }
    }
}

/// A decoded record paired with its zero-based position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedRecord<T> {
    pub index: usize,
    pub record: T,
}

/// Cursor variant that pairs each record with its position
pub struct IndexedCursor<T, C> {
    inner: Cursor<T, C>,
    next_index: usize,
}

impl<T, C> IndexedCursor<T, C> {
    pub(crate) fn new(inner: Cursor<T, C>) -> Self {
        Self {
            inner,
            next_index: 0,
        }
    }
}

impl<T, C> Iterator for IndexedCursor<T, C>
where
    C: LineCodec<T>,
{
    type Item = Result<IndexedRecord<T>, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.inner.next()?;
        let index = self.next_index;
        self.next_index += 1;
        Some(record.map(|record| IndexedRecord { index, record }))
    }
}

#[cfg(test)]
#[path = "cursor_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Disk-backed sequential record store
//!
//! Records occupy one encoded line each. An in-memory index maps every
//! position to the byte at which its line begins, and a write buffer
//! batches appends before they reach the file. Read operations force a
//! flush first, so the file always reflects every append made so far.

use crate::cursor::{strip_terminator, Cursor, IndexedCursor};
use seqfile_core::codec::{CodecError, LineCodec};
use seqfile_core::paths;
use seqfile_core::token::UuidTokenGen;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("index {index} out of range for store of {len} records")]
    OutOfRange { index: usize, len: usize },
    #[error("{operation} is not supported")]
    Unsupported { operation: &'static str },
}

/// Configuration for a sequential store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Number of buffered appends before an automatic flush.
    ///
    /// A capacity of 1 writes every append through immediately.
    pub buffer_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 1000,
        }
    }
}

/// Disk-backed ordered sequence of records, one per file line
///
/// Appends accumulate in an in-memory buffer and reach the file in
/// batches; positional reads and scans flush first, so they observe every
/// record appended before them. The supported mutations are append and
/// clear; the other mutators a general-purpose list would offer exist
/// only to fail with [`StoreError::Unsupported`].
///
/// The store owns its backing file exclusively. A write from anywhere
/// else between store operations invalidates the offset index.
pub struct SequentialStore<T, C>
where
    C: LineCodec<T>,
{
    path: PathBuf,
    codec: C,
    /// offsets[i] = byte at which record i's line begins
    offsets: Vec<u64>,
    pending: Vec<T>,
    buffer_capacity: usize,
}

impl<T, C> SequentialStore<T, C>
where
    C: LineCodec<T>,
{
    /// Open or create a store at the given path
    ///
    /// Creates missing parent directories and an empty file for a new
    /// store; rebuilds the offset index by scanning an existing one.
    pub fn open(path: impl Into<PathBuf>, codec: C) -> Result<Self, StoreError> {
        Self::open_with(path, codec, StoreConfig::default())
    }

    /// Open or create a store with explicit configuration
    pub fn open_with(
        path: impl Into<PathBuf>,
        codec: C,
        config: StoreConfig,
    ) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut store = Self {
            path,
            codec,
            offsets: Vec::new(),
            pending: Vec::new(),
            buffer_capacity: config.buffer_capacity.max(1),
        };

        if store.path.exists() {
            store.rebuild_index()?;
        } else {
            File::create(&store.path)?;
        }

        Ok(store)
    }

    /// Open a store at a freshly generated anonymous path
    ///
    /// The path composes the resolved data root, a random token, and the
    /// store file suffix.
    pub fn open_anonymous(codec: C) -> Result<Self, StoreError> {
        Self::open_anonymous_with(codec, StoreConfig::default())
    }

    /// Anonymous variant of [`SequentialStore::open_with`]
    pub fn open_anonymous_with(codec: C, config: StoreConfig) -> Result<Self, StoreError> {
        let path = paths::anonymous_path(&paths::data_root(), &UuidTokenGen);
        Self::open_with(path, codec, config)
    }

    /// Scan the backing file and record each line's starting byte offset
    fn rebuild_index(&mut self) -> Result<(), StoreError> {
        let mut reader = BufReader::new(File::open(&self.path)?);
        let mut position: u64 = 0;
        let mut line = String::new();

        loop {
            line.clear();
            // read_line reports bytes consumed, terminator included, so
            // the accumulated position stays in the units seek expects.
            let bytes = reader.read_line(&mut line)?;
            if bytes == 0 {
                break;
            }
            self.offsets.push(position);
            position += bytes as u64;
        }

        tracing::debug!(
            path = %self.path.display(),
            records = self.offsets.len(),
            "rebuilt offset index"
        );

        Ok(())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records, flushed and buffered
    pub fn len(&self) -> usize {
        self.offsets.len() + self.pending.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a record
    ///
    /// The record counts toward [`SequentialStore::len`] immediately and
    /// becomes readable by position after the next flush. Reaching the
    /// configured buffer capacity flushes automatically.
    pub fn append(&mut self, record: T) -> Result<(), StoreError> {
        self.pending.push(record);
        if self.pending.len() >= self.buffer_capacity {
            self.flush()?;
        }
        Ok(())
    }

    /// Append every record from an iterator, in order
    pub fn append_all(&mut self, records: impl IntoIterator<Item = T>) -> Result<(), StoreError> {
        for record in records {
            self.append(record)?;
        }
        Ok(())
    }

    /// Write all buffered records to the backing file
    ///
    /// The whole batch is encoded and validated before the file is
    /// touched. The end-of-file position is captured once and advanced
    /// per written line; the offset index grows only after the batch is
    /// durably on disk, so a failed flush never leaves index entries for
    /// records that were not written.
    fn flush(&mut self) -> Result<(), StoreError> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let mut lines = Vec::with_capacity(self.pending.len());
        for record in &self.pending {
            let line = self.codec.encode(record)?;
            if line.contains(['\n', '\r']) {
                return Err(StoreError::Codec(CodecError::EmbeddedNewline));
            }
            lines.push(line);
        }

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let start = file.metadata()?.len();
        let mut writer = BufWriter::new(file);
        let mut position = start;
        let mut new_offsets = Vec::with_capacity(lines.len());

        for line in &lines {
            new_offsets.push(position);
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
            position += line.len() as u64 + 1;
        }

        writer.flush()?;
        writer.get_ref().sync_all()?;

        tracing::debug!(
            records = new_offsets.len(),
            bytes = position - start,
            "flushed append buffer"
        );

        self.offsets.extend(new_offsets);
        self.pending.clear();

        Ok(())
    }

    /// Read the record at the given position
    ///
    /// Costs one seek plus one line read regardless of file size.
    pub fn get(&mut self, index: usize) -> Result<T, StoreError> {
        if index >= self.len() {
            return Err(StoreError::OutOfRange {
                index,
                len: self.len(),
            });
        }
        self.flush()?;

        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(self.offsets[index]))?;
        let mut reader = BufReader::new(file);
        let mut line = String::new();
        reader.read_line(&mut line)?;
        strip_terminator(&mut line);

        Ok(self.codec.decode(&line)?)
    }

    /// Materialize the records in `[from, to)`, in order
    ///
    /// Out-of-range positions surface the same error as
    /// [`SequentialStore::get`].
    pub fn slice(&mut self, from: usize, to: usize) -> Result<Vec<T>, StoreError> {
        let mut records = Vec::with_capacity(to.saturating_sub(from));
        for index in from..to {
            records.push(self.get(index)?);
        }
        Ok(records)
    }

    /// Materialize every record, in order
    pub fn to_vec(&mut self) -> Result<Vec<T>, StoreError> {
        self.iter()?.collect()
    }

    /// Lazily iterate over every record in file order
    ///
    /// The cursor owns its own read handle and is bounded by the records
    /// present at flush time; appends made after it is created stay
    /// buffered and are not observed. Mutating the store mid-iteration is
    /// outside the contract.
    pub fn iter(&mut self) -> Result<Cursor<T, C>, StoreError> {
        self.flush()?;
        Cursor::open(&self.path, self.codec.clone(), self.offsets.len())
    }

    /// Like [`SequentialStore::iter`], pairing each record with its
    /// zero-based position
    pub fn indexed_iter(&mut self) -> Result<IndexedCursor<T, C>, StoreError> {
        self.flush()?;
        Ok(IndexedCursor::new(Cursor::open(
            &self.path,
            self.codec.clone(),
            self.offsets.len(),
        )?))
    }

    /// Remove every record and truncate the backing file
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.flush()?;

        let file = OpenOptions::new().write(true).open(&self.path)?;
        file.set_len(0)?;
        file.sync_all()?;

        self.offsets.clear();
        self.pending.clear();

        tracing::debug!(path = %self.path.display(), "cleared store");
        Ok(())
    }

    // The supported capability set is append, positional read, scan, and
    // clear. The list-style mutators below exist only to fail explicitly.

    /// Always fails with [`StoreError::Unsupported`]
    pub fn remove(&mut self, _index: usize) -> Result<T, StoreError> {
        Err(StoreError::Unsupported {
            operation: "remove by index",
        })
    }

    /// Always fails with [`StoreError::Unsupported`]
    pub fn remove_value(&mut self, _value: &T) -> Result<bool, StoreError> {
        Err(StoreError::Unsupported {
            operation: "remove by value",
        })
    }

    /// Always fails with [`StoreError::Unsupported`]
    pub fn set(&mut self, _index: usize, _record: T) -> Result<T, StoreError> {
        Err(StoreError::Unsupported {
            operation: "set by index",
        })
    }

    /// Always fails with [`StoreError::Unsupported`]
    pub fn insert(&mut self, _index: usize, _record: T) -> Result<(), StoreError> {
        Err(StoreError::Unsupported {
            operation: "insert at index",
        })
    }

    /// Always fails with [`StoreError::Unsupported`]
    pub fn insert_all(
        &mut self,
        _index: usize,
        _records: impl IntoIterator<Item = T>,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unsupported {
            operation: "bulk insert at index",
        })
    }

    /// Always fails with [`StoreError::Unsupported`]
    pub fn remove_all(&mut self, _values: &[T]) -> Result<bool, StoreError> {
        Err(StoreError::Unsupported {
            operation: "bulk remove",
        })
    }

    /// Always fails with [`StoreError::Unsupported`]
    pub fn retain(&mut self, _values: &[T]) -> Result<bool, StoreError> {
        Err(StoreError::Unsupported {
            operation: "retain",
        })
    }
}

impl<T, C> SequentialStore<T, C>
where
    T: PartialEq,
    C: LineCodec<T>,
{
    /// Position of the first record equal to `value`
    pub fn index_of(&mut self, value: &T) -> Result<Option<usize>, StoreError> {
        for (index, record) in self.iter()?.enumerate() {
            if record? == *value {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Position of the last record equal to `value`
    pub fn last_index_of(&mut self, value: &T) -> Result<Option<usize>, StoreError> {
        let mut found = None;
        for (index, record) in self.iter()?.enumerate() {
            if record? == *value {
                found = Some(index);
            }
        }
        Ok(found)
    }

    /// Whether any record equals `value`
    pub fn contains(&mut self, value: &T) -> Result<bool, StoreError> {
        Ok(self.index_of(value)?.is_some())
    }

    /// Whether every value has an equal record in the store
    pub fn contains_all(&mut self, values: &[T]) -> Result<bool, StoreError> {
        for value in values {
            if !self.contains(value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Flush any buffered records on drop, best effort
impl<T, C> Drop for SequentialStore<T, C>
where
    C: LineCodec<T>,
{
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(
                ?e,
                path = %self.path.display(),
                "failed to flush store on drop"
            );
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line codec boundary
//!
//! A codec turns a record into exactly one line of text and back. The
//! store writes one encoded line per record, so the encoded form must not
//! contain a line terminator; the store rejects such output before it
//! reaches the file.

use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use thiserror::Error;

/// Errors from encoding or decoding a record line
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("encoded record contains a line terminator")]
    EmbeddedNewline,
    #[error("parse error: {0}")]
    Parse(String),
}

/// Encodes records to single text lines and back
///
/// `decode(encode(r))` must equal `r` for every supported record value.
/// Implementations are `Clone` so a read cursor can carry its own copy.
pub trait LineCodec<T>: Clone {
    /// Encode a record to one line of text, without a trailing terminator
    fn encode(&self, record: &T) -> Result<String, CodecError>;

    /// Decode a record from one line of text
    fn decode(&self, line: &str) -> Result<T, CodecError>;
}

/// JSON line codec for any serde-serializable record type
///
/// JSON string escaping guarantees the encoded form never contains a raw
/// line terminator.
pub struct JsonCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> LineCodec<T> for JsonCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, record: &T) -> Result<String, CodecError> {
        Ok(serde_json::to_string(record)?)
    }

    fn decode(&self, line: &str) -> Result<T, CodecError> {
        Ok(serde_json::from_str(line)?)
    }
}

/// Identity codec for plain string records
///
/// The record text is the line. A string containing a line terminator is
/// not encodable as a single line and is rejected by the store at write
/// time.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCodec;

impl LineCodec<String> for PlainCodec {
    fn encode(&self, record: &String) -> Result<String, CodecError> {
        Ok(record.clone())
    }

    fn decode(&self, line: &str) -> Result<String, CodecError> {
        Ok(line.to_string())
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;

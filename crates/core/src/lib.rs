// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! seqfile-core: boundary traits for the seqfile record store
//!
//! This crate provides:
//! - The line codec boundary (encode a record to one line of text and back)
//! - Token generation for naming anonymous store files
//! - Root-directory resolution for anonymous stores

pub mod codec;
pub mod paths;
pub mod token;

// Re-exports
pub use codec::{CodecError, JsonCodec, LineCodec, PlainCodec};
pub use token::{CounterTokenGen, TokenGen, UuidTokenGen};

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token generation for anonymous store files

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generates collision-resistant file-name tokens
pub trait TokenGen: Clone + Send + Sync {
    fn next(&self) -> String;
}

/// UUID-based token generator for production use
#[derive(Clone, Default)]
pub struct UuidTokenGen;

impl TokenGen for UuidTokenGen {
    fn next(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Counter-based token generator for predictable test file names
#[derive(Clone)]
pub struct CounterTokenGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl CounterTokenGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for CounterTokenGen {
    fn default() -> Self {
        Self::new("store")
    }
}

impl TokenGen for CounterTokenGen {
    fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;

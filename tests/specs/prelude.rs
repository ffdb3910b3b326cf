//! Shared helpers for the behavioral specs

use seqfile_core::codec::PlainCodec;
use seqfile_storage::{SequentialStore, StoreConfig};
use std::path::Path;

pub type StringStore = SequentialStore<String, PlainCodec>;

pub fn open_store(path: &Path) -> StringStore {
    SequentialStore::open(path, PlainCodec).unwrap()
}

pub fn open_store_with_capacity(path: &Path, buffer_capacity: usize) -> StringStore {
    SequentialStore::open_with(path, PlainCodec, StoreConfig { buffer_capacity }).unwrap()
}

pub fn s(value: &str) -> String {
    value.to_string()
}

//! Checkpoint module
//!
//! Opt-in resumability for interrupted crawls.
//!
//! # Overview
//!
//! - `Checkpoint` - next offset and page count per endpoint
//! - `CheckpointStore` - file-based persistence with atomic writes
//!
//! The ingestion loop records the next offset after each persisted page and
//! clears the endpoint once the crawl completes. Without a store, every run
//! starts from offset zero.

mod manager;
mod types;

pub use manager::CheckpointStore;
pub use types::{Checkpoint, EndpointCheckpoint};

#[cfg(test)]
mod manager_tests;

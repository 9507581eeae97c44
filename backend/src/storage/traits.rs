//! # Storage Traits
//!
//! The reward card keeps all of its state in a small string key-value store,
//! the same shape a browser's local storage has. Snapshots are serialized by
//! the caller; backends only move opaque strings.

use anyhow::Result;
use async_trait::async_trait;

/// Trait defining the interface for key-value storage operations
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Retrieve the value stored under a key
    async fn get_value(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, overwriting any existing value for the same key
    async fn put_value(&self, key: &str, value: &str) -> Result<()>;
}

//! # Storage Module
//!
//! Handles all data persistence for the sticker card application.
//!
//! All state is a single versioned snapshot kept in a string key-value store,
//! so the backing store can be swapped (SQLite on disk, memory in tests)
//! without touching the domain layer.
//!
//! - **traits**: the `KeyValueStorage` abstraction
//! - **db**: SQLite-backed key-value table
//! - **memory**: in-process key-value map
//! - **profile_store**: versioned load/persist of the profile list

pub mod db;
pub mod memory;
pub mod profile_store;
pub mod traits;

pub use db::DbConnection;
pub use memory::MemoryKeyValueStore;
pub use profile_store::{
    LoadedProfiles, ProfileSource, ProfileStore, CURRENT_STORAGE_KEY, LEGACY_STORAGE_KEY,
};
pub use traits::KeyValueStorage;

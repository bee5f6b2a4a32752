//! Persistence for the HR records.
//!
//! The [`RecordStore`] owns the mapping from application state to logical
//! keys; a [`KeyValueBackend`] decides where those keys live.

mod backend;
mod record_store;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use record_store::{RecordStore, keys};

//! # Storage Layer
//!
//! The entity store keeps two record kinds, lists and tasks, linked one-to-many
//! by `TaskRecord::list_id`.
//!
//! ## Split Between Backend and Store
//!
//! - [`backend::StorageBackend`] is raw I/O: load and save a whole [`record::Snapshot`].
//! - [`entity_store::EntityStore`] is the behaviour on top: ordering, lookups,
//!   cascade deletes, seeding and write serialization.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production flat-file storage
//!   - One JSON document (`tasks.json` by default) holding every record
//!   - Every write replaces the whole file (tmp file + rename)
//!
//! - [`mem_backend::MemBackend`]: in-memory storage for tests
//!   - No persistence
//!   - Can simulate write failures
//!
//! [`backend::Backend`] wraps either one so the choice can be made from config
//! at runtime.
//!
//! ## Concurrency
//!
//! Each `EntityStore` owns one write lock. Every mutation is a load-modify-save
//! cycle under that lock, so at most one write is in flight per store. Reads do
//! not take the lock and see whatever was last committed.
//!
//! ## Storage Format
//!
//! ```text
//! {
//!   "lists": [{ "id": "…", "name": "Work", "category": "work" }],
//!   "tasks": [{ "id": "…", "listId": "…", "iconName": "tray.full",
//!               "title": "…", "details": "…",
//!               "dueDate": "2024-05-01T09:00:00Z",
//!               "status": "pending", "category": "planning" }]
//! }
//! ```
//!
//! `status` and `category` are stored as raw strings; validating them is the
//! repository's job.

pub mod backend;
pub mod entity_store;
pub mod fs_backend;
pub mod mem_backend;
pub mod record;

pub use backend::{Backend, StorageBackend};
pub use entity_store::EntityStore;
pub use record::{ListRecord, RecordKind, Snapshot, TaskRecord};

//! # Tasklist Architecture
//!
//! Tasklist is a **UI-agnostic task-list library**. Lists hold tasks; tasks have
//! a due date, a status and a category. The `tl` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - Parses arguments, prints, owns stdout/stderr/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  View models (viewmodel/)                                   │
//! │  - Idle/Loading/Loaded/Failed state, reload after actions   │
//! │  - Errors stop here and become display messages             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Use cases (usecases.rs)                                    │
//! │  - One named operation each, forwarding to the repository   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repository (repository.rs)                                 │
//! │  - DTO ⇄ domain mapping, drops records with unknown tags    │
//! │  - Seeds sample data into an empty store                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Data source (source.rs)                                    │
//! │  - Record ⇄ DTO mapping, list/task linkage, not-found       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Entity store (store/)                                      │
//! │  - StorageBackend trait: FsBackend (JSON file), MemBackend  │
//! │  - Ordering, cascade delete, one writer at a time           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the view models and the CLI know about presentation. Everything from
//! the use cases inward takes Rust arguments, returns `Result`, and never
//! prints.
//!
//! ## Testing Strategy
//!
//! 1. **Store and data source**: unit tests against `MemBackend`, including
//!    simulated write failures and concurrent writers.
//! 2. **Repository**: mapping, tag validation and seeding.
//! 3. **View models**: state transitions and error messages over an in-memory
//!    repository.
//! 4. **Integration** (`tests/`): `FsBackend` in temp directories and the `tl`
//!    binary end to end.
//!
//! ## Module Overview
//!
//! - [`model`]: Domain types (`TaskList`, `Task`, `TaskStatus`, `Category`)
//! - [`store`]: Storage backends and the entity store
//! - [`source`]: The data source and its DTOs
//! - [`repository`]: The repository trait and its store-backed implementation
//! - [`usecases`]: One struct per operation
//! - [`viewmodel`]: Presentation state for lists, a single task and the agenda
//! - [`index`]: Position selectors (`2`, `2.1`) used by the CLI
//! - [`config`]: Configuration management
//! - [`init`]: Path resolution and wiring
//! - [`sample`]: Data inserted into an empty store
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod index;
pub mod init;
pub mod model;
pub mod repository;
pub mod sample;
pub mod source;
pub mod store;
pub mod usecases;
pub mod viewmodel;

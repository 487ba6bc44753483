//! # Puzzlewright Architecture
//!
//! Puzzlewright is a **UI-agnostic authoring library** for game puzzle
//! definitions. It is not an editor application that happens to expose some
//! library code; it is a library that an editor (or any other host) drives.
//!
//! A puzzle document is a small tree: metadata, either an ordered step list
//! or a checklist, and exactly one outcome. The library owns the document
//! while it is being edited and mediates every change to it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host UI (external)                                         │
//! │  - Windows, tabs, property fields, reorderable lists        │
//! │  - The ONLY place that presents anything to a user          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Editing Session (api.rs)                                   │
//! │  - Owns at most one loaded Puzzle                           │
//! │  - Every mutation: undo record → apply → mark dirty         │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain (model.rs, validate.rs, codec.rs)                   │
//! │  - Plain data types, pure functions                         │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DocumentStore trait                             │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No Ambient State
//!
//! There is no global "currently open puzzle". A [`api::PuzzleApi`] session
//! is an ordinary value the host constructs, owns, and passes around, which
//! makes multiple simultaneous documents and unit testing straightforward.
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<T>`)
//! - **Never** presents UI or assumes a terminal environment
//!
//! ## Module Overview
//!
//! - [`api`]: The editing session, the entry point for all operations
//! - [`model`]: Core data types (`Puzzle`, `PuzzleStep`, `Outcome`)
//! - [`validate`]: Pure validation pass producing defect messages
//! - [`codec`]: The stable JSON wire format for export and import
//! - [`store`]: Storage abstraction and implementations
//! - [`undo`]: The host undo collaborator seam
//! - [`config`]: Persisted authoring configuration
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod undo;
pub mod validate;

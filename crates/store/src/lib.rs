//! Gamelib Store - Persistence layer for the games library.
//!
//! This crate provides the repository abstraction over the games catalog
//! domain (games, genres, publishers, users, reviews, wishlists) together
//! with two interchangeable backends and a CSV bulk loader:
//!
//! - [`memory::MemoryRepository`] - collection-backed store for tests and
//!   single-process deployments
//! - [`db::DatabaseRepository`] - SQLite-backed store with one transaction
//!   per logical operation
//! - [`loader`] - bulk ingestion of the catalog and user CSV files
//!
//! # Contract
//!
//! Every `add_*` operation is an upsert by identity: re-adding an entity with
//! an identity that already exists updates it in place and never grows the
//! corresponding `all_*` collection. Lookups by key return `Ok(None)` for
//! missing entities; errors are reserved for backend failures.
//!
//! Repositories are injected explicitly - there is no process-wide instance.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod db;
pub mod loader;
pub mod memory;
pub mod models;
pub mod repository;

pub use db::DatabaseRepository;
pub use memory::MemoryRepository;
pub use repository::{Repository, RepositoryError};

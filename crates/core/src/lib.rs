//! Gamelib Core - Shared domain value types.
//!
//! This crate provides common types used across the games library components:
//! - `store` - Persistence layer (repositories and bulk loader)
//! - `cli` - Command-line tools for migrations and data loading
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, usernames, prices, and ratings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! Frostline Core - Shared types library.
//!
//! This crate provides common types used across all Frostline components:
//! - `storefront` - The cart and order aggregation engine
//! - `integration-tests` - End-to-end flow tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no catalog
//! data. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and portions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! Core types for Frostline.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod portion;
pub mod price;

pub use id::*;
pub use portion::{Portion, PortionError};
pub use price::{Price, PriceError};

//! Common types and utilities shared across the crate.
//!
//! This module contains the pieces every tree operation relies on:
//! - Configuration constants and [`BTreeOptions`]
//! - Error types

pub mod config;
pub mod error;

pub use config::BTreeOptions;
pub use error::{Error, Result};

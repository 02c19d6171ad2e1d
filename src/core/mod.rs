//! Core infrastructure shared across the whole crate.
//!
//! - **config**: configuration loading and resolved types.
//! - **error**: crate-wide error enum.

pub mod config;
pub mod error;

//! Client library for the Egeria open metadata platform.
//!
//! - [`client::ServerClient`]: connection, bearer token, request/response
//!   checking.
//! - [`omvs`]: one manager per Open Metadata View Service.
//! - [`client::blocking::Blocking`]: synchronous wrapper for callers
//!   without a tokio runtime.
//! - [`crate::core::config`]: TOML + environment configuration.

pub mod bootstrap;
pub mod client;
pub mod core;
pub mod omvs;

pub use client::ServerClient;
pub use client::blocking::Blocking;
pub use client::body::{
    DeleteRequest, ElementStatus, GetRequest, NewElementRequest, NewRelationshipRequest, PageOptions, SearchOptions,
    UpdateElementRequest,
};
pub use crate::core::config::Config;
pub use crate::core::error::{EgeriaError, ExceptionReport, Result};

//! Synchronous access to the async API.
//!
//! [`Blocking`] owns a current-thread tokio runtime and drives one future per
//! call to completion, so callers without a runtime can use any manager:
//!
//! ```no_run
//! # use egeria_client::{Blocking, Config, ServerClient, SearchOptions};
//! # use egeria_client::omvs::location_arena::LocationArena;
//! # fn demo(config: &Config) -> egeria_client::Result<()> {
//! let arena = Blocking::new(LocationArena::new(ServerClient::from_config(config)?))?;
//! let search = SearchOptions::new("Amsterdam");
//! let found = arena.run(|a| a.find_locations(&search))?;
//! println!("{} locations", found.len());
//! # Ok(()) }
//! ```
//!
//! Do not call [`Blocking::run`] from inside another tokio runtime; tokio
//! refuses to nest `block_on`.

use std::future::Future;

use tokio::runtime::{Builder, Runtime};

use crate::core::error::{EgeriaError, Result};

use super::ServerClient;

#[derive(Debug)]
pub struct Blocking<C> {
    inner: C,
    runtime: Runtime,
}

impl<C> Blocking<C> {
    pub fn new(inner: C) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| EgeriaError::Runtime(format!("failed to build tokio runtime: {e}")))?;
        Ok(Self { inner, runtime })
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    /// Run one async operation of the wrapped client to completion.
    pub fn run<'a, F, Fut>(&'a self, op: F) -> Fut::Output
    where
        F: FnOnce(&'a C) -> Fut,
        Fut: Future,
    {
        self.runtime.block_on(op(&self.inner))
    }
}

impl Blocking<ServerClient> {
    pub fn create_egeria_bearer_token(&self, user_id: Option<&str>, password: Option<&str>) -> Result<String> {
        self.run(|c| c.create_egeria_bearer_token(user_id, password))
    }

    pub fn refresh_egeria_bearer_token(&self) -> Result<String> {
        self.run(|c| c.refresh_egeria_bearer_token())
    }

    pub fn get_platform_origin(&self) -> Result<String> {
        self.run(|c| c.get_platform_origin())
    }
}

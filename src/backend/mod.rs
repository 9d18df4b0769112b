//! Backend Access
//!
//! The feed keeps nothing of its own: entries, comments and reaction rows
//! live in a hosted data service. This module is the thin query client in
//! front of it.
//!
//! ## Architecture
//!
//! - **Query / Insert**: typed select and append requests
//! - **Backend**: the seam every caller goes through (JSON rows in and out)
//! - **SupabaseClient**: the hosted REST implementation
//! - **MemoryBackend**: in-process implementation for tests and demos

mod error;
mod memory;
mod query;
mod supabase;

pub use error::{BackendError, BackendResult};
pub use memory::{Call, MemoryBackend};
pub use query::{cell_text, Direction, Filter, Insert, Order, Query, Table};
pub use supabase::SupabaseClient;

use async_trait::async_trait;
use serde_json::Value;
use std::rc::Rc;

/// Select-and-insert access to the three feed tables
///
/// Futures are not required to be `Send`: in the browser everything runs on
/// the UI thread.
#[async_trait(?Send)]
pub trait Backend {
    /// Run a select and return the matching rows
    async fn select(&self, query: &Query) -> BackendResult<Vec<Value>>;

    /// Append rows; returns the stored rows when `insert.returning` is set
    async fn insert(&self, insert: &Insert) -> BackendResult<Vec<Value>>;
}

#[async_trait(?Send)]
impl<B: Backend + ?Sized> Backend for Rc<B> {
    async fn select(&self, query: &Query) -> BackendResult<Vec<Value>> {
        (**self).select(query).await
    }

    async fn insert(&self, insert: &Insert) -> BackendResult<Vec<Value>> {
        (**self).insert(insert).await
    }
}

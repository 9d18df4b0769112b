//! # Chaos Feed
//!
//! A family photo journal: a reverse-chronological feed of entries with
//! Markdown bodies and image grids, comments written under a chosen family
//! persona, and emoji reactions. All data lives in a hosted backend; the
//! page keeps only an in-memory cache.
//!
//! ## Modules
//!
//! - [`backend`]: query client for the hosted tables
//! - [`feed`]: domain types, loader and cache
//! - [`view`]: markup rendering
//! - [`app`]: the page controller and its DOM seam
//! - [`config`]: site config guard and operator configuration
//! - [`generate`]: build-time site config generator
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chaos_feed::backend::SupabaseClient;
//! use chaos_feed::config::SiteConfig;
//! use chaos_feed::feed::load_feed;
//! use chaos_feed::view::render_feed;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let site = SiteConfig::new("https://project.supabase.co", "anon-key");
//!     site.validate()?;
//!
//!     let backend = SupabaseClient::new(&site);
//!     let entries = load_feed(&backend).await?;
//!
//!     println!("{}", render_feed(&entries));
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod backend;
pub mod config;
pub mod feed;
#[cfg(not(target_arch = "wasm32"))]
pub mod generate;
pub mod view;

pub use app::{CommentFlow, FeedApp, Lightbox, LightboxPhase, LightboxStep, Page, WriteError};

pub use backend::{Backend, BackendError, BackendResult, MemoryBackend, Query, SupabaseClient};

pub use config::{Config, ConfigError, SiteConfig};

pub use feed::{
    load_feed, Comment, Entry, FeedEntry, FeedState, Persona, Reaction, RecordId,
    REACTION_EMOJIS,
};

pub use view::{render_feed, Markup};

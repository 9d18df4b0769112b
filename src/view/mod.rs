//! Feed Presentation
//!
//! Everything the page shows is produced here as markup strings:
//! the entry cards, the persona chooser and the status blocks.
//!
//! - [`node`]: view tree with a single escaping point
//! - [`markdown`]: entry bodies
//! - [`format`]: date labels
//! - [`render`]: the feed and its pieces
//! - [`dom`]: element ids, data attributes and classes the page binds to

pub mod dom;
pub mod format;
pub mod markdown;
pub mod node;
pub mod render;

pub use format::{date_label, format_timestamp};
pub use markdown::render_markdown;
pub use node::{el, escape_attr, escape_text, Element, Markup, Node};
pub use render::{
    count_label, entry_card, feed_view, render_config_missing, render_feed,
    render_identity_choices, render_load_error, render_loading,
};

//! Feed Domain
//!
//! Entries, comments, reactions and personas, plus the loader that pulls
//! them from the backend and the cache the page patches after writes.

mod loader;
mod model;
mod persona;
mod state;
pub mod store;

pub use loader::{load_feed, merge};
pub use model::{
    chronological, newest_first, parse_timestamp, Comment, Entry, FeedEntry, NewComment,
    NewReaction, Reaction, ReactionTally, RecordId, REACTION_EMOJIS,
};
pub use persona::{CommentStyle, Persona, DEFAULT_AUTHOR};
pub use state::FeedState;

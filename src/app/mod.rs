//! Page Controller
//!
//! Wires visitor actions to the backend and the page:
//!
//! - [`FeedApp`]: owns the cache and runs every handler
//! - [`Page`]: what the controller needs from the document
//! - [`CommentFlow`]: comment → persona → write
//! - [`Lightbox`]: image overlay phases and timers

mod comment;
mod controller;
mod error;
mod lightbox;
mod page;

#[cfg(test)]
mod testing;

pub use comment::{CommentFlow, PendingComment};
pub use controller::FeedApp;
pub use error::WriteError;
pub use lightbox::{
    Lightbox, LightboxPhase, LightboxStep, Settled, CLOSE_DELAY_MS, OPEN_DELAY_MS,
};
pub use page::{Page, PULSE_MS};

//! UI Components
//!
//! The static page shell around the rendered feed.

pub mod config_warning;
pub mod feed;
pub mod identity_modal;
pub mod lightbox;

pub use config_warning::ConfigWarning;
pub use feed::Feed;
pub use identity_modal::IdentityModal;
pub use lightbox::Lightbox;

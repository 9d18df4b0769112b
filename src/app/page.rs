//! The page surface
//!
//! Everything the controller does to the document goes through [`Page`].
//! The browser crate implements it on top of the real DOM; tests record
//! the calls instead.

use std::rc::Rc;

use super::lightbox::LightboxStep;
use crate::feed::RecordId;

/// How long a tapped reaction button stays highlighted
pub const PULSE_MS: u32 = 200;

/// DOM operations the controller needs
pub trait Page {
    /// Replace the content of the feed container
    fn set_feed_markup(&self, markup: &str);

    /// Fill the persona chooser with its buttons
    fn set_identity_choices(&self, markup: &str);

    /// Reveal the "backend not configured" banner
    fn show_config_warning(&self);

    fn open_identity_modal(&self);

    fn close_identity_modal(&self);

    /// Empty the comment input of one entry's form
    fn clear_comment_input(&self, entry_id: &RecordId);

    /// Update only the counter of one reaction button
    fn set_reaction_count(&self, entry_id: &RecordId, emoji: &str, label: &str);

    /// Briefly highlight one reaction button for [`PULSE_MS`]
    fn pulse_reaction(&self, entry_id: &RecordId, emoji: &str);

    /// Blocking message to the visitor
    fn alert(&self, message: &str);

    /// Re-run the icon library after markup changed
    fn refresh_icons(&self);

    /// Show the lightbox overlay with an image, still collapsed
    fn show_lightbox(&self, src: &str);

    /// Zoom the lightbox image in or out
    fn set_lightbox_zoomed(&self, zoomed: bool);

    fn hide_lightbox(&self);

    /// Run a lightbox timer and report back through `FeedApp::settle_lightbox`
    fn schedule_lightbox(&self, step: LightboxStep);
}

impl<P: Page + ?Sized> Page for Rc<P> {
    fn set_feed_markup(&self, markup: &str) {
        (**self).set_feed_markup(markup)
    }

    fn set_identity_choices(&self, markup: &str) {
        (**self).set_identity_choices(markup)
    }

    fn show_config_warning(&self) {
        (**self).show_config_warning()
    }

    fn open_identity_modal(&self) {
        (**self).open_identity_modal()
    }

    fn close_identity_modal(&self) {
        (**self).close_identity_modal()
    }

    fn clear_comment_input(&self, entry_id: &RecordId) {
        (**self).clear_comment_input(entry_id)
    }

    fn set_reaction_count(&self, entry_id: &RecordId, emoji: &str, label: &str) {
        (**self).set_reaction_count(entry_id, emoji, label)
    }

    fn pulse_reaction(&self, entry_id: &RecordId, emoji: &str) {
        (**self).pulse_reaction(entry_id, emoji)
    }

    fn alert(&self, message: &str) {
        (**self).alert(message)
    }

    fn refresh_icons(&self) {
        (**self).refresh_icons()
    }

    fn show_lightbox(&self, src: &str) {
        (**self).show_lightbox(src)
    }

    fn set_lightbox_zoomed(&self, zoomed: bool) {
        (**self).set_lightbox_zoomed(zoomed)
    }

    fn hide_lightbox(&self) {
        (**self).hide_lightbox()
    }

    fn schedule_lightbox(&self, step: LightboxStep) {
        (**self).schedule_lightbox(step)
    }
}

//! DOM hooks shared by the renderer and the page bindings

/// Container the feed markup is written into
pub const FEED_CONTAINER_ID: &str = "feed-container";
/// Banner shown when the backend is not configured
pub const CONFIG_WARNING_ID: &str = "config-warning";
/// Persona chooser overlay
pub const IDENTITY_MODAL_ID: &str = "identity-modal";
/// Grid inside the chooser that holds the persona buttons
pub const IDENTITY_CHOICES_ID: &str = "identity-choices";
pub const LIGHTBOX_ID: &str = "lightbox";
pub const LIGHTBOX_IMG_ID: &str = "lightbox-img";

pub const ATTR_REACTION: &str = "data-reaction";
pub const ATTR_ENTRY: &str = "data-entry";
pub const ATTR_ENTRY_ID: &str = "data-entry-id";
pub const ATTR_LIGHTBOX_SRC: &str = "data-lightbox-src";
pub const ATTR_IDENTITY: &str = "data-identity";

pub const COMMENT_FORM_CLASS: &str = "comment-form";
pub const COUNT_CLASS: &str = "count-val";
/// Name of the text input inside each comment form
pub const COMMENT_INPUT_NAME: &str = "text";

/// Classes toggled on a reaction button after a successful tap
pub const PULSE_CLASSES: [&str; 2] = ["bg-teal-50", "border-teal-400"];
pub const HIDDEN_CLASS: &str = "hidden";
/// Lightbox image classes while collapsed / zoomed in
pub const LIGHTBOX_COLLAPSED: [&str; 2] = ["scale-95", "opacity-0"];
pub const LIGHTBOX_ZOOMED: [&str; 2] = ["scale-100", "opacity-100"];

/// Element id of an entry card
pub fn post_id(entry_id: &str) -> String {
    format!("post-{}", entry_id)
}

/// Element id of an entry's comment list
pub fn comments_area_id(entry_id: &str) -> String {
    format!("comments-area-{}", entry_id)
}

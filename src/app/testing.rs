//! Recording page for controller tests

use std::cell::RefCell;

use super::lightbox::LightboxStep;
use super::page::Page;
use crate::feed::RecordId;

#[derive(Debug, Clone, PartialEq)]
pub enum PageCall {
    FeedMarkup(String),
    IdentityChoices(String),
    ConfigWarning,
    OpenIdentity,
    CloseIdentity,
    ClearInput(RecordId),
    ReactionCount {
        entry_id: RecordId,
        emoji: String,
        label: String,
    },
    Pulse {
        entry_id: RecordId,
        emoji: String,
    },
    Alert(String),
    RefreshIcons,
    ShowLightbox(String),
    LightboxZoomed(bool),
    HideLightbox,
    Schedule(LightboxStep),
}

#[derive(Default)]
pub struct RecordingPage {
    calls: RefCell<Vec<PageCall>>,
}

impl RecordingPage {
    pub fn calls(&self) -> Vec<PageCall> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Markup most recently written to the feed container
    pub fn feed_markup(&self) -> Option<String> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            PageCall::FeedMarkup(markup) => Some(markup.clone()),
            _ => None,
        })
    }

    pub fn alerts(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                PageCall::Alert(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether the persona chooser is open after the calls so far
    pub fn identity_modal_open(&self) -> bool {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find_map(|call| match call {
                PageCall::OpenIdentity => Some(true),
                PageCall::CloseIdentity => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn has(&self, expected: &PageCall) -> bool {
        self.calls.borrow().iter().any(|call| call == expected)
    }

    fn push(&self, call: PageCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Page for RecordingPage {
    fn set_feed_markup(&self, markup: &str) {
        self.push(PageCall::FeedMarkup(markup.to_string()));
    }

    fn set_identity_choices(&self, markup: &str) {
        self.push(PageCall::IdentityChoices(markup.to_string()));
    }

    fn show_config_warning(&self) {
        self.push(PageCall::ConfigWarning);
    }

    fn open_identity_modal(&self) {
        self.push(PageCall::OpenIdentity);
    }

    fn close_identity_modal(&self) {
        self.push(PageCall::CloseIdentity);
    }

    fn clear_comment_input(&self, entry_id: &RecordId) {
        self.push(PageCall::ClearInput(entry_id.clone()));
    }

    fn set_reaction_count(&self, entry_id: &RecordId, emoji: &str, label: &str) {
        self.push(PageCall::ReactionCount {
            entry_id: entry_id.clone(),
            emoji: emoji.to_string(),
            label: label.to_string(),
        });
    }

    fn pulse_reaction(&self, entry_id: &RecordId, emoji: &str) {
        self.push(PageCall::Pulse {
            entry_id: entry_id.clone(),
            emoji: emoji.to_string(),
        });
    }

    fn alert(&self, message: &str) {
        self.push(PageCall::Alert(message.to_string()));
    }

    fn refresh_icons(&self) {
        self.push(PageCall::RefreshIcons);
    }

    fn show_lightbox(&self, src: &str) {
        self.push(PageCall::ShowLightbox(src.to_string()));
    }

    fn set_lightbox_zoomed(&self, zoomed: bool) {
        self.push(PageCall::LightboxZoomed(zoomed));
    }

    fn hide_lightbox(&self) {
        self.push(PageCall::HideLightbox);
    }

    fn schedule_lightbox(&self, step: LightboxStep) {
        self.push(PageCall::Schedule(step));
    }
}

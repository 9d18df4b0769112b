//! `Page` implementation for the browser
//!
//! Shell changes go through the [`PageState`] signals. Changes inside the
//! feed markup (counters, inputs, pulses) are made on the DOM directly so
//! the feed is not re-rendered.

use gloo_timers::callback::Timeout;
use leptos::SignalSet;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use chaos_feed::app::{LightboxStep, Page, PULSE_MS};
use chaos_feed::view::dom::{
    ATTR_ENTRY, ATTR_ENTRY_ID, ATTR_REACTION, COMMENT_FORM_CLASS, COMMENT_INPUT_NAME, COUNT_CLASS,
    PULSE_CLASSES,
};
use chaos_feed::RecordId;

use crate::dom::{css_string, query, refresh_icons};
use crate::state::PageState;

pub struct DomPage {
    state: PageState,
}

impl DomPage {
    pub fn new(state: PageState) -> Self {
        Self { state }
    }

    fn reaction_button(&self, entry_id: &RecordId, emoji: &str) -> Option<Element> {
        query(&format!(
            "button[{}={}][{}={}]",
            ATTR_ENTRY,
            css_string(entry_id.as_str()),
            ATTR_REACTION,
            css_string(emoji)
        ))
    }
}

impl Page for DomPage {
    fn set_feed_markup(&self, markup: &str) {
        self.state.feed_html.set(markup.to_string());
    }

    fn set_identity_choices(&self, markup: &str) {
        self.state.identity_html.set(markup.to_string());
    }

    fn show_config_warning(&self) {
        self.state.config_warning.set(true);
    }

    fn open_identity_modal(&self) {
        self.state.identity_open.set(true);
    }

    fn close_identity_modal(&self) {
        self.state.identity_open.set(false);
    }

    fn clear_comment_input(&self, entry_id: &RecordId) {
        let selector = format!(
            "form.{}[{}={}] input[name={}]",
            COMMENT_FORM_CLASS,
            ATTR_ENTRY_ID,
            css_string(entry_id.as_str()),
            css_string(COMMENT_INPUT_NAME)
        );
        if let Some(input) = query(&selector).and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) {
            input.set_value("");
        }
    }

    fn set_reaction_count(&self, entry_id: &RecordId, emoji: &str, label: &str) {
        let counter = self
            .reaction_button(entry_id, emoji)
            .and_then(|button| button.query_selector(&format!(".{}", COUNT_CLASS)).ok().flatten());
        if let Some(counter) = counter {
            counter.set_text_content(Some(label));
        }
    }

    fn pulse_reaction(&self, entry_id: &RecordId, emoji: &str) {
        let Some(button) = self.reaction_button(entry_id, emoji) else {
            return;
        };
        let classes = button.class_list();
        for class in PULSE_CLASSES {
            let _ = classes.add_1(class);
        }
        Timeout::new(PULSE_MS, move || {
            for class in PULSE_CLASSES {
                let _ = classes.remove_1(class);
            }
        })
        .forget();
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn refresh_icons(&self) {
        refresh_icons();
    }

    fn show_lightbox(&self, src: &str) {
        self.state.lightbox_zoomed.set(false);
        self.state.lightbox_src.set(Some(src.to_string()));
    }

    fn set_lightbox_zoomed(&self, zoomed: bool) {
        self.state.lightbox_zoomed.set(zoomed);
    }

    fn hide_lightbox(&self) {
        self.state.lightbox_src.set(None);
    }

    fn schedule_lightbox(&self, step: LightboxStep) {
        let fired = self.state.lightbox_fired;
        Timeout::new(step.delay_ms, move || fired.set(Some(step.generation))).forget();
    }
}

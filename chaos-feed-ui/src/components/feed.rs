//! Feed Container
//!
//! Holds the rendered feed markup and turns clicks and submits inside it
//! into controller calls (reactions, image cards, comment forms).

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlFormElement, HtmlInputElement};

use chaos_feed::view::dom::{
    ATTR_ENTRY, ATTR_ENTRY_ID, ATTR_LIGHTBOX_SRC, ATTR_REACTION, COMMENT_FORM_CLASS,
    COMMENT_INPUT_NAME, FEED_CONTAINER_ID,
};
use chaos_feed::RecordId;

use crate::dom::{closest_with, css_string, target_element};
use crate::state::{FeedHandle, PageState};

#[component]
pub fn Feed() -> impl IntoView {
    let state = use_context::<PageState>().expect("PageState not found");
    let handle = use_context::<FeedHandle>().expect("FeedHandle not found");

    let click_handle = handle.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        let (Some(app), Some(target)) = (click_handle.0.clone(), target_element(&ev)) else {
            return;
        };

        if let Some(button) = closest_with(&target, ATTR_REACTION) {
            let entry = button.get_attribute(ATTR_ENTRY).unwrap_or_default();
            let emoji = button.get_attribute(ATTR_REACTION).unwrap_or_default();
            spawn_local(async move {
                if let Err(e) = app.react(RecordId::new(entry), &emoji).await {
                    web_sys::console::warn_1(&e.to_string().into());
                }
            });
        } else if let Some(card) = closest_with(&target, ATTR_LIGHTBOX_SRC) {
            if let Some(src) = card.get_attribute(ATTR_LIGHTBOX_SRC) {
                app.open_lightbox(&src);
            }
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        let Some(form) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlFormElement>().ok())
        else {
            return;
        };
        if !form.class_list().contains(COMMENT_FORM_CLASS) {
            return;
        }
        ev.prevent_default();

        let Some(app) = handle.0.clone() else {
            return;
        };
        let entry_id = form.get_attribute(ATTR_ENTRY_ID).unwrap_or_default();
        let text = form
            .query_selector(&format!("input[name={}]", css_string(COMMENT_INPUT_NAME)))
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default();

        app.submit_comment(RecordId::new(entry_id), &text);
    };

    view! {
        <main
            id=FEED_CONTAINER_ID
            class="space-y-8"
            inner_html=move || state.feed_html.get()
            on:click=on_click
            on:submit=on_submit
        />
    }
}

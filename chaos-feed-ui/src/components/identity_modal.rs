//! Persona Chooser
//!
//! Opens after a comment is submitted; picking a persona writes the comment.

use leptos::*;

use chaos_feed::view::dom::{ATTR_IDENTITY, IDENTITY_CHOICES_ID, IDENTITY_MODAL_ID};
use chaos_feed::Persona;

use crate::dom::{closest_with, target_element};
use crate::state::{FeedHandle, PageState};

#[component]
pub fn IdentityModal() -> impl IntoView {
    let state = use_context::<PageState>().expect("PageState not found");
    let handle = use_context::<FeedHandle>().expect("FeedHandle not found");

    let choose_handle = handle.clone();
    let on_choose = move |ev: web_sys::MouseEvent| {
        let (Some(app), Some(target)) = (choose_handle.0.clone(), target_element(&ev)) else {
            return;
        };
        let persona = closest_with(&target, ATTR_IDENTITY)
            .and_then(|button| button.get_attribute(ATTR_IDENTITY))
            .and_then(|name| Persona::from_name(&name));
        if let Some(persona) = persona {
            spawn_local(async move {
                if let Err(e) = app.choose_persona(persona).await {
                    web_sys::console::warn_1(&e.to_string().into());
                }
            });
        }
    };

    let on_cancel = move |_| {
        if let Some(app) = handle.0.as_ref() {
            app.cancel_comment();
        }
    };

    view! {
        <div
            id=IDENTITY_MODAL_ID
            class=move || {
                if state.identity_open.get() {
                    "fixed inset-0 z-40 bg-black/40 flex items-center justify-center p-4"
                } else {
                    "hidden"
                }
            }
        >
            <div class="bg-white rounded-2xl p-6 w-full max-w-sm chaos-shadow border-2 border-teal-200">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="font-hand text-2xl font-bold text-teal-700">"Wer schreibt da?"</h2>
                    <button on:click=on_cancel class="text-gray-400 hover:text-gray-600 transition">
                        <i data-lucide="x" class="w-5 h-5"></i>
                    </button>
                </div>
                <div
                    id=IDENTITY_CHOICES_ID
                    class="grid grid-cols-2 gap-3"
                    inner_html=move || state.identity_html.get()
                    on:click=on_choose
                />
            </div>
        </div>
    }
}

//! Image Lightbox

use leptos::*;

use chaos_feed::view::dom::{LIGHTBOX_COLLAPSED, LIGHTBOX_ID, LIGHTBOX_IMG_ID, LIGHTBOX_ZOOMED};

use crate::dom::target_element;
use crate::state::{FeedHandle, PageState};

#[component]
pub fn Lightbox() -> impl IntoView {
    let state = use_context::<PageState>().expect("PageState not found");
    let handle = use_context::<FeedHandle>().expect("FeedHandle not found");

    // Backdrop or close button
    let on_click = move |ev: web_sys::MouseEvent| {
        let (Some(app), Some(target)) = (handle.0.as_ref(), target_element(&ev)) else {
            return;
        };
        let on_button = target.closest("button").ok().flatten().is_some();
        if target.id() == LIGHTBOX_ID || on_button {
            app.close_lightbox();
        }
    };

    let image_class = move || {
        let zoom = if state.lightbox_zoomed.get() {
            LIGHTBOX_ZOOMED
        } else {
            LIGHTBOX_COLLAPSED
        };
        format!(
            "max-h-[90vh] max-w-full rounded-2xl shadow-2xl transform transition duration-300 {}",
            zoom.join(" ")
        )
    };

    view! {
        <div
            id=LIGHTBOX_ID
            class=move || {
                if state.lightbox_src.get().is_some() {
                    "fixed inset-0 z-50 bg-black/80 flex items-center justify-center p-4"
                } else {
                    "hidden"
                }
            }
            on:click=on_click
        >
            <button class="absolute top-4 right-4 text-white hover:text-teal-200 transition">
                <i data-lucide="x" class="w-8 h-8"></i>
            </button>
            <img
                id=LIGHTBOX_IMG_ID
                src=move || state.lightbox_src.get().unwrap_or_default()
                alt=""
                class=image_class
            />
        </div>
    }
}

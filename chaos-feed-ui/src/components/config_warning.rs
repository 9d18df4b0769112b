//! Missing configuration banner

use leptos::*;

use chaos_feed::view::dom::CONFIG_WARNING_ID;

use crate::state::PageState;

#[component]
pub fn ConfigWarning() -> impl IntoView {
    let state = use_context::<PageState>().expect("PageState not found");

    view! {
        <div
            id=CONFIG_WARNING_ID
            class=move || {
                if state.config_warning.get() {
                    "mb-6 bg-amber-50 border-2 border-amber-300 text-amber-800 rounded-xl px-4 py-3 text-sm"
                } else {
                    "hidden"
                }
            }
        >
            "Supabase ist noch nicht eingerichtet. Setze SUPABASE_URL und SUPABASE_ANON_KEY und führe "
            <code class="font-mono">"chaos-feed generate-config"</code>
            " aus."
        </div>
    }
}

//! App Root Component
//!
//! Starts the controller, provides it to the components and lays out the
//! page shell.

use leptos::*;
use std::rc::Rc;

use chaos_feed::backend::SupabaseClient;
use chaos_feed::{FeedApp, SiteConfig};

use crate::components::{ConfigWarning, Feed, IdentityModal, Lightbox};
use crate::page::DomPage;
use crate::site_config;
use crate::state::{provide_page_state, FeedHandle};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_page_state();

    let site = SiteConfig::new(site_config::SUPABASE_URL, site_config::SUPABASE_ANON_KEY);
    let app = match FeedApp::start(&site, DomPage::new(state), SupabaseClient::new) {
        Ok(app) => Some(Rc::new(app)),
        Err(e) => {
            web_sys::console::warn_1(&format!("Feed disabled: {}", e).into());
            None
        }
    };
    provide_context(FeedHandle(app.clone()));

    if let Some(app) = app {
        // Lightbox timers report back through this signal
        let settle_app = Rc::clone(&app);
        create_effect(move |_| {
            if let Some(generation) = state.lightbox_fired.get() {
                settle_app.settle_lightbox(generation);
            }
        });

        spawn_local(async move {
            // The failure is already shown in place of the feed
            let _ = app.reload(true).await;
        });
    }

    view! {
        <div class="max-w-2xl mx-auto px-4 py-8">
            <Header />
            <ConfigWarning />
            <Feed />
        </div>
        <IdentityModal />
        <Lightbox />
    }
}

#[component]
fn Header() -> impl IntoView {
    view! {
        <header class="flex items-center gap-3 mb-8">
            <span class="text-4xl">"🐷"</span>
            <div>
                <h1 class="font-hand text-4xl font-bold text-teal-700">"Schweinis Chaos-Feed"</h1>
                <p class="text-gray-500 text-sm">"Abenteuer, Matsch und Familienkommentare"</p>
            </div>
        </header>
    }
}

//! Page State
//!
//! Signals behind the page shell. The controller writes them through
//! [`crate::page::DomPage`]; the components read them.

use leptos::*;
use std::rc::Rc;

use chaos_feed::backend::SupabaseClient;
use chaos_feed::FeedApp;

use crate::page::DomPage;

/// Shell state shared by all components
#[derive(Clone, Copy)]
pub struct PageState {
    /// Markup of the feed container
    pub feed_html: RwSignal<String>,
    /// Persona buttons inside the chooser
    pub identity_html: RwSignal<String>,
    pub config_warning: RwSignal<bool>,
    pub identity_open: RwSignal<bool>,
    /// Image shown in the lightbox; `None` hides the overlay
    pub lightbox_src: RwSignal<Option<String>>,
    pub lightbox_zoomed: RwSignal<bool>,
    /// Generation of the last lightbox timer that fired
    pub lightbox_fired: RwSignal<Option<u64>>,
}

/// The running controller
pub type Controller = FeedApp<SupabaseClient, DomPage>;

/// Controller handle in context; empty when the backend is not configured
#[derive(Clone)]
pub struct FeedHandle(pub Option<Rc<Controller>>);

/// Create the shell state and provide it to the component tree
pub fn provide_page_state() -> PageState {
    let state = PageState {
        feed_html: create_rw_signal(String::new()),
        identity_html: create_rw_signal(String::new()),
        config_warning: create_rw_signal(false),
        identity_open: create_rw_signal(false),
        lightbox_src: create_rw_signal(None),
        lightbox_zoomed: create_rw_signal(false),
        lightbox_fired: create_rw_signal(None),
    };

    provide_context(state);
    state
}

//! Chaos Feed Page
//!
//! Family photo journal page built with Leptos (WASM).
//!
//! # Architecture
//!
//! The feed itself (loading, rendering, comment and reaction flows) lives in
//! the `chaos-feed` library. This crate supplies the page shell as Leptos
//! components and implements the library's `Page` trait on top of their
//! signals. Backend settings are compiled in from [`site_config`].

use leptos::*;

mod app;
mod components;
mod dom;
mod page;
mod site_config;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}

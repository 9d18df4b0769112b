//! Small DOM helpers for delegated events and lookups

use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

/// Element an event was dispatched on
pub fn target_element(ev: &Event) -> Option<Element> {
    ev.target().and_then(|t| t.dyn_into::<Element>().ok())
}

/// Nearest ancestor (or self) carrying `attr`
pub fn closest_with(el: &Element, attr: &str) -> Option<Element> {
    el.closest(&format!("[{}]", attr)).ok().flatten()
}

pub fn query(selector: &str) -> Option<Element> {
    web_sys::window()?
        .document()?
        .query_selector(selector)
        .ok()
        .flatten()
}

/// Quote a value for use inside a CSS attribute selector
pub fn css_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\a "),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Run the icon library over the current document, if it is loaded
pub fn refresh_icons() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(lucide) = js_sys::Reflect::get(&window, &"lucide".into()) else {
        return;
    };
    if lucide.is_undefined() {
        return;
    }
    if let Ok(create) = js_sys::Reflect::get(&lucide, &"createIcons".into()) {
        if let Ok(create) = create.dyn_into::<js_sys::Function>() {
            let _ = create.call0(&lucide);
        }
    }
}

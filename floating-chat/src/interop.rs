use js_sys::{Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{window, Document};

use crate::error::OverlayError;

pub fn document() -> Result<Document, OverlayError> {
    window()
        .and_then(|w| w.document())
        .ok_or(OverlayError::DocumentUnavailable)
}

/// Browser viewport width, or 0 when no window is available.
pub fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

pub fn page_url() -> Option<String> {
    window()?.location().href().ok()
}

/// Resolve a packaged resource through `chrome.runtime.getURL`.
///
/// Outside an extension context the path is returned unchanged.
pub fn extension_resource_url(path: &str) -> String {
    resolve_with_runtime(path).unwrap_or_else(|| path.to_string())
}

fn resolve_with_runtime(path: &str) -> Option<String> {
    let global = js_sys::global();
    let chrome = Reflect::get(&global, &JsValue::from_str("chrome")).ok()?;
    if chrome.is_undefined() {
        return None;
    }
    let runtime = Reflect::get(&chrome, &JsValue::from_str("runtime")).ok()?;
    if runtime.is_undefined() {
        return None;
    }
    let get_url = Reflect::get(&runtime, &JsValue::from_str("getURL"))
        .ok()?
        .dyn_into::<Function>()
        .ok()?;
    get_url
        .call1(&runtime, &JsValue::from_str(path))
        .ok()?
        .as_string()
}

/// Run `f` once the DOM is parsed.
pub fn on_dom_ready(f: impl FnOnce() + 'static) -> Result<(), OverlayError> {
    let document = document()?;
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }

    let callback = Closure::once(f);
    document
        .add_event_listener_with_callback("DOMContentLoaded", callback.as_ref().unchecked_ref())
        .map_err(OverlayError::dom)?;
    // Fires once per page load; the closure lives as long as the page.
    callback.forget();
    Ok(())
}

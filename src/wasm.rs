// Browser bindings for the dev-watcher client.
// Everything below only makes sense inside a page: DOM mutation, the
// EventSource/WebSocket transports, and the setTimeout-driven retry loop.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::prelude::*;

mod dom;
mod helpers;
mod transport;
mod watcher;

pub use watcher::DevWatcher;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// Log to the browser console with the watcher's fixed prefix.
pub(crate) fn console_log(s: &str) {
    log(&format!("dev-watcher: {s}"));
}

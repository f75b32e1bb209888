//! DOM effects: the connection-lost banner, the in-place stylesheet
//! refresh, and the full-page reload.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlLinkElement};

use crate::css::{matches_stylesheet, CacheBuster};

const BANNER_STYLE: &str = "position: absolute; left: 0; right: 0; bottom: 0; \
                            background-color: red; color: white; \
                            font-size: 2rem; padding: 0.5em;";

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document available"))
}

/// Append the fixed-style connection-lost banner to the document body.
pub(crate) fn append_banner(text: &str) -> Result<(), JsValue> {
    let document = document()?;
    let banner = document.create_element("div")?;
    banner.set_text_content(Some(text));
    banner.set_attribute("style", BANNER_STYLE)?;

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?;
    body.append_child(&banner)?;
    Ok(())
}

/// Rewrite every `link[rel=stylesheet]` whose query-stripped URL ends with
/// `file`. Links are re-queried on every call, so stylesheets injected
/// after startup still match. Returns the number of links rewritten; zero
/// matches is not an error.
pub(crate) fn refresh_stylesheets(
    file: &str,
    buster: &mut CacheBuster,
    now_ms: u64,
) -> Result<u32, JsValue> {
    let document = document()?;
    let links = document.query_selector_all("link[rel=stylesheet]")?;

    let mut refreshed = 0;
    for index in 0..links.length() {
        if let Some(node) = links.item(index) {
            if let Ok(link) = node.dyn_into::<HtmlLinkElement>() {
                let href = link.href();
                if matches_stylesheet(&href, file) {
                    link.set_href(&buster.bust(&href, now_ms));
                    refreshed += 1;
                }
            }
        }
    }
    Ok(refreshed)
}

/// Full page navigation reload. Ends this process's lifetime: all in-memory
/// state, including any pending banner, is discarded.
pub(crate) fn reload_page() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

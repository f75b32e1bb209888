// Browser integration tests for the dev-watcher client.
// Run with: wasm-pack test --headless --firefox (or --chrome)

#![cfg(target_arch = "wasm32")]

use dev_watcher::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const EVENT_URL: &str = "http://localhost:8080/dev/watch";

/// Nothing listens here, so the open fails fast with a refused connection.
const DEAD_URL: &str = "ws://127.0.0.1:59123/dev/watch";

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

/// Attach a stylesheet link to the body and return it.
fn attach_stylesheet(href: &str) -> web_sys::Element {
    let link = document().create_element("link").unwrap();
    link.set_attribute("rel", "stylesheet").unwrap();
    link.set_attribute("href", href).unwrap();
    document().body().unwrap().append_child(&link).unwrap();
    link
}

fn detach(element: &web_sys::Element) {
    document().body().unwrap().remove_child(element).unwrap();
}

// ==================== Construction ====================

#[wasm_bindgen_test]
fn test_watcher_creation_valid() {
    let watcher = DevWatcher::new(EVENT_URL.to_string(), "sse");
    assert!(watcher.is_ok(), "creation should succeed with valid parameters");
}

#[wasm_bindgen_test]
fn test_watcher_creation_empty_url() {
    let watcher = DevWatcher::new("".to_string(), "sse");
    assert!(watcher.is_err(), "creation should fail with an empty URL");
}

#[wasm_bindgen_test]
fn test_watcher_creation_bad_scheme() {
    let watcher = DevWatcher::new("localhost:8080/dev/watch".to_string(), "sse");
    assert!(watcher.is_err(), "creation should fail without a URL scheme");
}

#[wasm_bindgen_test]
fn test_watcher_creation_sse_rejects_socket_url() {
    let watcher = DevWatcher::new("ws://localhost:8080/dev/watch".to_string(), "sse");
    assert!(watcher.is_err(), "sse cannot watch a socket-scheme URL");
}

#[wasm_bindgen_test]
fn test_watcher_creation_unknown_transport() {
    let watcher = DevWatcher::new(EVENT_URL.to_string(), "polling");
    assert!(watcher.is_err(), "creation should fail with an unknown transport");
}

#[wasm_bindgen_test]
fn test_watcher_with_options_defaults() {
    let watcher = DevWatcher::with_options(EVENT_URL.to_string(), "{}");
    assert!(watcher.is_ok(), "empty options object should use defaults");
}

#[wasm_bindgen_test]
fn test_watcher_with_options_invalid_json() {
    let watcher = DevWatcher::with_options(EVENT_URL.to_string(), "not json");
    assert!(watcher.is_err(), "malformed options JSON should fail");
}

#[wasm_bindgen_test]
fn test_initial_state_is_disconnected() {
    let watcher = DevWatcher::new(EVENT_URL.to_string(), "sse").unwrap();
    assert_eq!(watcher.connection_state(), "disconnected");
    assert!(!watcher.is_connected());
}

// ==================== Disconnect recovery ====================

#[wasm_bindgen_test]
async fn test_lost_connection_renders_one_banner_and_enters_recovery() {
    let body = document().body().unwrap();
    let children_before = body.child_element_count();

    // the long delay keeps the retry timer from firing again mid-test
    let watcher = DevWatcher::with_options(
        DEAD_URL.to_string(),
        r#"{"transport":"ws","reconnect_delay_ms":600000}"#,
    )
    .unwrap();
    watcher.start().unwrap();
    assert_eq!(watcher.connection_state(), "connecting");

    sleep_ms(500).await;

    assert!(!watcher.is_connected());
    let state = watcher.connection_state();
    assert!(
        state == "connecting" || state == "failed",
        "recovery should be underway, got '{state}'"
    );
    // the dead socket fires both error and close; only one banner may
    // come out of it
    assert_eq!(
        body.child_element_count(),
        children_before + 1,
        "exactly one banner per lost connection"
    );
    let banner = body.last_element_child().unwrap();
    assert_eq!(banner.text_content().unwrap(), "Reconnecting...");

    body.remove_child(&banner).unwrap();
}

#[wasm_bindgen_test]
async fn test_start_mid_outage_does_not_attach_a_second_channel() {
    let body = document().body().unwrap();
    let children_before = body.child_element_count();

    let watcher = DevWatcher::with_options(
        DEAD_URL.to_string(),
        r#"{"transport":"ws","reconnect_delay_ms":600000}"#,
    )
    .unwrap();
    watcher.start().unwrap();
    watcher.start().unwrap();

    sleep_ms(500).await;

    // the recovery loop owns the channel slot now; starting again must
    // still be a no-op
    watcher.start().unwrap();
    sleep_ms(300).await;

    assert_eq!(
        body.child_element_count(),
        children_before + 1,
        "repeated start calls must not produce extra banners"
    );

    let banner = body.last_element_child().unwrap();
    body.remove_child(&banner).unwrap();
}

// ==================== Stylesheet refresh ====================

#[wasm_bindgen_test]
fn test_file_event_rewrites_matching_stylesheet() {
    let link = attach_stylesheet("style.css?173");
    let watcher = DevWatcher::new(EVENT_URL.to_string(), "sse").unwrap();

    watcher.handle_file_event("style.css");

    let href = link.get_attribute("href").unwrap();
    let (base, stamp) = href.split_once('?').expect("rewritten href should carry a query");
    assert!(base.ends_with("style.css"));
    let stamp: u64 = stamp.parse().expect("query should be a numeric timestamp");
    assert!(stamp > 173, "new stamp should be newer than the old one");

    detach(&link);
}

#[wasm_bindgen_test]
fn test_file_event_leaves_other_stylesheets_alone() {
    let matching = attach_stylesheet("style.css");
    let other = attach_stylesheet("other.css?42");
    let watcher = DevWatcher::new(EVENT_URL.to_string(), "sse").unwrap();

    watcher.handle_file_event("style.css");

    assert_eq!(
        other.get_attribute("href").unwrap(),
        "other.css?42",
        "non-matching links must stay byte-for-byte unchanged"
    );
    assert!(matching.get_attribute("href").unwrap().contains('?'));

    detach(&matching);
    detach(&other);
}

#[wasm_bindgen_test]
fn test_repeated_events_issue_strictly_newer_stamps() {
    let link = attach_stylesheet("style.css");
    let watcher = DevWatcher::new(EVENT_URL.to_string(), "sse").unwrap();

    watcher.handle_file_event("style.css");
    let first: u64 = link
        .get_attribute("href")
        .unwrap()
        .split_once('?')
        .unwrap()
        .1
        .parse()
        .unwrap();

    watcher.handle_file_event("style.css");
    let second: u64 = link
        .get_attribute("href")
        .unwrap()
        .split_once('?')
        .unwrap()
        .1
        .parse()
        .unwrap();

    assert!(second > first, "stamps must strictly increase, even within one millisecond");

    detach(&link);
}

#[wasm_bindgen_test]
fn test_non_css_file_event_mutates_nothing() {
    let link = attach_stylesheet("style.css?7");
    let watcher = DevWatcher::new(EVENT_URL.to_string(), "sse").unwrap();

    watcher.handle_file_event("app.js");

    assert_eq!(link.get_attribute("href").unwrap(), "style.css?7");

    detach(&link);
}

// ==================== Envelope dispatch ====================

#[wasm_bindgen_test]
fn test_envelope_file_event_rewrites_stylesheet() {
    let link = attach_stylesheet("style.css?173");
    let watcher = DevWatcher::new(EVENT_URL.to_string(), "ws").unwrap();

    watcher.handle_data_event(r#"{"type":"file","file":"style.css"}"#);

    let href = link.get_attribute("href").unwrap();
    let stamp: u64 = href.split_once('?').unwrap().1.parse().unwrap();
    assert!(stamp > 173);

    detach(&link);
}

#[wasm_bindgen_test]
fn test_keep_alive_produces_no_dom_mutation() {
    let link = attach_stylesheet("style.css?7");
    let body = document().body().unwrap();
    let children_before = body.child_element_count();
    let watcher = DevWatcher::new(EVENT_URL.to_string(), "ws").unwrap();

    watcher.handle_data_event(r#"{"type":"keep-alive"}"#);
    watcher.handle_data_event(r#"{"type":"ping"}"#);

    assert_eq!(link.get_attribute("href").unwrap(), "style.css?7");
    assert_eq!(body.child_element_count(), children_before);

    detach(&link);
}

#[wasm_bindgen_test]
fn test_unrecognized_and_malformed_payloads_are_not_fatal() {
    let link = attach_stylesheet("style.css?7");
    let watcher = DevWatcher::new(EVENT_URL.to_string(), "ws").unwrap();

    watcher.handle_data_event(r#"{"type":"rebuild"}"#);
    watcher.handle_data_event("not json at all");

    // still functional afterwards
    watcher.handle_data_event(r#"{"type":"file","file":"style.css"}"#);
    assert_ne!(link.get_attribute("href").unwrap(), "style.css?7");

    detach(&link);
}

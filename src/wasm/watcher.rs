use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::css::CacheBuster;
use crate::dispatch::{classify, Action};
use crate::endpoint;
use crate::models::{PayloadMode, TransportKind, WatchOptions};
use crate::state::{ConnectionEvent, ConnectionState};

use super::console_log;
use super::dom;
use super::helpers::{global_set_timeout, now_ms};
use super::transport::{open_channel, ChannelBindings, TransportChannel};

/// The single live channel handle, shared with the callbacks that may need
/// to close it.
type SharedChannel = Rc<RefCell<Option<Box<dyn TransportChannel>>>>;
type SharedState = Rc<RefCell<ConnectionState>>;

/// Browser-side auto-reload client.
///
/// Opens a push-event channel to a development server, refreshes matching
/// stylesheets on `file` events and reloads the page once the server comes
/// back after a restart. The retry loop runs indefinitely with a fixed
/// delay; there is no fatal error path.
///
/// # Example (JavaScript)
/// ```js
/// import init, { DevWatcher } from './pkg/dev_watcher.js';
///
/// await init();
/// const watcher = new DevWatcher("http://localhost:8080/dev/watch", "sse");
/// watcher.start();
/// ```
#[wasm_bindgen]
pub struct DevWatcher {
    url: String,
    options: WatchOptions,
    /// The single live channel handle; replaced, never reconfigured.
    channel: SharedChannel,
    /// Lifecycle state shared with the transport callbacks.
    state: SharedState,
    /// Issues strictly increasing cache-busting stamps.
    buster: Rc<RefCell<CacheBuster>>,
}

#[wasm_bindgen]
impl DevWatcher {
    /// Create a new watcher.
    ///
    /// # Arguments
    /// * `url` - event endpoint, injected by whatever embeds the watcher
    ///   (e.g. "http://localhost:8080/dev/watch")
    /// * `transport` - `"sse"` for one-way server push, `"ws"` for the
    ///   full-duplex socket transport
    ///
    /// # Errors
    /// Returns a JsValue error if the URL is empty, uses an unknown scheme,
    /// or the transport name is not recognized.
    #[wasm_bindgen(constructor)]
    pub fn new(url: String, transport: &str) -> Result<DevWatcher, JsValue> {
        console_error_panic_hook::set_once();

        let kind =
            TransportKind::parse(transport).map_err(|e| JsValue::from_str(&e.to_string()))?;
        endpoint::validate_event_url(&url, kind)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self::with_watch_options(url, WatchOptions::new().with_transport(kind)))
    }

    /// Create a watcher from a JSON options object.
    ///
    /// Missing fields fall back to their defaults, so `"{}"` is valid.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const watcher = DevWatcher.withOptions(
    ///   "http://localhost:8080/dev/watch",
    ///   JSON.stringify({ transport: "ws", reconnect_delay_ms: 1000 })
    /// );
    /// ```
    #[wasm_bindgen(js_name = withOptions)]
    pub fn with_options(url: String, options: &str) -> Result<DevWatcher, JsValue> {
        console_error_panic_hook::set_once();

        let options: WatchOptions = serde_json::from_str(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid options JSON: {e}")))?;
        endpoint::validate_event_url(&url, options.transport)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self::with_watch_options(url, options))
    }

    /// Open the watch channel and attach the event bindings.
    ///
    /// Returns immediately; from here on everything happens in callbacks.
    /// Calling `start()` on a watcher that is already running is a no-op,
    /// including mid-outage while the reconnect loop owns the channel slot.
    pub fn start(&self) -> Result<(), JsValue> {
        if *self.state.borrow() != ConnectionState::Disconnected {
            console_log("already watching, skipping start");
            return Ok(());
        }

        console_log("starting watch...");
        apply(&self.state, ConnectionEvent::OpenRequested);

        let mode = self.options.transport.payload_mode();
        let buster = Rc::clone(&self.buster);
        let on_data = Box::new(move |payload: String| {
            run_action(classify(&payload, mode), &buster);
        });

        let state = Rc::clone(&self.state);
        let on_open = Box::new(move || {
            console_log("connected");
            apply(&state, ConnectionEvent::Opened);
        });

        // close and error can both fire for the same dead handle; the shared
        // flag keeps the recovery single-shot per handle
        let lost = Rc::new(RefCell::new(false));

        let bindings = ChannelBindings {
            on_open: Some(on_open),
            on_data: Some(on_data),
            on_ping: Some(Box::new(|| {})),
            on_error: Some(self.disconnect_handler(Rc::clone(&lost))),
            on_close: Some(self.disconnect_handler(lost)),
        };

        let channel = open_channel(self.options.transport, &self.url, bindings)?;
        *self.channel.borrow_mut() = Some(channel);
        Ok(())
    }

    /// Whether the watch channel is currently open.
    #[wasm_bindgen(js_name = isConnected)]
    pub fn is_connected(&self) -> bool {
        self.state.borrow().is_open()
    }

    /// Current lifecycle state: "disconnected", "connecting", "open" or
    /// "failed".
    #[wasm_bindgen(js_name = connectionState)]
    pub fn connection_state(&self) -> String {
        self.state.borrow().as_str().to_string()
    }

    /// Process one inbound payload as if it had arrived on the channel,
    /// using the configured transport's framing.
    #[wasm_bindgen(js_name = handleDataEvent)]
    pub fn handle_data_event(&self, payload: &str) {
        run_action(classify(payload, self.options.transport.payload_mode()), &self.buster);
    }

    /// Process one file-changed path directly. Non-CSS paths are a no-op.
    #[wasm_bindgen(js_name = handleFileEvent)]
    pub fn handle_file_event(&self, path: &str) {
        run_action(classify(path, PayloadMode::Bare), &self.buster);
    }
}

impl DevWatcher {
    fn with_watch_options(url: String, options: WatchOptions) -> DevWatcher {
        DevWatcher {
            url,
            options,
            channel: Rc::new(RefCell::new(None)),
            state: Rc::new(RefCell::new(ConnectionState::default())),
            buster: Rc::new(RefCell::new(CacheBuster::new())),
        }
    }

    /// Build the handler invoked when the watch channel dies: close the
    /// handle, render the banner, hand over to the reconnect loop.
    fn disconnect_handler(&self, lost: Rc<RefCell<bool>>) -> Box<dyn FnMut()> {
        let url = self.url.clone();
        let options = self.options.clone();
        let channel = Rc::clone(&self.channel);
        let state = Rc::clone(&self.state);

        Box::new(move || {
            if *lost.borrow() {
                return;
            }
            *lost.borrow_mut() = true;

            console_log("connection lost, start reconnecting...");
            apply(&state, ConnectionEvent::TransportError);

            // close-before-replace: the dead handle goes away before the
            // reconnect loop opens a new one
            if let Some(handle) = channel.borrow_mut().take() {
                handle.close();
            }

            if let Err(e) = dom::append_banner(&options.banner_text) {
                console_log(&format!("failed to render banner: {e:?}"));
            }

            reconnect(url.clone(), options.clone(), Rc::clone(&channel), Rc::clone(&state));
        })
    }
}

fn apply(state: &SharedState, event: ConnectionEvent) {
    let mut state = state.borrow_mut();
    *state = state.apply(event);
}

/// Apply the effect selected for one inbound payload.
fn run_action(action: Action, buster: &Rc<RefCell<CacheBuster>>) {
    match action {
        Action::RefreshCss(file) => {
            console_log(&format!("css reset {file}"));
            match dom::refresh_stylesheets(&file, &mut buster.borrow_mut(), now_ms()) {
                // zero rewritten links is a silent no-op, not an error
                Ok(_) => {}
                Err(e) => console_log(&format!("stylesheet refresh failed: {e:?}")),
            }
        }
        Action::None => {}
        Action::Ignored(reason) => console_log(&format!("ignoring event: {reason}")),
    }
}

/// One reconnect attempt: open a channel with exactly two live bindings.
/// A successful open reloads the page — the recovery terminal action — and
/// an error closes the handle and schedules the next attempt.
fn reconnect(url: String, options: WatchOptions, channel: SharedChannel, state: SharedState) {
    apply(&state, ConnectionEvent::RetryTimerFired);

    let on_open = Box::new(move || {
        // terminal: the navigation discards all in-memory state
        dom::reload_page();
    });

    let retry_url = url.clone();
    let retry_options = options.clone();
    let retry_channel = Rc::clone(&channel);
    let retry_state = Rc::clone(&state);
    let on_error = Box::new(move || {
        // close immediately to suppress the transport's native auto-retry
        if let Some(handle) = retry_channel.borrow_mut().take() {
            handle.close();
        }
        apply(&retry_state, ConnectionEvent::TransportError);
        schedule_reconnect(
            retry_url.clone(),
            retry_options.clone(),
            Rc::clone(&retry_channel),
            Rc::clone(&retry_state),
        );
    });

    let bindings = ChannelBindings {
        on_open: Some(on_open),
        on_error: Some(on_error),
        ..ChannelBindings::default()
    };

    match open_channel(options.transport, &url, bindings) {
        Ok(handle) => {
            *channel.borrow_mut() = Some(handle);
        }
        Err(e) => {
            // constructor failure takes the same recovery path as a
            // transport error
            console_log(&format!("failed to open channel: {e:?}"));
            apply(&state, ConnectionEvent::TransportError);
            schedule_reconnect(url, options, channel, state);
        }
    }
}

/// Arm the single backoff timer; when it fires the loop re-enters
/// [`reconnect`].
fn schedule_reconnect(url: String, options: WatchOptions, channel: SharedChannel, state: SharedState) {
    let delay = options.reconnect_delay_ms as i32;
    let retry = Closure::wrap(Box::new(move || {
        reconnect(url.clone(), options.clone(), Rc::clone(&channel), Rc::clone(&state));
    }) as Box<dyn FnMut()>);

    global_set_timeout(retry.as_ref().unchecked_ref(), delay);
    retry.forget();
}

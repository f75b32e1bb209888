//! The two push-event transports behind one channel interface.
//!
//! The Connection Manager stays ignorant of transport specifics: it hands a
//! set of event bindings to [`open_channel`] and gets back an opaque handle
//! it can only close. A handle is never reconfigured — reconnecting always
//! builds a new one.

use wasm_bindgen::prelude::{Closure, JsValue};
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, ErrorEvent, Event, EventSource, MessageEvent, WebSocket};

use crate::endpoint;
use crate::models::TransportKind;

/// Handlers attached to a channel at open time. Absent handlers are no-ops.
///
/// `on_ping` only has a surface on the SSE transport, where keep-alives
/// arrive as a named `ping` event; the socket transport delivers them inside
/// the JSON envelope on `on_data`.
#[derive(Default)]
pub(crate) struct ChannelBindings {
    pub on_open: Option<Box<dyn FnMut()>>,
    pub on_data: Option<Box<dyn FnMut(String)>>,
    pub on_ping: Option<Box<dyn FnMut()>>,
    pub on_error: Option<Box<dyn FnMut()>>,
    pub on_close: Option<Box<dyn FnMut()>>,
}

/// A live push-event channel. One instance is live at a time; it is
/// replaced, never pooled.
pub(crate) trait TransportChannel {
    /// Close the underlying connection. Safe to call on an already-closed
    /// channel.
    fn close(&self);
}

/// Open a new channel of the configured kind and attach the bindings.
///
/// Failure to connect is not synchronous: a constructor error here only
/// means the URL was unusable, everything else surfaces through `on_error`.
pub(crate) fn open_channel(
    kind: TransportKind,
    url: &str,
    bindings: ChannelBindings,
) -> Result<Box<dyn TransportChannel>, JsValue> {
    match kind {
        TransportKind::Sse => Ok(Box::new(SseChannel::open(url, bindings)?)),
        TransportKind::Ws => Ok(Box::new(SocketChannel::open(url, bindings)?)),
    }
}

/// One-way server push over `EventSource`.
///
/// Events are routed by name on the wire: `file` carries a bare path in its
/// data field, `ping` carries nothing.
pub(crate) struct SseChannel {
    source: EventSource,
}

impl SseChannel {
    fn open(url: &str, bindings: ChannelBindings) -> Result<Self, JsValue> {
        let source = EventSource::new(url)?;

        if let Some(mut handler) = bindings.on_open {
            let callback = Closure::wrap(Box::new(move |_: Event| handler()) as Box<dyn FnMut(Event)>);
            source.add_event_listener_with_callback("open", callback.as_ref().unchecked_ref())?;
            callback.forget();
        }

        if let Some(mut handler) = bindings.on_data {
            let callback = Closure::wrap(Box::new(move |e: MessageEvent| {
                if let Some(data) = e.data().as_string() {
                    handler(data);
                }
            }) as Box<dyn FnMut(MessageEvent)>);
            source.add_event_listener_with_callback("file", callback.as_ref().unchecked_ref())?;
            callback.forget();
        }

        if let Some(mut handler) = bindings.on_ping {
            let callback = Closure::wrap(Box::new(move |_: Event| handler()) as Box<dyn FnMut(Event)>);
            source.add_event_listener_with_callback("ping", callback.as_ref().unchecked_ref())?;
            callback.forget();
        }

        if let Some(mut handler) = bindings.on_error {
            let callback = Closure::wrap(Box::new(move |_: Event| handler()) as Box<dyn FnMut(Event)>);
            source.add_event_listener_with_callback("error", callback.as_ref().unchecked_ref())?;
            callback.forget();
        }

        if let Some(mut handler) = bindings.on_close {
            // EventSource never fires this itself; bound for servers that
            // emit an explicit close event before going down
            let callback = Closure::wrap(Box::new(move |_: Event| handler()) as Box<dyn FnMut(Event)>);
            source.add_event_listener_with_callback("close", callback.as_ref().unchecked_ref())?;
            callback.forget();
        }

        Ok(Self { source })
    }
}

impl TransportChannel for SseChannel {
    fn close(&self) {
        // also suppresses EventSource's native auto-retry
        self.source.close();
    }
}

/// Full-duplex socket transport. Payloads arrive as JSON envelopes on the
/// single message event.
pub(crate) struct SocketChannel {
    socket: WebSocket,
}

impl SocketChannel {
    fn open(url: &str, bindings: ChannelBindings) -> Result<Self, JsValue> {
        let socket = WebSocket::new(&endpoint::socket_url(url))?;

        if let Some(mut handler) = bindings.on_open {
            let callback = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
            socket.set_onopen(Some(callback.as_ref().unchecked_ref()));
            callback.forget();
        }

        if let Some(mut handler) = bindings.on_data {
            let callback = Closure::wrap(Box::new(move |e: MessageEvent| {
                if let Ok(txt) = e.data().dyn_into::<js_sys::JsString>() {
                    handler(String::from(txt));
                }
            }) as Box<dyn FnMut(MessageEvent)>);
            socket.set_onmessage(Some(callback.as_ref().unchecked_ref()));
            callback.forget();
        }

        if let Some(mut handler) = bindings.on_error {
            let callback =
                Closure::wrap(Box::new(move |_: ErrorEvent| handler()) as Box<dyn FnMut(ErrorEvent)>);
            socket.set_onerror(Some(callback.as_ref().unchecked_ref()));
            callback.forget();
        }

        if let Some(mut handler) = bindings.on_close {
            let callback =
                Closure::wrap(Box::new(move |_: CloseEvent| handler()) as Box<dyn FnMut(CloseEvent)>);
            socket.set_onclose(Some(callback.as_ref().unchecked_ref()));
            callback.forget();
        }

        Ok(Self { socket })
    }
}

impl TransportChannel for SocketChannel {
    fn close(&self) {
        let _ = self.socket.close();
    }
}

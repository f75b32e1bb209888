//! Classification of inbound payloads.
//!
//! Pure half of the Event Dispatcher: turns a raw payload into the effect
//! to perform, without touching the DOM. The wasm layer applies the effect.

use crate::css::is_css_path;
use crate::models::{PayloadMode, ServerEvent};

/// Effect selected for one inbound payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Rewrite every matching stylesheet link with a fresh cache-busting
    /// query parameter.
    RefreshCss(String),
    /// Keep-alive or a non-CSS file: nothing to do.
    None,
    /// Payload could not be interpreted; logged and discarded, the
    /// connection stays open.
    Ignored(String),
}

/// Classify a raw payload according to the transport's framing.
pub fn classify(payload: &str, mode: PayloadMode) -> Action {
    let file = match mode {
        PayloadMode::Bare => payload.to_string(),
        PayloadMode::Envelope => match serde_json::from_str::<ServerEvent>(payload) {
            Ok(ServerEvent::File { file }) => file,
            Ok(ServerEvent::KeepAlive | ServerEvent::Ping) => return Action::None,
            Ok(ServerEvent::Unknown) => {
                return Action::Ignored(format!("unrecognized event type in {payload:?}"))
            }
            Err(e) => return Action::Ignored(format!("malformed payload: {e}")),
        },
    };

    if is_css_path(&file) {
        Action::RefreshCss(file)
    } else {
        // JS hot-reload and friends are out of scope; anything that is not
        // a stylesheet waits for the next full reload
        Action::None
    }
}

//! Handling of the injected event URL.
//!
//! The endpoint is supplied by whatever embeds the watcher; the client never
//! discovers ports or protocols on its own. Only the URL shape is checked
//! up front; whether anything actually listens there surfaces later through
//! the transport's error callback.

use crate::error::WatchError;
use crate::models::TransportKind;

const HTTP_SCHEMES: [&str; 2] = ["http://", "https://"];
const SOCKET_SCHEMES: [&str; 2] = ["ws://", "wss://"];

/// Validate the injected event URL shape against the chosen transport.
///
/// SSE only speaks HTTP; a socket-scheme URL there would otherwise fail
/// later inside `EventSource::new` with a far less helpful error. The
/// socket transport accepts socket schemes directly and converts `http(s)`
/// via [`socket_url`].
pub fn validate_event_url(url: &str, transport: TransportKind) -> Result<(), WatchError> {
    if url.is_empty() {
        return Err(WatchError::EmptyUrl);
    }

    let is_http = HTTP_SCHEMES.iter().any(|scheme| url.starts_with(scheme));
    let is_socket = SOCKET_SCHEMES.iter().any(|scheme| url.starts_with(scheme));

    if !is_http && !is_socket {
        return Err(WatchError::InvalidUrlScheme(url.to_string()));
    }
    if transport == TransportKind::Sse && is_socket {
        return Err(WatchError::SseRequiresHttp(url.to_string()));
    }
    Ok(())
}

/// Convert an `http(s)://` event URL to its `ws(s)://` equivalent for the
/// socket transport. URLs already using a socket scheme pass through.
pub fn socket_url(url: &str) -> String {
    if url.starts_with("https://") {
        url.replacen("https://", "wss://", 1)
    } else if url.starts_with("http://") {
        url.replacen("http://", "ws://", 1)
    } else {
        url.to_string()
    }
}

use serde::{Deserialize, Serialize};

/// Routed event envelope sent by the development server.
///
/// Only used on transports that frame payloads as JSON; the SSE transport
/// delivers bare file paths on named events instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// A file changed on the server side.
    File {
        /// Server-relative path of the changed file.
        file: String,
    },

    /// Keeps the connection alive through intermediary timeouts; carries
    /// nothing and triggers nothing.
    KeepAlive,

    /// Alias some servers emit for keep-alive.
    Ping,

    /// Any type this client does not recognize. Tolerated, logged, ignored.
    #[serde(other)]
    Unknown,
}

use serde::{Deserialize, Serialize};

use crate::error::WatchError;

/// Which push-event primitive the Connection Manager constructs.
///
/// Supplied at construction time; the watcher never negotiates or switches
/// transports at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// One-way server push over `EventSource`.
    #[default]
    Sse,
    /// Full-duplex socket transport.
    Ws,
}

impl TransportKind {
    /// Parse the externally injected transport name.
    pub fn parse(value: &str) -> Result<Self, WatchError> {
        match value {
            "sse" => Ok(TransportKind::Sse),
            "ws" | "websocket" => Ok(TransportKind::Ws),
            other => Err(WatchError::UnknownTransport(other.to_string())),
        }
    }

    /// How message payloads are framed on this transport: SSE routes events
    /// by name and carries bare file paths, the socket transport carries a
    /// JSON envelope on its single message event.
    pub fn payload_mode(self) -> PayloadMode {
        match self {
            TransportKind::Sse => PayloadMode::Bare,
            TransportKind::Ws => PayloadMode::Envelope,
        }
    }
}

/// Payload framing: a routed `{type, ...}` JSON envelope or a bare file
/// path string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    Envelope,
    Bare,
}

use serde::{Deserialize, Serialize};

use super::TransportKind;

/// Connection-level options for the watcher.
///
/// Everything here has a default matching the original deployment, so an
/// embedding page normally passes nothing but the endpoint URL.
///
/// # Example
///
/// ```rust
/// use dev_watcher::{TransportKind, WatchOptions};
///
/// let options = WatchOptions::new()
///     .with_transport(TransportKind::Ws)
///     .with_reconnect_delay_ms(1000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchOptions {
    /// Transport to open the channel with.
    /// Default: Sse.
    #[serde(default)]
    pub transport: TransportKind,

    /// Fixed delay between reconnect attempts, in milliseconds.
    /// Default: 500. There is no exponential growth, no cap and no jitter:
    /// the server is local and expected to come back.
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u32,

    /// Text shown in the connection-lost banner.
    /// Default: "Reconnecting...".
    #[serde(default = "default_banner_text")]
    pub banner_text: String,
}

fn default_reconnect_delay_ms() -> u32 {
    500
}

fn default_banner_text() -> String {
    "Reconnecting...".to_string()
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            transport: TransportKind::default(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
            banner_text: default_banner_text(),
        }
    }
}

impl WatchOptions {
    /// Create new watch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transport to open the channel with.
    pub fn with_transport(mut self, transport: TransportKind) -> Self {
        self.transport = transport;
        self
    }

    /// Set the fixed delay between reconnect attempts (in milliseconds).
    pub fn with_reconnect_delay_ms(mut self, delay_ms: u32) -> Self {
        self.reconnect_delay_ms = delay_ms;
        self
    }

    /// Set the text shown in the connection-lost banner.
    pub fn with_banner_text(mut self, text: impl Into<String>) -> Self {
        self.banner_text = text.into();
        self
    }
}

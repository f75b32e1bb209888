//! Connection lifecycle state machine.
//!
//! The reconnect loop is driven by transport callbacks and one timer, so the
//! state machine is an explicit enum plus a transition function instead of
//! recursion through the call stack.

/// Lifecycle state of the single live channel.
///
/// `Open` is never left by normal operation: a successful reconnect reloads
/// the page, which ends this process's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Open,
    Failed,
}

/// Transport and timer callbacks that drive the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// A channel open was requested.
    OpenRequested,
    /// The transport fired its open event.
    Opened,
    /// The transport fired close or error.
    TransportError,
    /// The backoff timer fired; a new attempt begins.
    RetryTimerFired,
}

impl ConnectionState {
    /// Apply one event. Pairs with no defined transition leave the state
    /// unchanged, which is what makes a second close/error on an
    /// already-failed handle harmless.
    pub fn apply(self, event: ConnectionEvent) -> ConnectionState {
        use ConnectionEvent::*;
        use ConnectionState::*;

        match (self, event) {
            (Disconnected, OpenRequested) => Connecting,
            (Failed, RetryTimerFired) => Connecting,
            (Connecting, Opened) => Open,
            (Connecting | Open, TransportError) => Failed,
            (state, _) => state,
        }
    }

    pub fn is_open(self) -> bool {
        self == ConnectionState::Open
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::Failed => "failed",
        }
    }
}

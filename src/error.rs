use thiserror::Error;

/// Construction-time validation errors.
///
/// Nothing at runtime produces a `WatchError`: connection failures feed the
/// reconnect loop and malformed payloads are logged and dropped, so no error
/// ever crosses a component boundary after `start()`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WatchError {
    #[error("event URL cannot be empty")]
    EmptyUrl,

    #[error("event URL must start with http://, https://, ws:// or wss:// (got '{0}')")]
    InvalidUrlScheme(String),

    #[error("the sse transport requires an http:// or https:// event URL (got '{0}')")]
    SseRequiresHttp(String),

    #[error("unknown transport '{0}', expected \"sse\" or \"ws\"")]
    UnknownTransport(String),
}

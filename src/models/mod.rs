//! Data models for the dev-watcher client.
//!
//! Defines the inbound event envelope, the transport selection, and the
//! connection-level options.

pub mod server_event;
pub mod transport_kind;
pub mod watch_options;


pub use server_event::ServerEvent;
pub use transport_kind::{PayloadMode, TransportKind};
pub use watch_options::WatchOptions;

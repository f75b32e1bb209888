//! Browser-side auto-reload client for local development servers.
//!
//! Keeps a push-event channel open to a configured endpoint and reacts to
//! two event kinds: a file change refreshes matching stylesheets in place
//! (cache-busting query rewrite), and a dropped connection starts a fixed
//! 500 ms retry loop that reloads the whole page once the server is back.
//!
//! The crate compiles to WebAssembly; the JavaScript entry point constructs
//! a [`DevWatcher`] and calls `start()`:
//!
//! ```js
//! import init, { DevWatcher } from './pkg/dev_watcher.js';
//!
//! await init();
//! const watcher = new DevWatcher("http://localhost:8080/dev/watch", "sse");
//! watcher.start();
//! ```
//!
//! Everything outside the `wasm` module is pure and testable on any target:
//! payload classification, stylesheet matching, the connection state
//! machine, and the option types.

pub mod css;
pub mod dispatch;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod state;
pub mod wasm;

pub use css::CacheBuster;
pub use dispatch::{classify, Action};
pub use error::WatchError;
pub use models::{PayloadMode, ServerEvent, TransportKind, WatchOptions};
pub use state::{ConnectionEvent, ConnectionState};

#[cfg(target_arch = "wasm32")]
pub use wasm::DevWatcher;

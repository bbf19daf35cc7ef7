//! Client for the ln.bot Lightning payment API.
//!
//! Two facades expose the same resource namespaces: [`LnBot`] for async
//! code on Tokio and [`BlockingLnBot`] (feature `blocking`, on by default)
//! for synchronous code. Both send one HTTP request per call, never retry,
//! and report failures as a single [`Error`] type whose variants follow the
//! HTTP status of the response.
//!
//! Invoice and payment settlement can be awaited over server-sent events
//! with [`Invoices::watch`](resources::Invoices) and
//! [`Payments::watch`](resources::Payments), which return lazily connected
//! streams that release their connection on completion, on
//! [`close`](EventStream::close), or when dropped.
//!
//! # Modules
//!
//! - [`client`]: the [`LnBot`] and [`BlockingLnBot`] facades
//! - [`config`]: API key, base URL and timeout
//! - [`error`]: error taxonomy
//! - [`request`]: request descriptor shared by both transports
//! - [`transport`]: async and blocking transports
//! - [`resources`]: resource namespaces
//! - [`stream`]: settlement, payment and wallet event streams
//! - [`constants`]: default endpoint, environment variable, headers
//!
//! Wire types live in the [`proto`] crate, re-exported here.
//!
//! # Feature flags
//!
//! - `blocking` (default): blocking transport, streams and facade
//! - `telemetry`: `tracing` spans around requests and stream lifecycle events
//! - `full`: both

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod request;
pub mod resources;
pub mod stream;
pub mod transport;

pub use lnbot_proto as proto;

#[cfg(feature = "blocking")]
pub use client::BlockingLnBot;
pub use client::LnBot;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ApiError, ConfigError, Error, ErrorKind, Result};
pub use request::Request;
#[cfg(feature = "blocking")]
pub use stream::BlockingEventStream;
pub use stream::{EventStream, StreamEvent, StreamState, WatchOptions};
#[cfg(feature = "blocking")]
pub use transport::BlockingTransport;
pub use transport::HttpTransport;

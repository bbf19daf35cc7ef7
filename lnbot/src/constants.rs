//! Fixed values shared by the transport, configuration and streams.

use std::time::Duration;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.ln.bot";

/// Environment variable consulted for the API key when none is given explicitly.
pub const API_KEY_ENV: &str = "LNBOT_API_KEY";

/// Per-request timeout used when the configuration does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("lnbot-rust/", env!("CARGO_PKG_VERSION"));

/// `Accept` value for request/response calls.
pub const ACCEPT_JSON: &str = "application/json";

/// `Accept` value for event streams.
pub const ACCEPT_EVENT_STREAM: &str = "text/event-stream";

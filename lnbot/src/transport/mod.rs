//! Transport core.
//!
//! [`HttpTransport`] and [`BlockingTransport`] share one contract: take a
//! [`Request`](crate::Request), perform exactly one round trip with the
//! configured timeout, return the decoded JSON on a 2xx status and a
//! classified [`Error`](crate::Error) otherwise. They never retry. Request
//! building and response classification live in [`crate::request`] and
//! [`crate::error`]; only the I/O primitive differs between the two.

mod async_impl;
pub use async_impl::HttpTransport;

#[cfg(feature = "blocking")]
mod blocking;
#[cfg(feature = "blocking")]
pub use blocking::BlockingTransport;
#[cfg(feature = "blocking")]
pub(crate) use blocking::StreamBody;

use crate::error::Result;

#[cfg(feature = "telemetry")]
use tracing::Span;

/// Records the outcome of a request on the current span.
#[cfg(feature = "telemetry")]
pub(crate) fn record_result_on_span<R>(result: &Result<R>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::DEBUG, error = %err, "lnbot request failed");
        }
    }
}

/// Records the outcome of a request on the current span.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
pub(crate) const fn record_result_on_span<R>(_result: &Result<R>) {}

//! Server-sent event streams.
//!
//! A stream is one long-lived `GET` whose body is decoded frame by frame
//! into typed events. [`EventStream`] is the async variant (a
//! [`futures_util::Stream`]) and [`BlockingEventStream`] the blocking one
//! (an [`Iterator`]); both drive the same decoding core and differ only in
//! how they wait for bytes.
//!
//! Lifecycle: `Connecting -> Open -> {Settled, Expired, Completed, Failed,
//! Cancelled}`. The connection is opened on first consumption and dropped
//! exactly once, when the stream reaches any right-hand state. After that
//! the stream yields nothing more.

mod async_impl;
pub use async_impl::EventStream;

#[cfg(feature = "blocking")]
mod blocking;
#[cfg(feature = "blocking")]
pub use blocking::BlockingEventStream;

use std::marker::PhantomData;
use std::time::Duration;

use lnbot_proto::{
    InvoiceEvent, InvoiceEventKind, PaymentEvent, PaymentEventKind, SseDecoder, SseFrame,
    WalletEvent,
};

use crate::error::{Error, Result};
use crate::request::Request;

/// Where a stream is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StreamState {
    /// Created; the connection opens on first consumption.
    Connecting,
    /// Connected and delivering events.
    Open,
    /// An invoice or payment settled.
    Settled,
    /// An invoice expired.
    Expired,
    /// The stream ended normally without a settlement, e.g. a failed payment.
    Completed,
    /// A transport fault, error status, timeout or bad payload ended the stream.
    Failed,
    /// The consumer closed the stream.
    Cancelled,
}

impl StreamState {
    /// Returns `true` once the stream can yield nothing more.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Connecting | Self::Open)
    }
}

/// An event type deliverable by an event stream.
pub trait StreamEvent: Sized {
    /// Whether the stream is expected to end with a terminal event. When it
    /// is, the server closing the connection first is an
    /// [`Error::Disconnected`].
    const HAS_TERMINAL_EVENT: bool;

    /// Converts a frame. `Ok(None)` skips frames the stream does not deliver,
    /// such as keep-alives.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if a recognised frame carries a bad payload.
    fn from_frame(frame: &SseFrame) -> Result<Option<Self>>;

    /// State the stream moves to after delivering this event, if it ends the stream.
    fn terminal_state(&self) -> Option<StreamState>;
}

impl StreamEvent for InvoiceEvent {
    const HAS_TERMINAL_EVENT: bool = true;

    fn from_frame(frame: &SseFrame) -> Result<Option<Self>> {
        let Some(event) = named_kind::<InvoiceEventKind>(frame) else {
            return Ok(None);
        };
        let data = decode_payload("invoice event", &frame.data)?;
        Ok(Some(Self { event, data }))
    }

    fn terminal_state(&self) -> Option<StreamState> {
        Some(match self.event {
            InvoiceEventKind::Settled => StreamState::Settled,
            InvoiceEventKind::Expired => StreamState::Expired,
        })
    }
}

impl StreamEvent for PaymentEvent {
    const HAS_TERMINAL_EVENT: bool = true;

    fn from_frame(frame: &SseFrame) -> Result<Option<Self>> {
        let Some(event) = named_kind::<PaymentEventKind>(frame) else {
            return Ok(None);
        };
        let data = decode_payload("payment event", &frame.data)?;
        Ok(Some(Self { event, data }))
    }

    fn terminal_state(&self) -> Option<StreamState> {
        Some(match self.event {
            PaymentEventKind::Settled => StreamState::Settled,
            PaymentEventKind::Failed => StreamState::Completed,
        })
    }
}

impl StreamEvent for WalletEvent {
    const HAS_TERMINAL_EVENT: bool = false;

    // Wallet frames carry their name inside the payload; anything that is
    // not such an envelope is a keep-alive.
    fn from_frame(frame: &SseFrame) -> Result<Option<Self>> {
        Ok(serde_json::from_str(&frame.data).ok())
    }

    fn terminal_state(&self) -> Option<StreamState> {
        None
    }
}

fn named_kind<K: std::str::FromStr>(frame: &SseFrame) -> Option<K> {
    frame.event.as_deref()?.trim().parse().ok()
}

fn decode_payload<T: serde::de::DeserializeOwned>(context: &'static str, data: &str) -> Result<T> {
    serde_json::from_str(data).map_err(|source| Error::Decode {
        context,
        body: Some(data.to_owned()),
        source,
    })
}

/// Options for watching a single invoice or payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchOptions {
    /// Give up after this long. Sent to the server and enforced locally,
    /// counting from the first poll of the stream.
    pub timeout: Option<Duration>,
}

impl WatchOptions {
    /// No time limit.
    #[must_use]
    pub const fn new() -> Self {
        Self { timeout: None }
    }

    /// Sets the time limit.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The limit in whole seconds as the server expects it, rounded up.
    #[must_use]
    pub fn server_timeout_secs(&self) -> Option<u64> {
        self.timeout
            .map(|t| t.as_secs() + u64::from(t.subsec_nanos() > 0))
    }

    pub(crate) fn apply(&self, request: Request) -> Request {
        request.query("timeout", self.server_timeout_secs())
    }
}

/// Scheduling-agnostic half of a stream: frame decoding, event typing and
/// the lifecycle state machine.
#[derive(Debug)]
pub(crate) struct EventCore<E> {
    decoder: SseDecoder,
    state: StreamState,
    context: &'static str,
    _event: PhantomData<fn() -> E>,
}

impl<E> EventCore<E> {
    pub(crate) fn new(context: &'static str) -> Self {
        Self {
            decoder: SseDecoder::new(),
            state: StreamState::Connecting,
            context,
            _event: PhantomData,
        }
    }

    pub(crate) const fn state(&self) -> StreamState {
        self.state
    }

    pub(crate) const fn context(&self) -> &'static str {
        self.context
    }

    pub(crate) fn opened(&mut self) {
        self.transition(StreamState::Open);
    }

    pub(crate) fn feed(&mut self, chunk: &[u8]) {
        self.decoder.feed(chunk);
    }

    pub(crate) fn finish_input(&mut self) {
        self.decoder.finish();
    }

    pub(crate) fn fail(&mut self, err: Error) -> Error {
        #[cfg(feature = "telemetry")]
        if !self.state.is_terminal() {
            tracing::debug!(stream = self.context, error = %err, "event stream failed");
        }
        self.transition(StreamState::Failed);
        err
    }

    pub(crate) fn cancel(&mut self) {
        self.transition(StreamState::Cancelled);
    }

    fn transition(&mut self, next: StreamState) {
        if self.state.is_terminal() {
            return;
        }
        #[cfg(feature = "telemetry")]
        tracing::debug!(stream = self.context, from = ?self.state, to = ?next, "event stream state");
        self.state = next;
    }
}

impl<E: StreamEvent> EventCore<E> {
    /// Next deliverable event from the bytes fed so far.
    pub(crate) fn next_event(&mut self) -> Option<Result<E>> {
        if self.state.is_terminal() {
            return None;
        }
        while let Some(frame) = self.decoder.next_frame() {
            match E::from_frame(&frame) {
                Ok(Some(event)) => {
                    if let Some(state) = event.terminal_state() {
                        self.transition(state);
                    }
                    return Some(Ok(event));
                }
                Ok(None) => {
                    #[cfg(feature = "telemetry")]
                    tracing::trace!(stream = self.context, event = ?frame.event, "ignoring frame");
                }
                Err(err) => return Some(Err(self.fail(err))),
            }
        }
        None
    }

    /// Outcome of the server closing the body.
    pub(crate) fn end_of_input(&mut self) -> Option<Result<E>> {
        if self.state.is_terminal() {
            return None;
        }
        if E::HAS_TERMINAL_EVENT {
            Some(Err(self.fail(Error::Disconnected)))
        } else {
            self.transition(StreamState::Completed);
            None
        }
    }
}

use std::fmt;
use std::time::{Duration, Instant};

use super::{EventCore, StreamEvent, StreamState};
use crate::error::{Error, Result};
use crate::request::Request;
use crate::transport::{BlockingTransport, StreamBody};

/// Blocking event stream.
///
/// The connection opens on the first call to [`next`](Iterator::next), on a
/// single-threaded Tokio runtime owned by the stream, so the stream must not
/// be consumed or dropped inside an async context. Each call blocks until the
/// next event or the end of the stream. The client timeout bounds the wait for
/// response headers and the watch timeout bounds the whole stream. On
/// timeout the connection is closed, not abandoned. Breaking out of a `for`
/// loop drops the stream and its connection.
pub struct BlockingEventStream<E> {
    transport: BlockingTransport,
    request: Option<Request>,
    timeout: Option<Duration>,
    body: Option<StreamBody>,
    core: EventCore<E>,
    eof: bool,
}

impl<E: StreamEvent> BlockingEventStream<E> {
    pub(crate) fn new(
        transport: BlockingTransport,
        request: Request,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            core: EventCore::new(request.context()),
            transport,
            request: Some(request),
            timeout,
            body: None,
            eof: false,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> StreamState {
        self.core.state()
    }

    /// Stops the stream and releases its connection. Idempotent.
    pub fn close(&mut self) {
        self.request = None;
        self.body = None;
        self.core.cancel();
    }

    fn fail(&mut self, err: Error) -> Option<Result<E>> {
        self.body = None;
        Some(Err(self.core.fail(err)))
    }
}

impl<E: StreamEvent> Iterator for BlockingEventStream<E> {
    type Item = Result<E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.core.next_event() {
                if self.core.state().is_terminal() {
                    self.body = None;
                }
                return Some(item);
            }
            if self.core.state().is_terminal() {
                self.body = None;
                return None;
            }
            if self.eof {
                self.body = None;
                return self.core.end_of_input();
            }

            if let Some(request) = self.request.take() {
                let deadline = self.timeout.map(|limit| Instant::now() + limit);
                match self.transport.open_stream(&request, deadline) {
                    Ok(body) => {
                        self.body = Some(body);
                        self.core.opened();
                    }
                    Err(err) => return self.fail(err),
                }
                continue;
            }

            let Some(body) = self.body.as_mut() else {
                return None;
            };
            match body.next_chunk() {
                Ok(Some(chunk)) => self.core.feed(&chunk),
                Ok(None) => {
                    self.core.finish_input();
                    self.eof = true;
                }
                Err(err) => return self.fail(err),
            }
        }
    }
}

impl<E> Drop for BlockingEventStream<E> {
    fn drop(&mut self) {
        self.core.cancel();
    }
}

impl<E> fmt::Debug for BlockingEventStream<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingEventStream")
            .field("context", &self.core.context())
            .field("state", &self.core.state())
            .finish_non_exhaustive()
    }
}

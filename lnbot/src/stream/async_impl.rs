use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use futures_util::future::BoxFuture;
use futures_util::stream::{BoxStream, Stream};
use futures_util::{FutureExt, StreamExt};
use tokio::time::Sleep;

use super::{EventCore, StreamEvent, StreamState};
use crate::error::{Error, Result};
use crate::request::Request;
use crate::transport::HttpTransport;

enum Connection {
    Connecting(BoxFuture<'static, Result<reqwest::Response>>),
    Open(BoxStream<'static, reqwest::Result<Bytes>>),
    Eof,
    Closed,
}

/// Async event stream.
///
/// Nothing is sent until the first poll. Dropping the stream, or calling
/// [`close`](Self::close), releases the connection immediately; this is also
/// what happens when the task consuming it is cancelled.
pub struct EventStream<E> {
    connection: Connection,
    core: EventCore<E>,
    timeout: Option<Duration>,
    deadline: Option<Pin<Box<Sleep>>>,
}

impl<E: StreamEvent> EventStream<E> {
    pub(crate) fn new(transport: HttpTransport, request: Request, timeout: Option<Duration>) -> Self {
        let core = EventCore::new(request.context());
        let connect = async move { transport.open_stream(&request).await }.boxed();
        Self {
            connection: Connection::Connecting(connect),
            core,
            timeout,
            deadline: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> StreamState {
        self.core.state()
    }

    /// Stops the stream and releases its connection. Idempotent.
    pub fn close(&mut self) {
        self.connection = Connection::Closed;
        self.deadline = None;
        self.core.cancel();
    }

    fn fail(&mut self, err: Error) -> Poll<Option<Result<E>>> {
        self.connection = Connection::Closed;
        self.deadline = None;
        Poll::Ready(Some(Err(self.core.fail(err))))
    }
}

impl<E: StreamEvent> Stream for EventStream<E> {
    type Item = Result<E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if let Some(limit) = this.timeout.take() {
            this.deadline = Some(Box::pin(tokio::time::sleep(limit)));
        }

        loop {
            if let Some(item) = this.core.next_event() {
                if this.core.state().is_terminal() {
                    this.connection = Connection::Closed;
                    this.deadline = None;
                }
                return Poll::Ready(Some(item));
            }
            match this.connection {
                Connection::Closed => return Poll::Ready(None),
                Connection::Eof => {
                    this.connection = Connection::Closed;
                    this.deadline = None;
                    return Poll::Ready(this.core.end_of_input());
                }
                Connection::Connecting(_) | Connection::Open(_) => {}
            }
            let expired = this
                .deadline
                .as_mut()
                .is_some_and(|deadline| deadline.as_mut().poll(cx).is_ready());
            if expired {
                let context = this.core.context();
                return this.fail(Error::Timeout { context });
            }

            match &mut this.connection {
                Connection::Connecting(connect) => match connect.as_mut().poll(cx) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(Ok(response)) => {
                        this.connection = Connection::Open(response.bytes_stream().boxed());
                        this.core.opened();
                    }
                    Poll::Ready(Err(err)) => return this.fail(err),
                },
                Connection::Open(body) => match body.poll_next_unpin(cx) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(Some(Ok(chunk))) => this.core.feed(&chunk),
                    Poll::Ready(Some(Err(err))) => {
                        let context = this.core.context();
                        return this.fail(Error::http(context, err));
                    }
                    Poll::Ready(None) => {
                        this.core.finish_input();
                        this.connection = Connection::Eof;
                    }
                },
                Connection::Eof | Connection::Closed => return Poll::Ready(None),
            }
        }
    }
}

impl<E> Drop for EventStream<E> {
    fn drop(&mut self) {
        self.core.cancel();
    }
}

impl<E> fmt::Debug for EventStream<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("context", &self.core.context())
            .field("state", &self.core.state())
            .finish_non_exhaustive()
    }
}

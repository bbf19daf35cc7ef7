use lnbot_proto::WalletEvent;

use super::namespace;
use crate::request::{Request, endpoint};
use crate::stream::EventStream;
use crate::transport::HttpTransport;
#[cfg(feature = "blocking")]
use crate::{stream::BlockingEventStream, transport::BlockingTransport};

namespace! {
    /// Wallet-wide event feed.
    Events
}

const fn stream_request() -> Request {
    endpoint!(GET "/v1/events").event_stream()
}

impl Events<'_, HttpTransport> {
    /// Streams every event of the authenticated wallet until the server
    /// closes the connection or the stream is dropped.
    #[must_use]
    pub fn stream(&self) -> EventStream<WalletEvent> {
        EventStream::new(self.transport.clone(), stream_request(), None)
    }
}

#[cfg(feature = "blocking")]
impl Events<'_, BlockingTransport> {
    /// Streams every event of the authenticated wallet until the server
    /// closes the connection or the stream is dropped.
    #[must_use]
    pub fn stream(&self) -> BlockingEventStream<WalletEvent> {
        BlockingEventStream::new(self.transport.clone(), stream_request(), None)
    }
}

use lnbot_proto::{ApiKey, RotatedKey};

use super::namespace;
use crate::error::Result;
use crate::request::{Request, endpoint};
use crate::transport::HttpTransport;
#[cfg(feature = "blocking")]
use crate::transport::BlockingTransport;

namespace! {
    /// API key listing and rotation. Slot 0 is the primary key, 1 the secondary.
    Keys
}

const fn list_request() -> Request {
    endpoint!(GET "/v1/keys")
}

fn rotate_request(slot: u8) -> Request {
    endpoint!(POST "/v1/keys/{slot}/rotate").param(slot)
}

impl Keys<'_, HttpTransport> {
    /// Lists key metadata. Secrets are never returned.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](crate::Error) if the call fails.
    pub async fn list(&self) -> Result<Vec<ApiKey>> {
        self.transport.call(&list_request()).await
    }

    /// Replaces the key in `slot`. The old key stops working immediately.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](crate::Error) if the call fails.
    pub async fn rotate(&self, slot: u8) -> Result<RotatedKey> {
        self.transport.call(&rotate_request(slot)).await
    }
}

#[cfg(feature = "blocking")]
impl Keys<'_, BlockingTransport> {
    /// Lists key metadata. Secrets are never returned.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](crate::Error) if the call fails.
    pub fn list(&self) -> Result<Vec<ApiKey>> {
        self.transport.call(&list_request())
    }

    /// Replaces the key in `slot`. The old key stops working immediately.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](crate::Error) if the call fails.
    pub fn rotate(&self, slot: u8) -> Result<RotatedKey> {
        self.transport.call(&rotate_request(slot))
    }
}

use lnbot_proto::{ListParams, Page, Transaction};

use super::{namespace, paginate};
use crate::error::Result;
use crate::request::{Request, endpoint};
use crate::transport::HttpTransport;
#[cfg(feature = "blocking")]
use crate::transport::BlockingTransport;

namespace! {
    /// Ledger history.
    Transactions
}

fn list_request(params: ListParams) -> Request {
    paginate(endpoint!(GET "/v1/transactions"), params)
}

impl Transactions<'_, HttpTransport> {
    /// Lists credits and debits, newest first.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](crate::Error) if the call fails.
    pub async fn list(&self, params: ListParams) -> Result<Page<Transaction>> {
        self.transport.call(&list_request(params)).await
    }
}

#[cfg(feature = "blocking")]
impl Transactions<'_, BlockingTransport> {
    /// Lists credits and debits, newest first.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](crate::Error) if the call fails.
    pub fn list(&self, params: ListParams) -> Result<Page<Transaction>> {
        self.transport.call(&list_request(params))
    }
}

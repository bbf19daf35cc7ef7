use lnbot_proto::{CreatePaymentRequest, ListParams, Page, Payment, PaymentEvent, ResourceId};

use super::{namespace, paginate};
use crate::error::{Error, Result};
use crate::request::{Request, endpoint};
use crate::stream::{EventStream, WatchOptions};
use crate::transport::HttpTransport;
#[cfg(feature = "blocking")]
use crate::{stream::BlockingEventStream, transport::BlockingTransport};

namespace! {
    /// Outbound payments to Lightning addresses, LNURLs and BOLT11 invoices.
    ///
    /// Payment creation is not idempotent; set an idempotency key on the
    /// request before retrying one.
    Payments
}

fn create_request(request: &CreatePaymentRequest) -> Result<Request> {
    if request.target.trim().is_empty() {
        return Err(Error::InvalidInput("payment target must not be empty"));
    }
    if request.amount == Some(0) {
        return Err(Error::InvalidInput("payment amount must be greater than zero"));
    }
    endpoint!(POST "/v1/payments").json(request)
}

fn list_request(params: ListParams) -> Request {
    paginate(endpoint!(GET "/v1/payments"), params)
}

fn get_request(id: &ResourceId) -> Request {
    endpoint!(GET "/v1/payments/{id}").param(id)
}

fn watch_request(id: &ResourceId, options: &WatchOptions) -> Request {
    options.apply(
        endpoint!(GET "/v1/payments/{id}/events")
            .param(id)
            .event_stream(),
    )
}

impl Payments<'_, HttpTransport> {
    /// Sends a payment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty target or zero amount, or
    /// an [`Error`] if the call fails.
    pub async fn create(&self, request: &CreatePaymentRequest) -> Result<Payment> {
        self.transport.call(&create_request(request)?).await
    }

    /// Lists payments, newest first.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn list(&self, params: ListParams) -> Result<Page<Payment>> {
        self.transport.call(&list_request(params)).await
    }

    /// Fetches one payment by number or payment hash.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn get(&self, id: impl Into<ResourceId>) -> Result<Payment> {
        self.transport.call(&get_request(&id.into())).await
    }

    /// Streams outcome events for one payment, ending after `settled` or `failed`.
    #[must_use]
    pub fn watch(
        &self,
        id: impl Into<ResourceId>,
        options: WatchOptions,
    ) -> EventStream<PaymentEvent> {
        let request = watch_request(&id.into(), &options);
        EventStream::new(self.transport.clone(), request, options.timeout)
    }
}

#[cfg(feature = "blocking")]
impl Payments<'_, BlockingTransport> {
    /// Sends a payment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty target or zero amount, or
    /// an [`Error`] if the call fails.
    pub fn create(&self, request: &CreatePaymentRequest) -> Result<Payment> {
        self.transport.call(&create_request(request)?)
    }

    /// Lists payments, newest first.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn list(&self, params: ListParams) -> Result<Page<Payment>> {
        self.transport.call(&list_request(params))
    }

    /// Fetches one payment by number or payment hash.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn get(&self, id: impl Into<ResourceId>) -> Result<Payment> {
        self.transport.call(&get_request(&id.into()))
    }

    /// Streams outcome events for one payment, ending after `settled` or `failed`.
    #[must_use]
    pub fn watch(
        &self,
        id: impl Into<ResourceId>,
        options: WatchOptions,
    ) -> BlockingEventStream<PaymentEvent> {
        let request = watch_request(&id.into(), &options);
        BlockingEventStream::new(self.transport.clone(), request, options.timeout)
    }
}

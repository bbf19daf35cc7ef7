use lnbot_proto::{
    AddressInvoice, CreateAddressInvoiceRequest, CreateInvoiceRequest,
    CreateWalletInvoiceRequest, Invoice, InvoiceEvent, ListParams, Page, ResourceId,
};

use super::{namespace, paginate};
use crate::error::{Error, Result};
use crate::request::{Request, endpoint};
use crate::stream::{EventStream, WatchOptions};
use crate::transport::HttpTransport;
#[cfg(feature = "blocking")]
use crate::{stream::BlockingEventStream, transport::BlockingTransport};

namespace! {
    /// BOLT11 invoices and settlement watching.
    Invoices
}

fn create_request(request: &CreateInvoiceRequest) -> Result<Request> {
    if request.amount == 0 {
        return Err(Error::InvalidInput("invoice amount must be greater than zero"));
    }
    endpoint!(POST "/v1/invoices").json(request)
}

fn list_request(params: ListParams) -> Request {
    paginate(endpoint!(GET "/v1/invoices"), params)
}

fn get_request(id: &ResourceId) -> Request {
    endpoint!(GET "/v1/invoices/{id}").param(id)
}

fn for_wallet_request(request: &CreateWalletInvoiceRequest) -> Result<Request> {
    if request.wallet_id.trim().is_empty() {
        return Err(Error::InvalidInput("wallet id must not be empty"));
    }
    if request.amount == 0 {
        return Err(Error::InvalidInput("invoice amount must be greater than zero"));
    }
    endpoint!(POST "/v1/invoices/for-wallet").json(request)
}

fn for_address_request(request: &CreateAddressInvoiceRequest) -> Result<Request> {
    if request.address.trim().is_empty() {
        return Err(Error::InvalidInput("lightning address must not be empty"));
    }
    if request.amount == 0 {
        return Err(Error::InvalidInput("invoice amount must be greater than zero"));
    }
    endpoint!(POST "/v1/invoices/for-address").json(request)
}

fn watch_request(id: &ResourceId, options: &WatchOptions) -> Request {
    options.apply(
        endpoint!(GET "/v1/invoices/{id}/events")
            .param(id)
            .event_stream(),
    )
}

impl Invoices<'_, HttpTransport> {
    /// Creates an invoice for the authenticated wallet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a zero amount, or an [`Error`] if
    /// the call fails.
    pub async fn create(&self, request: &CreateInvoiceRequest) -> Result<Invoice> {
        self.transport.call(&create_request(request)?).await
    }

    /// Lists invoices, newest first.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn list(&self, params: ListParams) -> Result<Page<Invoice>> {
        self.transport.call(&list_request(params)).await
    }

    /// Fetches one invoice by number or payment hash.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown invoice, or an [`Error`] if
    /// the call fails.
    pub async fn get(&self, id: impl Into<ResourceId>) -> Result<Invoice> {
        self.transport.call(&get_request(&id.into())).await
    }

    /// Creates an invoice paying into another wallet. Works without an API key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty wallet id or zero amount,
    /// or an [`Error`] if the call fails.
    pub async fn create_for_wallet(
        &self,
        request: &CreateWalletInvoiceRequest,
    ) -> Result<AddressInvoice> {
        self.transport.call(&for_wallet_request(request)?).await
    }

    /// Creates an invoice paying a Lightning address. Works without an API key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty address or zero amount,
    /// or an [`Error`] if the call fails.
    pub async fn create_for_address(
        &self,
        request: &CreateAddressInvoiceRequest,
    ) -> Result<AddressInvoice> {
        self.transport.call(&for_address_request(request)?).await
    }

    /// Streams settlement events for one invoice.
    ///
    /// The stream connects on first poll and ends after `settled` or
    /// `expired`. See [`EventStream`] for cancellation behaviour.
    #[must_use]
    pub fn watch(
        &self,
        id: impl Into<ResourceId>,
        options: WatchOptions,
    ) -> EventStream<InvoiceEvent> {
        let request = watch_request(&id.into(), &options);
        EventStream::new(self.transport.clone(), request, options.timeout)
    }
}

#[cfg(feature = "blocking")]
impl Invoices<'_, BlockingTransport> {
    /// Creates an invoice for the authenticated wallet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a zero amount, or an [`Error`] if
    /// the call fails.
    pub fn create(&self, request: &CreateInvoiceRequest) -> Result<Invoice> {
        self.transport.call(&create_request(request)?)
    }

    /// Lists invoices, newest first.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn list(&self, params: ListParams) -> Result<Page<Invoice>> {
        self.transport.call(&list_request(params))
    }

    /// Fetches one invoice by number or payment hash.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown invoice, or an [`Error`] if
    /// the call fails.
    pub fn get(&self, id: impl Into<ResourceId>) -> Result<Invoice> {
        self.transport.call(&get_request(&id.into()))
    }

    /// Creates an invoice paying into another wallet. Works without an API key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty wallet id or zero amount,
    /// or an [`Error`] if the call fails.
    pub fn create_for_wallet(&self, request: &CreateWalletInvoiceRequest) -> Result<AddressInvoice> {
        self.transport.call(&for_wallet_request(request)?)
    }

    /// Creates an invoice paying a Lightning address. Works without an API key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty address or zero amount,
    /// or an [`Error`] if the call fails.
    pub fn create_for_address(
        &self,
        request: &CreateAddressInvoiceRequest,
    ) -> Result<AddressInvoice> {
        self.transport.call(&for_address_request(request)?)
    }

    /// Streams settlement events for one invoice.
    ///
    /// The stream connects on the first `next()` and ends after `settled` or
    /// `expired`.
    #[must_use]
    pub fn watch(
        &self,
        id: impl Into<ResourceId>,
        options: WatchOptions,
    ) -> BlockingEventStream<InvoiceEvent> {
        let request = watch_request(&id.into(), &options);
        BlockingEventStream::new(self.transport.clone(), request, options.timeout)
    }
}

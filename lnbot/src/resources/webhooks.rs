use lnbot_proto::{CreateWebhookRequest, CreatedWebhook, Webhook};

use super::namespace;
use crate::error::{Error, Result};
use crate::request::{Request, endpoint};
use crate::transport::HttpTransport;
#[cfg(feature = "blocking")]
use crate::transport::BlockingTransport;

namespace! {
    /// Webhook registration.
    Webhooks
}

fn create_request(request: &CreateWebhookRequest) -> Result<Request> {
    if request.url.trim().is_empty() {
        return Err(Error::InvalidInput("webhook url must not be empty"));
    }
    endpoint!(POST "/v1/webhooks").json(request)
}

const fn list_request() -> Request {
    endpoint!(GET "/v1/webhooks")
}

fn delete_request(id: &str) -> Result<Request> {
    if id.trim().is_empty() {
        return Err(Error::InvalidInput("webhook id must not be empty"));
    }
    Ok(endpoint!(DELETE "/v1/webhooks/{id}").param(id))
}

impl Webhooks<'_, HttpTransport> {
    /// Registers an endpoint. The signing secret is returned only here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] when the wallet's webhook limit is
    /// reached, or an [`Error`] if the call fails.
    pub async fn create(&self, request: &CreateWebhookRequest) -> Result<CreatedWebhook> {
        self.transport.call(&create_request(request)?).await
    }

    /// Lists registered webhooks.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn list(&self) -> Result<Vec<Webhook>> {
        self.transport.call(&list_request()).await
    }

    /// Removes a webhook.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.transport.execute(&delete_request(id)?).await?;
        Ok(())
    }
}

#[cfg(feature = "blocking")]
impl Webhooks<'_, BlockingTransport> {
    /// Registers an endpoint. The signing secret is returned only here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] when the wallet's webhook limit is
    /// reached, or an [`Error`] if the call fails.
    pub fn create(&self, request: &CreateWebhookRequest) -> Result<CreatedWebhook> {
        self.transport.call(&create_request(request)?)
    }

    /// Lists registered webhooks.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn list(&self) -> Result<Vec<Webhook>> {
        self.transport.call(&list_request())
    }

    /// Removes a webhook.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.transport.execute(&delete_request(id)?)?;
        Ok(())
    }
}

use lnbot_proto::{CreateWalletRequest, UpdateWalletRequest, Wallet, WalletCredentials};

use super::namespace;
use crate::error::{Error, Result};
use crate::request::{Request, endpoint};
use crate::transport::HttpTransport;
#[cfg(feature = "blocking")]
use crate::transport::BlockingTransport;

namespace! {
    /// Wallet creation and the authenticated wallet.
    Wallets
}

fn create_request(request: &CreateWalletRequest) -> Result<Request> {
    let base = endpoint!(POST "/v1/wallets");
    if request.is_empty() {
        Ok(base)
    } else {
        base.json(request)
    }
}

const fn current_request() -> Request {
    endpoint!(GET "/v1/wallets/current")
}

fn update_request(request: &UpdateWalletRequest) -> Result<Request> {
    if request.name.trim().is_empty() {
        return Err(Error::InvalidInput("wallet name must not be empty"));
    }
    endpoint!(PATCH "/v1/wallets/current").json(request)
}

impl Wallets<'_, HttpTransport> {
    /// Creates a wallet. Works without an API key.
    ///
    /// The returned credentials are shown only once.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn create(&self, request: &CreateWalletRequest) -> Result<WalletCredentials> {
        self.transport.call(&create_request(request)?).await
    }

    /// Returns the authenticated wallet with its balance.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn current(&self) -> Result<Wallet> {
        self.transport.call(&current_request()).await
    }

    /// Renames the authenticated wallet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty name, or an [`Error`] if
    /// the call fails.
    pub async fn update(&self, request: &UpdateWalletRequest) -> Result<Wallet> {
        self.transport.call(&update_request(request)?).await
    }
}

#[cfg(feature = "blocking")]
impl Wallets<'_, BlockingTransport> {
    /// Creates a wallet. Works without an API key.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn create(&self, request: &CreateWalletRequest) -> Result<WalletCredentials> {
        self.transport.call(&create_request(request)?)
    }

    /// Returns the authenticated wallet with its balance.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn current(&self) -> Result<Wallet> {
        self.transport.call(&current_request())
    }

    /// Renames the authenticated wallet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty name, or an [`Error`] if
    /// the call fails.
    pub fn update(&self, request: &UpdateWalletRequest) -> Result<Wallet> {
        self.transport.call(&update_request(request)?)
    }
}

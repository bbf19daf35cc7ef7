use lnbot_proto::{Address, AddressTransfer, CreateAddressRequest, TransferAddressRequest};

use super::namespace;
use crate::error::{Error, Result};
use crate::request::{Request, endpoint};
use crate::transport::HttpTransport;
#[cfg(feature = "blocking")]
use crate::transport::BlockingTransport;

namespace! {
    /// Lightning addresses owned by the authenticated wallet.
    Addresses
}

fn create_request(request: &CreateAddressRequest) -> Result<Request> {
    let base = endpoint!(POST "/v1/addresses");
    if request.is_empty() {
        Ok(base)
    } else {
        base.json(request)
    }
}

const fn list_request() -> Request {
    endpoint!(GET "/v1/addresses")
}

fn delete_request(address: &str) -> Result<Request> {
    Ok(endpoint!(DELETE "/v1/addresses/{address}").param(non_empty(address)?))
}

fn transfer_request(address: &str, request: &TransferAddressRequest) -> Result<Request> {
    if request.target_wallet_key.trim().is_empty() {
        return Err(Error::InvalidInput("target wallet key must not be empty"));
    }
    endpoint!(POST "/v1/addresses/{address}/transfer")
        .param(non_empty(address)?)
        .json(request)
}

fn non_empty(address: &str) -> Result<&str> {
    if address.trim().is_empty() {
        Err(Error::InvalidInput("address must not be empty"))
    } else {
        Ok(address)
    }
}

impl Addresses<'_, HttpTransport> {
    /// Claims an address, random unless the request names one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if the name is taken, or an [`Error`] if
    /// the call fails.
    pub async fn create(&self, request: &CreateAddressRequest) -> Result<Address> {
        self.transport.call(&create_request(request)?).await
    }

    /// Lists the wallet's addresses.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn list(&self) -> Result<Vec<Address>> {
        self.transport.call(&list_request()).await
    }

    /// Releases an address.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn delete(&self, address: &str) -> Result<()> {
        self.transport.execute(&delete_request(address)?).await?;
        Ok(())
    }

    /// Moves an address to the wallet owning `request.target_wallet_key`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn transfer(
        &self,
        address: &str,
        request: &TransferAddressRequest,
    ) -> Result<AddressTransfer> {
        self.transport
            .call(&transfer_request(address, request)?)
            .await
    }
}

#[cfg(feature = "blocking")]
impl Addresses<'_, BlockingTransport> {
    /// Claims an address, random unless the request names one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if the name is taken, or an [`Error`] if
    /// the call fails.
    pub fn create(&self, request: &CreateAddressRequest) -> Result<Address> {
        self.transport.call(&create_request(request)?)
    }

    /// Lists the wallet's addresses.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn list(&self) -> Result<Vec<Address>> {
        self.transport.call(&list_request())
    }

    /// Releases an address.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn delete(&self, address: &str) -> Result<()> {
        self.transport.execute(&delete_request(address)?)?;
        Ok(())
    }

    /// Moves an address to the wallet owning `request.target_wallet_key`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn transfer(
        &self,
        address: &str,
        request: &TransferAddressRequest,
    ) -> Result<AddressTransfer> {
        self.transport.call(&transfer_request(address, request)?)
    }
}

use lnbot_proto::{
    PasskeySession, RestorePasskeyCompleteRequest, RestoreRecoveryRequest, RestoredWallet,
};

use super::namespace;
use crate::error::{Error, Result};
use crate::request::{Request, endpoint};
use crate::transport::HttpTransport;
#[cfg(feature = "blocking")]
use crate::transport::BlockingTransport;

namespace! {
    /// Recovery of wallet access. None of these calls need an API key.
    Restore
}

fn recovery_request(request: &RestoreRecoveryRequest) -> Result<Request> {
    if request.passphrase.trim().is_empty() {
        return Err(Error::InvalidInput("recovery passphrase must not be empty"));
    }
    endpoint!(POST "/v1/restore/recovery").json(request)
}

const fn passkey_begin_request() -> Request {
    endpoint!(POST "/v1/restore/passkey/begin")
}

fn passkey_complete_request(request: &RestorePasskeyCompleteRequest) -> Result<Request> {
    if request.session_id.is_empty() {
        return Err(Error::InvalidInput("passkey session id must not be empty"));
    }
    endpoint!(POST "/v1/restore/passkey/complete").json(request)
}

impl Restore<'_, HttpTransport> {
    /// Restores access with a recovery passphrase; issues fresh keys.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn recovery(&self, request: &RestoreRecoveryRequest) -> Result<RestoredWallet> {
        self.transport.call(&recovery_request(request)?).await
    }

    /// Starts a passkey assertion.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn passkey_begin(&self) -> Result<PasskeySession> {
        self.transport.call(&passkey_begin_request()).await
    }

    /// Completes a passkey assertion; issues fresh keys.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn passkey_complete(
        &self,
        request: &RestorePasskeyCompleteRequest,
    ) -> Result<RestoredWallet> {
        self.transport
            .call(&passkey_complete_request(request)?)
            .await
    }
}

#[cfg(feature = "blocking")]
impl Restore<'_, BlockingTransport> {
    /// Restores access with a recovery passphrase; issues fresh keys.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn recovery(&self, request: &RestoreRecoveryRequest) -> Result<RestoredWallet> {
        self.transport.call(&recovery_request(request)?)
    }

    /// Starts a passkey assertion.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn passkey_begin(&self) -> Result<PasskeySession> {
        self.transport.call(&passkey_begin_request())
    }

    /// Completes a passkey assertion; issues fresh keys.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn passkey_complete(
        &self,
        request: &RestorePasskeyCompleteRequest,
    ) -> Result<RestoredWallet> {
        self.transport.call(&passkey_complete_request(request)?)
    }
}

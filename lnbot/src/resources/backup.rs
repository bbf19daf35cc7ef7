use lnbot_proto::{BackupPasskeyCompleteRequest, PasskeySession, RecoveryPassphrase};

use super::namespace;
use crate::error::{Error, Result};
use crate::request::{Request, endpoint};
use crate::transport::HttpTransport;
#[cfg(feature = "blocking")]
use crate::transport::BlockingTransport;

namespace! {
    /// Backup of wallet access through a recovery passphrase or a passkey.
    Backup
}

const fn recovery_request() -> Request {
    endpoint!(POST "/v1/backup/recovery")
}

const fn passkey_begin_request() -> Request {
    endpoint!(POST "/v1/backup/passkey/begin")
}

fn passkey_complete_request(request: &BackupPasskeyCompleteRequest) -> Result<Request> {
    if request.session_id.is_empty() {
        return Err(Error::InvalidInput("passkey session id must not be empty"));
    }
    endpoint!(POST "/v1/backup/passkey/complete").json(request)
}

impl Backup<'_, HttpTransport> {
    /// Generates a 12-word recovery passphrase. Shown only once.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn recovery(&self) -> Result<RecoveryPassphrase> {
        self.transport.call(&recovery_request()).await
    }

    /// Starts passkey registration. Hand `options` to the WebAuthn client.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn passkey_begin(&self) -> Result<PasskeySession> {
        self.transport.call(&passkey_begin_request()).await
    }

    /// Completes passkey registration with the authenticator's attestation.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn passkey_complete(&self, request: &BackupPasskeyCompleteRequest) -> Result<()> {
        self.transport
            .execute(&passkey_complete_request(request)?)
            .await?;
        Ok(())
    }
}

#[cfg(feature = "blocking")]
impl Backup<'_, BlockingTransport> {
    /// Generates a 12-word recovery passphrase. Shown only once.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn recovery(&self) -> Result<RecoveryPassphrase> {
        self.transport.call(&recovery_request())
    }

    /// Starts passkey registration. Hand `options` to the WebAuthn client.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn passkey_begin(&self) -> Result<PasskeySession> {
        self.transport.call(&passkey_begin_request())
    }

    /// Completes passkey registration with the authenticator's attestation.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn passkey_complete(&self, request: &BackupPasskeyCompleteRequest) -> Result<()> {
        self.transport.execute(&passkey_complete_request(request)?)?;
        Ok(())
    }
}

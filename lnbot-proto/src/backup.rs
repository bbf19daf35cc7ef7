//! Backup and restore types.
//!
//! Passkey ceremonies carry WebAuthn option and credential objects that the
//! client passes through untouched, so they are kept as raw JSON values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A freshly generated recovery passphrase. Shown only once.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryPassphrase {
    /// The passphrase words, space separated.
    pub passphrase: String,
}

impl std::fmt::Debug for RecoveryPassphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveryPassphrase")
            .field("passphrase", &"<redacted>")
            .finish()
    }
}

/// Server half of a WebAuthn ceremony.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasskeySession {
    /// Session to reference when completing the ceremony.
    pub session_id: String,
    /// `PublicKeyCredentialCreationOptions` or `PublicKeyCredentialRequestOptions`.
    pub options: Value,
}

/// Body of `POST /v1/backup/passkey/complete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupPasskeyCompleteRequest {
    /// Session returned by the begin step.
    pub session_id: String,
    /// Attestation produced by the authenticator.
    pub attestation: Value,
}

impl BackupPasskeyCompleteRequest {
    /// Creates a completion request.
    #[must_use]
    pub fn new(session_id: impl Into<String>, attestation: Value) -> Self {
        Self {
            session_id: session_id.into(),
            attestation,
        }
    }
}

/// Body of `POST /v1/restore/recovery`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreRecoveryRequest {
    /// The recovery passphrase.
    pub passphrase: String,
}

impl RestoreRecoveryRequest {
    /// Creates a restore request.
    #[must_use]
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }
}

impl std::fmt::Debug for RestoreRecoveryRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestoreRecoveryRequest")
            .field("passphrase", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /v1/restore/passkey/complete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestorePasskeyCompleteRequest {
    /// Session returned by the begin step.
    pub session_id: String,
    /// Assertion produced by the authenticator.
    pub assertion: Value,
}

impl RestorePasskeyCompleteRequest {
    /// Creates a completion request.
    #[must_use]
    pub fn new(session_id: impl Into<String>, assertion: Value) -> Self {
        Self {
            session_id: session_id.into(),
            assertion,
        }
    }
}

/// Credentials of a wallet recovered through a backup method.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoredWallet {
    /// Wallet identifier.
    pub wallet_id: String,
    /// Wallet name.
    pub name: String,
    /// Newly issued primary key.
    pub primary_key: String,
    /// Newly issued secondary key.
    pub secondary_key: String,
}

impl std::fmt::Debug for RestoredWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestoredWallet")
            .field("wallet_id", &self.wallet_id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

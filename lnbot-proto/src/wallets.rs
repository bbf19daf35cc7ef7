//! Wallet and API key types.

use serde::{Deserialize, Serialize};

use crate::Sats;

/// Body of `POST /v1/wallets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    /// Optional display name; the server picks one when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CreateWalletRequest {
    /// Creates a request for an unnamed wallet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wallet name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns `true` when the request carries no fields and can be sent without a body.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().is_none_or(str::is_empty)
    }
}

/// Body of `PATCH /v1/wallets/current`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWalletRequest {
    /// New wallet name.
    pub name: String,
}

impl UpdateWalletRequest {
    /// Creates a rename request.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Credentials returned once, when a wallet is created.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletCredentials {
    /// Wallet identifier.
    pub wallet_id: String,
    /// Primary API key (slot 0).
    pub primary_key: String,
    /// Secondary API key (slot 1).
    pub secondary_key: String,
    /// Wallet name.
    pub name: String,
    /// Lightning address assigned to the wallet.
    pub address: String,
    /// 12-word recovery passphrase.
    pub recovery_passphrase: String,
}

impl std::fmt::Debug for WalletCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletCredentials")
            .field("wallet_id", &self.wallet_id)
            .field("name", &self.name)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// The authenticated wallet and its balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Wallet identifier.
    pub wallet_id: String,
    /// Wallet name.
    pub name: String,
    /// Total balance.
    pub balance: Sats,
    /// Amount reserved by in-flight payments.
    pub on_hold: Sats,
    /// Spendable amount (`balance - on_hold`).
    pub available: Sats,
}

/// Metadata about one API key slot. The key itself is never returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    /// Key identifier.
    pub id: String,
    /// Slot name (`primary` or `secondary`).
    pub name: String,
    /// Last characters of the key, for display.
    pub hint: String,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last time the key authenticated a request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<String>,
}

/// A freshly rotated API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotatedKey {
    /// The new key. Shown only once.
    pub key: String,
    /// Slot name.
    pub name: String,
}

/// Alias matching the key-management vocabulary of the service.
pub type KeyMetadata = ApiKey;

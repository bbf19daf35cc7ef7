//! Lightning address types.

use serde::{Deserialize, Serialize};

use crate::Sats;

/// A Lightning address owned by the authenticated wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// The address, `user@domain`.
    pub address: String,
    /// Whether the server picked the name.
    pub generated: bool,
    /// Price paid for a vanity address.
    pub cost: Sats,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body of `POST /v1/addresses`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    /// Requested address; a random one is generated when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl CreateAddressRequest {
    /// Requests a randomly generated address.
    #[must_use]
    pub fn random() -> Self {
        Self::default()
    }

    /// Requests a specific address.
    #[must_use]
    pub fn named(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
        }
    }

    /// Returns `true` when the request carries no fields and can be sent without a body.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.address.as_deref().is_none_or(str::is_empty)
    }
}

/// Body of `POST /v1/addresses/{address}/transfer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferAddressRequest {
    /// An API key of the receiving wallet.
    pub target_wallet_key: String,
}

impl TransferAddressRequest {
    /// Creates a transfer to the wallet owning `target_wallet_key`.
    #[must_use]
    pub fn new(target_wallet_key: impl Into<String>) -> Self {
        Self {
            target_wallet_key: target_wallet_key.into(),
        }
    }
}

/// Result of an address transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressTransfer {
    /// The transferred address.
    pub address: String,
    /// Receiving wallet identifier.
    pub transferred_to: String,
}

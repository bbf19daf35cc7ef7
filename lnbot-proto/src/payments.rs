//! Outbound payment types.

use serde::{Deserialize, Serialize};

use crate::Sats;
use crate::page::Cursor;

/// Lifecycle state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Accepted, not yet routed.
    Pending,
    /// Routing in progress.
    Processing,
    /// Delivered.
    Settled,
    /// Routing failed; funds were released.
    Failed,
    /// A status this client version does not know about.
    #[serde(other)]
    Unknown,
}

/// A payment sent from the authenticated wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Per-wallet sequence number; also the listing cursor.
    pub number: u64,
    /// Current status.
    pub status: PaymentStatus,
    /// Amount sent, excluding fees.
    pub amount: Sats,
    /// Routing fee ceiling.
    #[serde(default)]
    pub max_fee: Sats,
    /// Destination as given by the caller (address, LNURL or BOLT11).
    #[serde(default)]
    pub address: String,
    /// Routing fee actually paid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_fee: Option<Sats>,
    /// Service fee charged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_fee: Option<Sats>,
    /// Caller-supplied reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Ledger transaction created for the debit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_number: Option<u64>,
    /// Why routing failed, when it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Settlement timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settled_at: Option<String>,
}

impl Cursor for Payment {
    fn cursor(&self) -> u64 {
        self.number
    }
}

/// Body of `POST /v1/payments`.
///
/// The server is not idempotent for payment creation unless an
/// [`idempotency_key`](Self::idempotency_key) is supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    /// Lightning address, LNURL, or BOLT11 invoice.
    pub target: String,
    /// Amount to send. Required unless the target is an invoice with an amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Sats>,
    /// Key that makes retries of the same payment safe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
    /// Routing fee ceiling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee: Option<Sats>,
    /// Caller-supplied reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl CreatePaymentRequest {
    /// Creates a payment to `target`.
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            amount: None,
            idempotency_key: None,
            max_fee: None,
            reference: None,
        }
    }

    /// Sets the amount.
    #[must_use]
    pub const fn with_amount(mut self, amount: Sats) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the idempotency key.
    #[must_use]
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Sets the routing fee ceiling.
    #[must_use]
    pub const fn with_max_fee(mut self, max_fee: Sats) -> Self {
        self.max_fee = Some(max_fee);
        self
    }

    /// Sets the reference.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

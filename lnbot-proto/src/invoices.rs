//! BOLT11 invoice types.

use serde::{Deserialize, Serialize};

use crate::Sats;
use crate::page::Cursor;

/// Lifecycle state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Waiting for payment.
    Pending,
    /// Paid in full.
    Settled,
    /// Expired without payment.
    Expired,
    /// A status this client version does not know about.
    #[serde(other)]
    Unknown,
}

/// An invoice issued by the authenticated wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Per-wallet sequence number; also the listing cursor.
    pub number: u64,
    /// Current status.
    pub status: InvoiceStatus,
    /// Requested amount.
    pub amount: Sats,
    /// Encoded BOLT11 payment request.
    pub bolt11: String,
    /// Caller-supplied reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Description embedded in the invoice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Ledger transaction created on settlement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_number: Option<u64>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Settlement timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settled_at: Option<String>,
    /// Expiry timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl Cursor for Invoice {
    fn cursor(&self) -> u64 {
        self.number
    }
}

/// Body of `POST /v1/invoices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    /// Amount to request.
    pub amount: Sats,
    /// Caller-supplied reference, echoed back on the invoice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Description embedded in the invoice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl CreateInvoiceRequest {
    /// Creates a request for `amount` sats.
    #[must_use]
    pub const fn new(amount: Sats) -> Self {
        Self {
            amount,
            reference: None,
            memo: None,
        }
    }

    /// Sets the reference.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Sets the memo.
    #[must_use]
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }
}

/// Body of `POST /v1/invoices/for-wallet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletInvoiceRequest {
    /// Wallet that will receive the payment.
    pub wallet_id: String,
    /// Amount to request.
    pub amount: Sats,
    /// Caller-supplied reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Payer comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl CreateWalletInvoiceRequest {
    /// Creates a request paying `amount` sats into `wallet_id`.
    #[must_use]
    pub fn new(wallet_id: impl Into<String>, amount: Sats) -> Self {
        Self {
            wallet_id: wallet_id.into(),
            amount,
            reference: None,
            comment: None,
        }
    }

    /// Sets the reference.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Sets the payer comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Body of `POST /v1/invoices/for-address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressInvoiceRequest {
    /// Lightning address (`user@domain`) that will receive the payment.
    pub address: String,
    /// Amount to request.
    pub amount: Sats,
    /// Optional tag forwarded to the address owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Payer comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl CreateAddressInvoiceRequest {
    /// Creates a request paying `amount` sats to `address`.
    #[must_use]
    pub fn new(address: impl Into<String>, amount: Sats) -> Self {
        Self {
            address: address.into(),
            amount,
            tag: None,
            comment: None,
        }
    }

    /// Sets the tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Sets the payer comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Invoice issued on behalf of another wallet or a Lightning address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInvoice {
    /// Encoded BOLT11 payment request.
    pub bolt11: String,
    /// Requested amount.
    pub amount: Sats,
    /// Expiry timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

//! Ledger transaction types.

use serde::{Deserialize, Serialize};

use crate::Sats;
use crate::page::Cursor;

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Funds received.
    Credit,
    /// Funds sent.
    Debit,
    /// A type this client version does not know about.
    #[serde(other)]
    Unknown,
}

/// One ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Per-wallet sequence number; also the listing cursor.
    pub number: u64,
    /// Credit or debit.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Amount moved.
    pub amount: Sats,
    /// Wallet balance after this entry.
    pub balance_after: Sats,
    /// Lightning routing fee.
    #[serde(default)]
    pub network_fee: Sats,
    /// Service fee.
    #[serde(default)]
    pub service_fee: Sats,
    /// Payment hash of the underlying Lightning payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_hash: Option<String>,
    /// Payment preimage, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preimage: Option<String>,
    /// Caller-supplied reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Cursor for Transaction {
    fn cursor(&self) -> u64 {
        self.number
    }
}

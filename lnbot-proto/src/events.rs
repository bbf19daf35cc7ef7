//! Payloads carried by the server-sent event streams.
//!
//! Invoice and payment streams name each frame with an `event:` field whose
//! value selects the kind and whose `data:` field is the resource snapshot.
//! The wallet stream instead sends unnamed frames whose data is an envelope
//! `{ "event", "createdAt", "data" }`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::invoices::Invoice;
use crate::payments::Payment;

/// An event name the stream does not deliver to callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event name `{0}`")]
pub struct UnknownEventError(pub String);

/// Kind of an invoice event. Both kinds are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceEventKind {
    /// The invoice was paid.
    Settled,
    /// The invoice expired unpaid.
    Expired,
}

impl InvoiceEventKind {
    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Settled => "settled",
            Self::Expired => "expired",
        }
    }
}

impl FromStr for InvoiceEventKind {
    type Err = UnknownEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "settled" => Ok(Self::Settled),
            "expired" => Ok(Self::Expired),
            other => Err(UnknownEventError(other.to_owned())),
        }
    }
}

impl fmt::Display for InvoiceEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a payment event. Both kinds are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentEventKind {
    /// The payment was delivered.
    Settled,
    /// The payment failed.
    Failed,
}

impl PaymentEventKind {
    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Settled => "settled",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for PaymentEventKind {
    type Err = UnknownEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "settled" => Ok(Self::Settled),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownEventError(other.to_owned())),
        }
    }
}

impl fmt::Display for PaymentEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement event for a single invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceEvent {
    /// What happened.
    pub event: InvoiceEventKind,
    /// Invoice snapshot at the time of the event.
    pub data: Invoice,
}

/// Settlement event for an invoice; the name used throughout the API docs.
pub type SettlementEvent = InvoiceEvent;

/// Outcome event for a single payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEvent {
    /// What happened.
    pub event: PaymentEventKind,
    /// Payment snapshot at the time of the event.
    pub data: Payment,
}

/// An event from the wallet-wide stream.
///
/// The set of event names is open ended (`invoice.settled`,
/// `payment.failed`, ...), so the name and payload are left untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletEvent {
    /// Event name.
    #[serde(default)]
    pub event: String,
    /// When the event happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Event payload.
    #[serde(default)]
    pub data: Value,
}

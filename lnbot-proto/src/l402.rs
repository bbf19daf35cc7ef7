//! L402 paywall types.
//!
//! An L402 challenge pairs a macaroon with a Lightning invoice. The payer
//! settles the invoice and presents `L402 <macaroon>:<preimage>` as proof.

use serde::{Deserialize, Serialize};

use crate::Sats;

/// Body of `POST /v1/l402/challenges`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateL402ChallengeRequest {
    /// Price of access.
    pub amount: Sats,
    /// Invoice description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Invoice and macaroon lifetime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_seconds: Option<u64>,
    /// First-party caveats baked into the macaroon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caveats: Option<Vec<String>>,
}

impl CreateL402ChallengeRequest {
    /// Creates a challenge priced at `amount` sats.
    #[must_use]
    pub const fn new(amount: Sats) -> Self {
        Self {
            amount,
            description: None,
            expiry_seconds: None,
            caveats: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the lifetime in seconds.
    #[must_use]
    pub const fn with_expiry_seconds(mut self, seconds: u64) -> Self {
        self.expiry_seconds = Some(seconds);
        self
    }

    /// Adds a caveat.
    #[must_use]
    pub fn with_caveat(mut self, caveat: impl Into<String>) -> Self {
        self.caveats.get_or_insert_with(Vec::new).push(caveat.into());
        self
    }
}

/// A challenge ready to be returned in a `402 Payment Required` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L402Challenge {
    /// Base64 macaroon.
    pub macaroon: String,
    /// BOLT11 invoice to pay.
    pub invoice: String,
    /// Payment hash of the invoice.
    pub payment_hash: String,
    /// Expiry timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    /// Ready-made `WWW-Authenticate` header value.
    pub www_authenticate: String,
}

/// Body of `POST /v1/l402/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyL402Request {
    /// The `Authorization` header presented by the payer.
    pub authorization: String,
}

impl VerifyL402Request {
    /// Creates a verification request.
    #[must_use]
    pub fn new(authorization: impl Into<String>) -> Self {
        Self {
            authorization: authorization.into(),
        }
    }
}

/// Outcome of verifying an L402 token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L402Verification {
    /// Whether the token is valid.
    pub valid: bool,
    /// Payment hash bound to the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_hash: Option<String>,
    /// Caveats carried by the macaroon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caveats: Option<Vec<String>>,
    /// Reason for rejection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `POST /v1/l402/pay`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayL402Request {
    /// The `WWW-Authenticate` header of the 402 response.
    pub www_authenticate: String,
    /// Routing fee ceiling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee: Option<Sats>,
    /// Caller-supplied reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Whether the server should wait for settlement before answering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait: Option<bool>,
    /// How long to wait, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl PayL402Request {
    /// Creates a request paying the challenge in `www_authenticate`.
    #[must_use]
    pub fn new(www_authenticate: impl Into<String>) -> Self {
        Self {
            www_authenticate: www_authenticate.into(),
            max_fee: None,
            reference: None,
            wait: None,
            timeout: None,
        }
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

    /// Waits up to `timeout_secs` for settlement.
    #[must_use]
    pub const fn with_wait(mut self, timeout_secs: u64) -> Self {
        self.wait = Some(true);
        self.timeout = Some(timeout_secs);
        self
    }
}

/// Result of paying an L402 challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L402Payment {
    /// `Authorization` header value to retry the original request with,
    /// present once the payment settled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<String>,
    /// Payment hash.
    pub payment_hash: String,
    /// Preimage, once settled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preimage: Option<String>,
    /// Amount paid.
    pub amount: Sats,
    /// Fee paid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<Sats>,
    /// Number of the underlying payment.
    pub payment_number: u64,
    /// Payment status as reported by the server.
    pub status: String,
}

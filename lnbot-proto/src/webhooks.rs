//! Webhook registration types.

use serde::{Deserialize, Serialize};

/// Body of `POST /v1/webhooks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebhookRequest {
    /// Endpoint that will receive event deliveries.
    pub url: String,
}

impl CreateWebhookRequest {
    /// Creates a registration for `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// A webhook as returned right after registration, including its signing secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedWebhook {
    /// Webhook identifier.
    pub id: String,
    /// Delivery endpoint.
    pub url: String,
    /// Secret used to sign deliveries. Shown only once.
    pub secret: String,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A registered webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    /// Webhook identifier.
    pub id: String,
    /// Delivery endpoint.
    pub url: String,
    /// Whether deliveries are enabled.
    pub active: bool,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

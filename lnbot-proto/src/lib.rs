//! Wire format types for the ln.bot Lightning payment API.
//!
//! This crate defines the serialization-level data structures exchanged with
//! the ln.bot service: request bodies, result objects, listing pages, and the
//! payloads carried by its server-sent event streams. It has minimal
//! dependencies (only `serde`, `serde_json` and `thiserror`) and performs no
//! I/O, so both the blocking and the async client share it unchanged.
//!
//! # Modules
//!
//! - [`wallets`]: wallet creation, current wallet, API keys
//! - [`invoices`]: BOLT11 invoices, including invoices for other wallets
//! - [`payments`]: outbound payments
//! - [`addresses`]: Lightning addresses
//! - [`transactions`]: ledger history
//! - [`webhooks`]: webhook registration
//! - [`backup`]: recovery passphrase and passkey backup/restore
//! - [`l402`]: L402 paywall challenges
//! - [`events`]: settlement, payment and wallet event payloads
//! - [`page`]: listing pages, cursors and resource identifiers
//! - [`sse`]: scheduling-agnostic server-sent event frame decoder

pub mod addresses;
pub mod backup;
pub mod events;
pub mod invoices;
pub mod l402;
pub mod page;
pub mod payments;
pub mod sse;
pub mod transactions;
pub mod wallets;
pub mod webhooks;

pub use addresses::{Address, AddressTransfer, CreateAddressRequest, TransferAddressRequest};
pub use backup::{
    BackupPasskeyCompleteRequest, PasskeySession, RecoveryPassphrase,
    RestorePasskeyCompleteRequest, RestoreRecoveryRequest, RestoredWallet,
};
pub use events::{
    InvoiceEvent, InvoiceEventKind, PaymentEvent, PaymentEventKind, SettlementEvent,
    UnknownEventError, WalletEvent,
};
pub use invoices::{
    AddressInvoice, CreateAddressInvoiceRequest, CreateInvoiceRequest,
    CreateWalletInvoiceRequest, Invoice, InvoiceStatus,
};
pub use l402::{
    CreateL402ChallengeRequest, L402Challenge, L402Payment, L402Verification, PayL402Request,
    VerifyL402Request,
};
pub use page::{Cursor, ListParams, Page, ResourceId};
pub use payments::{CreatePaymentRequest, Payment, PaymentStatus};
pub use sse::{SseDecoder, SseFrame};
pub use transactions::{Transaction, TransactionType};
pub use wallets::{
    ApiKey, CreateWalletRequest, KeyMetadata, RotatedKey, UpdateWalletRequest, Wallet,
    WalletCredentials,
};
pub use webhooks::{CreateWebhookRequest, CreatedWebhook, Webhook};

/// Amount in satoshis.
pub type Sats = u64;

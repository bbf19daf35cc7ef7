//! Client facades.
//!
//! [`LnBot`] is the async entry point, [`BlockingLnBot`] the blocking one.
//! Both own their [`ClientConfig`] and transport and hand out the resource
//! namespaces as cheap borrowed views. Dropping a facade releases its
//! connection pool; streams already handed out keep their own connection
//! until they are dropped.

use reqwest::Client;

#[cfg(feature = "blocking")]
use crate::transport::BlockingTransport;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::resources::{
    Addresses, Backup, Events, Invoices, Keys, L402, Payments, Restore, Transactions, Wallets,
    Webhooks,
};
use crate::transport::HttpTransport;

macro_rules! namespaces {
    ($transport:ty) => {
        /// Wallet creation and the authenticated wallet.
        #[must_use]
        pub const fn wallets(&self) -> Wallets<'_, $transport> {
            Wallets::new(&self.transport)
        }

        /// API key listing and rotation.
        #[must_use]
        pub const fn keys(&self) -> Keys<'_, $transport> {
            Keys::new(&self.transport)
        }

        /// Invoices and settlement streams.
        #[must_use]
        pub const fn invoices(&self) -> Invoices<'_, $transport> {
            Invoices::new(&self.transport)
        }

        /// Outbound payments.
        #[must_use]
        pub const fn payments(&self) -> Payments<'_, $transport> {
            Payments::new(&self.transport)
        }

        /// Lightning addresses.
        #[must_use]
        pub const fn addresses(&self) -> Addresses<'_, $transport> {
            Addresses::new(&self.transport)
        }

        /// Ledger history.
        #[must_use]
        pub const fn transactions(&self) -> Transactions<'_, $transport> {
            Transactions::new(&self.transport)
        }

        /// Webhook registration.
        #[must_use]
        pub const fn webhooks(&self) -> Webhooks<'_, $transport> {
            Webhooks::new(&self.transport)
        }

        /// Wallet-wide event feed.
        #[must_use]
        pub const fn events(&self) -> Events<'_, $transport> {
            Events::new(&self.transport)
        }

        /// Recovery passphrase and passkey backup.
        #[must_use]
        pub const fn backup(&self) -> Backup<'_, $transport> {
            Backup::new(&self.transport)
        }

        /// Wallet restore.
        #[must_use]
        pub const fn restore(&self) -> Restore<'_, $transport> {
            Restore::new(&self.transport)
        }

        /// L402 paywalls.
        #[must_use]
        pub const fn l402(&self) -> L402<'_, $transport> {
            L402::new(&self.transport)
        }

        /// Configuration in effect.
        #[must_use]
        pub fn config(&self) -> &ClientConfig {
            self.transport.config()
        }

        /// The underlying transport, for calls not covered by a namespace.
        #[must_use]
        pub const fn transport(&self) -> &$transport {
            &self.transport
        }
    };
}

/// Async ln.bot client.
///
/// ```no_run
/// # async fn run() -> lnbot::Result<()> {
/// use lnbot::{LnBot, proto::CreateInvoiceRequest};
///
/// let bot = LnBot::with_api_key("key_...")?;
/// let invoice = bot.invoices().create(&CreateInvoiceRequest::new(1_000)).await?;
/// println!("{}", invoice.bolt11);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct LnBot {
    transport: HttpTransport,
}

impl LnBot {
    /// Creates a client from a prepared configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the HTTP client
    /// cannot be initialised.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
        })
    }

    /// Creates a client with default settings and the key from `LNBOT_API_KEY`.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new).
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Creates a client with default settings and an explicit key.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new).
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::builder().api_key(api_key).build()?)
    }

    /// Creates a client sharing an existing connection pool.
    #[must_use]
    pub fn with_http_client(config: ClientConfig, client: Client) -> Self {
        Self {
            transport: HttpTransport::with_client(config, client),
        }
    }

    namespaces!(HttpTransport);
}

/// Blocking ln.bot client.
///
/// Must not be used from within an async runtime; use [`LnBot`] there.
///
/// ```no_run
/// # fn run() -> lnbot::Result<()> {
/// use lnbot::{BlockingLnBot, WatchOptions};
///
/// let bot = BlockingLnBot::from_env()?;
/// for event in bot.invoices().watch(42_u64, WatchOptions::new()) {
///     println!("{:?}", event?.event);
/// }
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "blocking")]
#[derive(Clone, Debug)]
pub struct BlockingLnBot {
    transport: BlockingTransport,
}

#[cfg(feature = "blocking")]
impl BlockingLnBot {
    /// Creates a client from a prepared configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the HTTP client
    /// cannot be initialised.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            transport: BlockingTransport::new(config)?,
        })
    }

    /// Creates a client with default settings and the key from `LNBOT_API_KEY`.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new).
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Creates a client with default settings and an explicit key.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new).
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::builder().api_key(api_key).build()?)
    }

    /// Creates a client sharing an existing connection pool.
    ///
    /// Event streams do not use `client`. Each opens its own connection with
    /// the timeouts in `config`.
    #[must_use]
    pub fn with_http_client(config: ClientConfig, client: reqwest::blocking::Client) -> Self {
        Self {
            transport: BlockingTransport::with_client(config, client),
        }
    }

    namespaces!(BlockingTransport);
}

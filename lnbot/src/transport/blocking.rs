use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::runtime::Runtime;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use super::{HttpTransport, record_result_on_span};
use crate::config::ClientConfig;
use crate::error::{ConfigError, Error, Result};
use crate::request::{Request, decode_body, decode_value};

/// Blocking transport over a [`reqwest::blocking::Client`].
///
/// Every call occupies the calling thread for the full round trip. Must not
/// be used from inside an async runtime; use
/// [`HttpTransport`](super::HttpTransport) there.
#[derive(Clone, Debug)]
pub struct BlockingTransport {
    client: reqwest::blocking::Client,
    config: Arc<ClientConfig>,
}

impl BlockingTransport {
    /// Builds a transport with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be initialised.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .connect_timeout(config.timeout())
            .build()
            .map_err(ConfigError::HttpClient)?;
        Ok(Self::with_client(config, client))
    }

    /// Builds a transport on top of an existing client.
    ///
    /// Event streams do not use `client`; each opens its own connection with
    /// the settings in `config`.
    #[must_use]
    pub fn with_client(config: ClientConfig, client: reqwest::blocking::Client) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    /// Configuration in effect.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Performs `request` and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns the classified [`Error`] for a non-2xx status, or a transport
    /// error if the call never completed.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "lnbot.request",
            skip_all,
            fields(
                method = %request.method(),
                path = request.context(),
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    pub fn execute(&self, request: &Request) -> Result<Value> {
        let result = self.execute_inner(request);
        record_result_on_span(&result);
        result
    }

    /// Performs `request` and decodes the body into `T`.
    ///
    /// # Errors
    ///
    /// As [`execute`](Self::execute), plus [`Error::Decode`] if the body does
    /// not match `T`.
    pub fn call<T: DeserializeOwned>(&self, request: &Request) -> Result<T> {
        let value = self.execute(request)?;
        decode_value(request.context(), value)
    }

    fn execute_inner(&self, request: &Request) -> Result<Value> {
        let context = request.context();
        let response = self.send(request)?;
        let bytes = response.bytes().map_err(|e| Error::http(context, e))?;
        decode_body(context, &bytes)
    }

    /// Opens a streaming response on a dedicated single-threaded runtime.
    ///
    /// As on the async transport, the configured timeout bounds the wait for
    /// response headers and the body may stay open indefinitely. `deadline`,
    /// when set, bounds the whole exchange.
    pub(crate) fn open_stream(
        &self,
        request: &Request,
        deadline: Option<Instant>,
    ) -> Result<StreamBody> {
        let context = request.context();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::io(context, e))?;
        let client = reqwest::Client::builder()
            .connect_timeout(self.config.timeout())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(ConfigError::HttpClient)?;
        let transport = HttpTransport::with_client(ClientConfig::clone(&self.config), client);

        let response = runtime.block_on(until(deadline, context, transport.open_stream(request)))?;
        Ok(StreamBody {
            body: response.bytes_stream().boxed(),
            runtime,
            deadline,
            context,
        })
    }

    fn send(&self, request: &Request) -> Result<reqwest::blocking::Response> {
        let context = request.context();
        let url = request.url(self.config.base_url())?;
        let mut builder = self
            .client
            .request(request.method().clone(), url)
            .headers(request.headers(&self.config)?);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder
            .timeout(self.config.timeout())
            .send()
            .map_err(|e| Error::http(context, e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().map_err(|e| Error::http(context, e))?;
        Err(Error::from_response(status, body))
    }
}

/// Body of a blocking event stream.
///
/// Owns the runtime its connection lives on; dropping it closes the
/// connection.
pub(crate) struct StreamBody {
    body: BoxStream<'static, reqwest::Result<Bytes>>,
    runtime: Runtime,
    deadline: Option<Instant>,
    context: &'static str,
}

impl StreamBody {
    /// Blocks until the next chunk arrives. `None` at the end of the body.
    pub(crate) fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        let context = self.context;
        let next = self.body.next();
        self.runtime.block_on(until(self.deadline, context, async move {
            next.await.transpose().map_err(|e| Error::http(context, e))
        }))
    }
}

async fn until<T>(
    deadline: Option<Instant>,
    context: &'static str,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline.into(), fut)
            .await
            .map_err(|_| Error::Timeout { context })?,
        None => fut.await,
    }
}

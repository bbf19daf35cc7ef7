use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use super::record_result_on_span;
use crate::config::ClientConfig;
use crate::error::{ConfigError, Error, Result};
use crate::request::{Request, decode_body, decode_value};

/// Async transport over a pooled [`reqwest::Client`].
///
/// Cloning is cheap; clones share the connection pool and configuration.
/// Each call suspends the calling task only while awaiting the network and
/// is cancelled, with its connection dropped, if the future is dropped.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Builds a transport with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be initialised.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout())
            .build()
            .map_err(ConfigError::HttpClient)?;
        Ok(Self::with_client(config, client))
    }

    /// Builds a transport on top of an existing client.
    ///
    /// The configured timeout is still applied to every request/response call.
    #[must_use]
    pub fn with_client(config: ClientConfig, client: reqwest::Client) -> Self {
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
    pub async fn execute(&self, request: &Request) -> Result<Value> {
        let result = self.execute_inner(request).await;
        record_result_on_span(&result);
        result
    }

    /// Performs `request` and decodes the body into `T`.
    ///
    /// # Errors
    ///
    /// As [`execute`](Self::execute), plus [`Error::Decode`] if the body does
    /// not match `T`.
    pub async fn call<T: DeserializeOwned>(&self, request: &Request) -> Result<T> {
        let value = self.execute(request).await?;
        decode_value(request.context(), value)
    }

    async fn execute_inner(&self, request: &Request) -> Result<Value> {
        let context = request.context();
        let response = self.send(request, Some(self.config.timeout())).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::http(context, e))?;
        decode_body(context, &bytes)
    }

    /// Opens a streaming response.
    ///
    /// The configured timeout bounds only the wait for response headers; the
    /// body may stay open indefinitely.
    pub(crate) async fn open_stream(&self, request: &Request) -> Result<reqwest::Response> {
        let context = request.context();
        tokio::time::timeout(self.config.timeout(), self.send(request, None))
            .await
            .map_err(|_| Error::Timeout { context })?
    }

    async fn send(&self, request: &Request, timeout: Option<Duration>) -> Result<reqwest::Response> {
        let context = request.context();
        let url = request.url(self.config.base_url())?;
        let mut builder = self
            .client
            .request(request.method().clone(), url)
            .headers(request.headers(&self.config)?);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| Error::http(context, e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .map_err(|e| Error::http(context, e))?;
        Err(Error::from_response(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use http::StatusCode;
    use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport(server: &MockServer, key: Option<&str>, env_key: Option<&str>) -> HttpTransport {
        let mut builder = ClientConfig::builder().base_url(server.uri());
        if let Some(key) = key {
            builder = builder.api_key(key);
        }
        let env_key = env_key.map(str::to_owned);
        let config = builder.build_with_env(move |_| env_key).unwrap();
        HttpTransport::new(config).unwrap()
    }

    #[tokio::test]
    async fn explicit_key_is_sent_over_environment_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/wallets/current"))
            .and(header("authorization", "Bearer key_explicit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport(&server, Some("key_explicit"), Some("key_env"));
        let value = transport
            .execute(&Request::get("/v1/wallets/current"))
            .await
            .unwrap();
        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn no_authorization_header_without_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/wallets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let transport = transport(&server, None, None);
        transport.execute(&Request::post("/v1/wallets")).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("authorization"));
        assert!(
            requests[0]
                .headers
                .get("user-agent")
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("lnbot-rust/")
        );
    }

    #[tokio::test]
    async fn body_and_query_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/invoices"))
            .and(query_param("limit", "5"))
            .and(header_exists("authorization"))
            .and(body_json(serde_json::json!({"amount": 21})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"number": 1})))
            .mount(&server)
            .await;

        let transport = transport(&server, Some("key_a"), None);
        let request = Request::post("/v1/invoices")
            .query("limit", Some(5))
            .query("after", None::<u64>)
            .json(&serde_json::json!({"amount": 21}))
            .unwrap();
        let value = transport.execute(&request).await.unwrap();
        assert_eq!(value["number"], 1);
    }

    #[tokio::test]
    async fn empty_success_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/webhooks/wh_1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let transport = transport(&server, Some("key_a"), None);
        let value = transport
            .execute(&Request::delete("/v1/webhooks/{id}").param("wh_1"))
            .await
            .unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn error_statuses_are_classified() {
        let server = MockServer::start().await;
        let cases = [
            (400, ErrorKind::BadRequest),
            (401, ErrorKind::Unauthorized),
            (403, ErrorKind::Forbidden),
            (404, ErrorKind::NotFound),
            (409, ErrorKind::Conflict),
            (500, ErrorKind::Other),
        ];
        for (code, _) in cases {
            Mock::given(method("GET"))
                .and(path(format!("/status/{code}")))
                .respond_with(
                    ResponseTemplate::new(code)
                        .set_body_string(format!(r#"{{"message":"status {code}"}}"#)),
                )
                .mount(&server)
                .await;
        }

        let transport = transport(&server, Some("key_a"), None);
        for (code, kind) in cases {
            let request = Request::get("/status/{code}").param(code);
            let err = transport.execute(&request).await.unwrap_err();
            assert_eq!(err.kind(), kind, "status {code}");
            assert_eq!(err.status(), StatusCode::from_u16(code).ok());
            assert_eq!(err.body(), Some(format!(r#"{{"message":"status {code}"}}"#).as_str()));
            assert_eq!(err.api_error().unwrap().message, format!("status {code}"));
        }
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let transport = transport(&server, None, None);
        let err = transport
            .execute(&Request::get("/v1/wallets/current"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert_eq!(err.status(), None);
        assert_eq!(err.body(), Some("<html>"));
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let config = ClientConfig::builder()
            .base_url(server.uri())
            .timeout(Duration::from_millis(100))
            .build_with_env(|_| None)
            .unwrap();
        let transport = HttpTransport::new(config).unwrap();
        let err = transport
            .execute(&Request::get("/v1/wallets/current"))
            .await
            .unwrap_err();
        assert!(err.is_timeout(), "{err:?}");
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ClientConfig::builder()
            .base_url(format!("http://{addr}"))
            .build_with_env(|_| None)
            .unwrap();
        let transport = HttpTransport::new(config).unwrap();
        let err = transport
            .execute(&Request::get("/v1/wallets/current"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Http { .. }), "{err:?}");
        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(err.status(), None);
        assert_eq!(err.body(), None);
    }
}

//! Request descriptor.
//!
//! A [`Request`] is a scheduling-agnostic description of one call: method,
//! path template, path parameters, query, optional JSON body and the
//! expected response type. Both
//! transports turn it into a URL and header set with the same functions, so
//! authentication and serialization behave identically in either model.

use std::fmt;

use http::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::constants::{self, ACCEPT_EVENT_STREAM, ACCEPT_JSON};
use crate::error::{ConfigError, Error, Result};

/// One call against the API.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    path: &'static str,
    context: &'static str,
    params: Vec<String>,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
    accept: &'static str,
}

impl Request {
    /// Creates a request for the path template `path`, relative to the
    /// configured base URL. Segments written as `{name}` are filled in order
    /// by [`param`](Self::param).
    #[must_use]
    pub const fn new(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            context: path,
            params: Vec::new(),
            query: Vec::new(),
            body: None,
            accept: ACCEPT_JSON,
        }
    }

    /// `GET path`.
    #[must_use]
    pub const fn get(path: &'static str) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST path`.
    #[must_use]
    pub const fn post(path: &'static str) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PATCH path`.
    #[must_use]
    pub const fn patch(path: &'static str) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// `DELETE path`.
    #[must_use]
    pub const fn delete(path: &'static str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Fills the next `{name}` segment of the path template. The value is
    /// percent-encoded as one segment.
    #[must_use]
    pub fn param(mut self, value: impl fmt::Display) -> Self {
        self.params.push(value.to_string());
        self
    }

    /// Replaces the error and tracing context, which defaults to the path
    /// template.
    #[must_use]
    pub const fn with_context(mut self, context: &'static str) -> Self {
        self.context = context;
        self
    }

    /// Adds a query parameter; `None` leaves the parameter out entirely.
    #[must_use]
    pub fn query(mut self, key: &'static str, value: Option<impl fmt::Display>) -> Self {
        if let Some(value) = value {
            self.query.push((key, value.to_string()));
        }
        self
    }

    /// Attaches a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if `body` cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body).map_err(Error::Serialize)?);
        Ok(self)
    }

    /// Expects a server-sent event stream instead of a JSON document.
    #[must_use]
    pub const fn event_stream(mut self) -> Self {
        self.accept = ACCEPT_EVENT_STREAM;
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Path template, e.g. `/v1/invoices/{id}`.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Static description used as error and tracing context, e.g.
    /// `GET /v1/invoices/{id}`.
    #[must_use]
    pub const fn context(&self) -> &'static str {
        self.context
    }

    /// JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Query parameters that will be sent.
    #[must_use]
    pub fn query_pairs(&self) -> &[(&'static str, String)] {
        &self.query
    }

    /// Resolves the full URL against `base`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `base` cannot carry a path, or
    /// [`Error::InvalidInput`] if the template has more `{name}` segments
    /// than parameters were given.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let segments = self.segments().collect::<Result<Vec<_>>>()?;
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| ConfigError::NotABase(base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Headers for this request under `config`.
    ///
    /// `Authorization` is present only when an API key is configured.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the API key cannot be sent in a header.
    pub fn headers(&self, config: &ClientConfig) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(ACCEPT, HeaderValue::from_static(self.accept));
        headers.insert(USER_AGENT, HeaderValue::from_static(constants::USER_AGENT));
        if let Some(key) = config.api_key() {
            let mut value = HeaderValue::try_from(format!("Bearer {key}"))
                .map_err(|_| Error::InvalidInput("API key contains invalid header characters"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

impl Request {
    fn segments(&self) -> impl Iterator<Item = Result<&str>> {
        let mut params = self.params.iter();
        self.path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(move |segment| {
                if segment.starts_with('{') && segment.ends_with('}') {
                    params
                        .next()
                        .map(String::as_str)
                        .ok_or(Error::InvalidInput("missing path parameter"))
                } else {
                    Ok(segment)
                }
            })
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.method)?;
        for segment in self.segments() {
            write!(f, "/{}", segment.unwrap_or("{?}"))?;
        }
        Ok(())
    }
}

/// Builds a [`Request`] whose context names the method and path template.
macro_rules! endpoint {
    ($method:ident $path:literal) => {
        $crate::request::Request::new(::http::Method::$method, $path)
            .with_context(concat!(stringify!($method), " ", $path))
    };
}
pub(crate) use endpoint;

/// Parses a 2xx body. An empty body decodes to [`Value::Null`].
pub(crate) fn decode_body(context: &'static str, bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|source| Error::Decode {
        context,
        body: Some(String::from_utf8_lossy(bytes).into_owned()),
        source,
    })
}

/// Converts a decoded body into the declared result type.
pub(crate) fn decode_value<T: DeserializeOwned>(context: &'static str, value: Value) -> Result<T> {
    T::deserialize(&value).map_err(|source| Error::Decode {
        context,
        body: Some(value.to_string()),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: Option<&str>) -> ClientConfig {
        let mut builder = ClientConfig::builder().base_url("https://api.example.com/");
        if let Some(key) = key {
            builder = builder.api_key(key);
        }
        builder.build_with_env(|_| None).unwrap()
    }

    #[test]
    fn url_joins_path_and_encodes_segments() {
        let cfg = config(None);
        let req = Request::delete("/v1/addresses/{address}").param("alice@ln.bot");
        assert_eq!(
            req.url(cfg.base_url()).unwrap().as_str(),
            "https://api.example.com/v1/addresses/alice@ln.bot"
        );

        let req = Request::get("/v1/invoices/{id}").param("a b/c");
        assert_eq!(
            req.url(cfg.base_url()).unwrap().as_str(),
            "https://api.example.com/v1/invoices/a%20b%2Fc"
        );
    }

    #[test]
    fn base_path_is_preserved() {
        let cfg = ClientConfig::builder()
            .base_url("http://localhost:9000/proxy/")
            .build_with_env(|_| None)
            .unwrap();
        let req = Request::get("/v1/wallets/current");
        assert_eq!(
            req.url(cfg.base_url()).unwrap().as_str(),
            "http://localhost:9000/proxy/v1/wallets/current"
        );
    }

    #[test]
    fn unset_query_parameters_are_omitted() {
        let cfg = config(None);
        let req = Request::get("/v1/invoices")
            .query("limit", Some(10))
            .query("after", None::<u64>);
        assert_eq!(
            req.url(cfg.base_url()).unwrap().as_str(),
            "https://api.example.com/v1/invoices?limit=10"
        );

        let req = Request::get("/v1/invoices").query("after", None::<u64>);
        assert_eq!(req.url(cfg.base_url()).unwrap().query(), None);
    }

    #[test]
    fn authorization_only_with_key() {
        let req = Request::get("/v1/wallets/current");

        let headers = req.headers(&config(Some("key_abc"))).unwrap();
        let auth = headers.get(AUTHORIZATION).unwrap();
        assert_eq!(auth, "Bearer key_abc");
        assert!(auth.is_sensitive());
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
        assert!(
            headers
                .get(USER_AGENT)
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("lnbot-rust/")
        );

        let headers = req.headers(&config(None)).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn event_stream_accept_header() {
        let req = Request::get("/v1/events").event_stream();
        let headers = req.headers(&config(None)).unwrap();
        assert_eq!(headers.get(ACCEPT).unwrap(), "text/event-stream");
    }

    #[test]
    fn display_includes_dynamic_segments() {
        let req = Request::post("/v1/keys/{slot}/rotate").param(0);
        assert_eq!(req.to_string(), "POST /v1/keys/0/rotate");
    }

    #[test]
    fn missing_parameter_is_rejected() {
        let req = Request::get("/v1/payments/{id}/events");
        let err = req.url(config(None).base_url()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(req.to_string(), "GET /v1/payments/{?}/events");
    }

    #[test]
    fn endpoint_context_names_method_and_template() {
        let req = endpoint!(GET "/v1/invoices/{id}/events").param(7);
        assert_eq!(req.context(), "GET /v1/invoices/{id}/events");
        assert_eq!(req.path(), "/v1/invoices/{id}/events");
        assert_eq!(req.to_string(), "GET /v1/invoices/7/events");

        assert_eq!(Request::get("/v1/keys").context(), "/v1/keys");
    }

    #[test]
    fn empty_body_decodes_to_null() {
        assert_eq!(decode_body("test", b"").unwrap(), Value::Null);
        assert_eq!(decode_body("test", b" \n").unwrap(), Value::Null);
        let err = decode_body("test", b"{oops").unwrap_err();
        assert_eq!(err.body(), Some("{oops"));
    }
}

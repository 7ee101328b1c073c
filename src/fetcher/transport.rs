//! HTTP transport behind the fetcher
//!
//! [`Transport`] is the seam between the pipeline and the network. The
//! default [`ReqwestTransport`] keeps one `reqwest::Client` per distinct
//! combination of proxy, redirect policy and TLS verification, since those are
//! client-level settings in reqwest. Headers and timeouts are applied per
//! request.

use dashmap::DashMap;
use futures::StreamExt;
use futures::future::BoxFuture;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;

use super::options::{Redirects, RequestOptions};
use crate::errors::{BundleError, BundleResult};

/// A fully-read HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// URL the response was served from, after redirects
    pub url: String,
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Add a header; invalid names or values are dropped with a warning
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => log::warn!("Dropping invalid response header {name}: {value}"),
        }
        self
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Raw `Content-Type` header, if present and valid ASCII
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }
}

/// Performs GET requests described by [`RequestOptions`]
///
/// Non-2xx responses are returned as `Ok`; callers decide whether a status is
/// fatal. Errors are reserved for failures to obtain a response at all.
pub trait Transport: Send + Sync {
    fn send<'a>(&'a self, options: &'a RequestOptions) -> BoxFuture<'a, BundleResult<HttpResponse>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ClientKey {
    proxy: Option<String>,
    redirects: Redirects,
    accept_invalid_certs: bool,
}

impl ClientKey {
    fn of(options: &RequestOptions) -> Self {
        Self {
            proxy: options.proxy().map(str::to_string),
            redirects: options.redirects(),
            accept_invalid_certs: options.accept_invalid_certs(),
        }
    }
}

/// [`Transport`] backed by reqwest with rustls
#[derive(Debug, Default)]
pub struct ReqwestTransport {
    clients: DashMap<ClientKey, Client>,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn client_for(&self, options: &RequestOptions) -> BundleResult<Client> {
        let key = ClientKey::of(options);
        if let Some(client) = self.clients.get(&key) {
            return Ok(client.clone());
        }

        let client = build_client(&key).map_err(|e| BundleError::Request {
            url: options.url().to_string(),
            message: format!("failed to build HTTP client: {e}"),
        })?;
        self.clients.insert(key, client.clone());
        Ok(client)
    }

    async fn execute(&self, options: &RequestOptions) -> BundleResult<HttpResponse> {
        let client = self.client_for(options)?;
        let request_error = |e: reqwest::Error| BundleError::Request {
            url: options.url().to_string(),
            message: e.to_string(),
        };

        let mut request = client.get(options.url());
        for (name, value) in options.headers() {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = options.timeout() {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(request_error)?;
        let url = response.url().to_string();
        let status = response.status().as_u16();
        let headers = response.headers().clone();

        let max_body_size = options.max_body_size();
        let limit = max_body_size.unwrap_or(usize::MAX);

        // Enforce Content-Length limit before reading the body
        let expected = response.content_length().unwrap_or(0);
        if expected > limit as u64 {
            return Err(BundleError::TooLarge { url, limit });
        }

        let mut body = Vec::with_capacity(initial_capacity(expected, max_body_size));

        // Stream with size checking, Content-Length may be missing or wrong
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(request_error)?;
            if body.len() + chunk.len() > limit {
                return Err(BundleError::TooLarge { url, limit });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(HttpResponse {
            url,
            status,
            headers,
            body,
        })
    }
}

impl Transport for ReqwestTransport {
    fn send<'a>(&'a self, options: &'a RequestOptions) -> BoxFuture<'a, BundleResult<HttpResponse>> {
        Box::pin(self.execute(options))
    }
}

/// Content-Length is only trusted for preallocation once it passed a size limit
fn initial_capacity(expected: u64, limit: Option<usize>) -> usize {
    match limit {
        Some(limit) => usize::try_from(expected).map_or(limit, |expected| expected.min(limit)),
        None => 0,
    }
}

fn build_client(key: &ClientKey) -> reqwest::Result<Client> {
    let redirect = match key.redirects {
        Redirects::Follow(max) => Policy::limited(max),
        Redirects::Stop => Policy::none(),
    };

    let builder = Client::builder()
        .redirect(redirect)
        .danger_accept_invalid_certs(key.accept_invalid_certs);

    // Without an explicit proxy, ignore proxy environment variables too
    let builder = match &key.proxy {
        Some(proxy) => builder.proxy(reqwest::Proxy::all(proxy.as_str())?),
        None => builder.no_proxy(),
    };

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_capacity_needs_a_limit() {
        assert_eq!(initial_capacity(u64::MAX, None), 0);
        assert_eq!(initial_capacity(512, Some(1024)), 512);
        assert_eq!(initial_capacity(0, Some(1024)), 0);
    }

    #[test]
    fn test_response_content_type() {
        let response = HttpResponse::new("http://example.com/a.css", 200, "a{}")
            .with_header("Content-Type", "text/css; charset=utf-8");

        assert!(response.is_success());
        assert_eq!(response.content_type(), Some("text/css; charset=utf-8"));
        assert!(!HttpResponse::new("http://example.com/", 404, "").is_success());
    }

    #[test]
    fn test_clients_are_shared_per_key() {
        let transport = ReqwestTransport::new();
        let plain = RequestOptions::new("http://example.com/a");
        let other_url = RequestOptions::new("http://example.com/b").with_header("X-Test", "1");
        let proxied = plain.clone().with_proxy("http://127.0.0.1:3128");

        assert!(transport.client_for(&plain).is_ok());
        assert!(transport.client_for(&other_url).is_ok());
        assert_eq!(transport.clients.len(), 1);

        assert!(transport.client_for(&proxied).is_ok());
        assert_eq!(transport.clients.len(), 2);
    }

    #[tokio::test]
    async fn test_body_limit_is_enforced() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/big.bin")
            .with_status(200)
            .with_body(vec![0u8; 64])
            .create_async()
            .await;

        let transport = ReqwestTransport::new();
        let options =
            RequestOptions::new(format!("{}/big.bin", server.url())).with_max_body_size(16);

        let result = transport.send(&options).await;
        assert!(matches!(result, Err(BundleError::TooLarge { limit: 16, .. })));
    }

    #[tokio::test]
    async fn test_non_success_status_is_returned() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body("gone")
            .create_async()
            .await;

        let transport = ReqwestTransport::new();
        let options = RequestOptions::new(format!("{}/missing", server.url()));

        let response = transport.send(&options).await.expect("response");
        assert_eq!(response.status, 404);
        assert_eq!(response.body, b"gone");
    }
}

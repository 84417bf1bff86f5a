//! The I/O seam: something that turns an `HttpRequest` into an
//! `HttpResponse`.
//!
//! # Design
//! The fetch pipeline never touches the network itself. A `Transport` is
//! injected into `Fetcher`, so tests substitute a canned one and hosts can
//! bring whatever HTTP stack they already run. Timeouts, pooling, proxies and
//! TLS are the transport's business.

use std::future::Future;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round trip.
///
/// A non-2xx status is still a response and must be returned as `Ok`; `Err`
/// is reserved for requests that produced no response at all.
pub trait Transport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use super::*;

    /// `Transport` backed by an async `reqwest::Client`.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        /// Wrap a caller-configured client (timeouts, proxies, TLS).
        pub fn new(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    impl Transport for ReqwestTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let HttpRequest {
                method,
                url,
                headers,
                body,
            } = request;
            let method = reqwest::Method::from_bytes(method.as_str().as_bytes())
                .map_err(|e| TransportError::new(format!("{e}: {method}")))?;

            let mut builder = self.client.request(method, url.as_str());
            for (name, value) in &headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = body {
                builder = builder.body(body);
            }
            let response = builder.send().await?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.to_string(), value.to_string()))
                })
                .collect();
            let body = response.text().await?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }

}

//! Single-call JSON-over-HTTP helper.
//!
//! # Overview
//! Takes a `RequestConfig` (method, url, headers, JSON body, query params),
//! performs one round trip through an injected `Transport`, and normalizes
//! the outcome. Two delivery styles share one pipeline:
//! - `Fetcher::call` never fails and returns a `FetchOutcome { data, error }`.
//! - `Fetcher::try_call` returns `Result<Value, FetchError>`.
//!
//! # Design
//! - Build and parse are pure functions over plain-data `HttpRequest` /
//!   `HttpResponse` values; only the transport does I/O.
//! - `Fetcher` is stateless apart from its transport and failure log, both
//!   injected, so tests run against a fake transport and a recording log.
//! - With the default `reqwest` feature, `ReqwestTransport` and the free
//!   functions `call` / `try_call` are available.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod log;
pub mod response;
pub mod transport;

pub use client::Fetcher;
pub use config::RequestConfig;
pub use error::{FetchError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use log::{FailureLog, NoopLog, TracingLog};
pub use response::{parse_response, FetchOutcome};
pub use transport::Transport;

#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;

/// `Fetcher::call` with a fresh `ReqwestTransport` and `TracingLog`.
#[cfg(feature = "reqwest")]
pub async fn call(config: RequestConfig) -> FetchOutcome {
    Fetcher::new(ReqwestTransport::default()).call(config).await
}

/// `Fetcher::try_call` with a fresh `ReqwestTransport` and `TracingLog`.
#[cfg(feature = "reqwest")]
pub async fn try_call(config: RequestConfig) -> Result<serde_json::Value, FetchError> {
    Fetcher::new(ReqwestTransport::default()).try_call(config).await
}

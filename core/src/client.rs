//! Stateless fetch helper with two result-delivery styles.
//!
//! # Design
//! Every call runs the same pipeline: `RequestConfig::build` produces an
//! `HttpRequest`, the injected `Transport` executes it, and `parse_response`
//! classifies the `HttpResponse`. `call` and `try_call` are thin adapters over
//! that pipeline: the first folds any failure into a `FetchOutcome`, the
//! second returns it as `Err`. `Fetcher` holds no mutable state, so calls on a
//! shared instance are independent.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::RequestConfig;
use crate::error::FetchError;
use crate::log::{FailureLog, TracingLog};
use crate::response::{decode, parse_response, FetchOutcome};
use crate::transport::Transport;

/// Performs one HTTP round trip per call through an injected transport.
#[derive(Debug, Clone, Default)]
pub struct Fetcher<T, L = TracingLog> {
    transport: T,
    log: L,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            log: TracingLog,
        }
    }
}

impl<T: Transport, L: FailureLog> Fetcher<T, L> {
    pub fn with_log(transport: T, log: L) -> Self {
        Self { transport, log }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Never fails. Network, parse and encoding failures are recorded in the
    /// failure log; a non-2xx response is returned without being recorded.
    pub async fn call(&self, config: RequestConfig) -> FetchOutcome {
        let result = self.execute(config).await;
        if let Err(err) = &result {
            if !err.is_http() {
                self.log.record_failure(err);
            }
        }
        result.into()
    }

    /// Returns the parsed payload, or the failure after recording it.
    pub async fn try_call(&self, config: RequestConfig) -> Result<Value, FetchError> {
        self.execute(config)
            .await
            .inspect_err(|err| self.log.record_failure(err))
    }

    /// Like `try_call`, with the payload deserialized into `R`.
    pub async fn try_call_as<R: DeserializeOwned>(
        &self,
        config: RequestConfig,
    ) -> Result<R, FetchError> {
        let data = self.try_call(config).await?;
        decode(data).inspect_err(|err| self.log.record_failure(err))
    }

    async fn execute(&self, config: RequestConfig) -> Result<Value, FetchError> {
        let request = config.build()?;
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received response");
        parse_response(response)
    }
}

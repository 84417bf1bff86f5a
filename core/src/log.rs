//! Where caught failures are reported.

use tracing::error;

use crate::error::FetchError;

/// Sink for failures caught by `Fetcher`.
pub trait FailureLog {
    fn record_failure(&self, err: &FetchError);
}

/// Emits an `error` level `tracing` event per failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl FailureLog for TracingLog {
    fn record_failure(&self, err: &FetchError) {
        error!(error = %err, status = ?err.status(), "fetch failed");
    }
}

/// Discards failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl FailureLog for NoopLog {
    fn record_failure(&self, _err: &FetchError) {}
}

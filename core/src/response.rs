//! Response classification and the non-throwing result shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FetchError, UNKNOWN_ERROR};
use crate::http::HttpResponse;

/// Parse the body as JSON, then classify by status.
///
/// The body is parsed before the status is looked at, so a failed response
/// with a non-JSON body surfaces as a parse failure rather than an HTTP one.
pub fn parse_response(response: HttpResponse) -> Result<Value, FetchError> {
    let data: Value =
        serde_json::from_str(&response.body).map_err(|e| FetchError::Parse(e.to_string()))?;
    if response.is_success() {
        return Ok(data);
    }
    Err(FetchError::Http {
        status: response.status,
        message: failure_message(&data),
    })
}

/// Deserialize a payload into a concrete type.
pub fn decode<T: DeserializeOwned>(data: Value) -> Result<T, FetchError> {
    serde_json::from_value(data).map_err(|e| FetchError::Parse(e.to_string()))
}

/// The `message` field of a failure body, or `UNKNOWN_ERROR` when it is
/// missing or falsy.
fn failure_message(data: &Value) -> String {
    match data.get("message") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => UNKNOWN_ERROR.to_string(),
        Some(Value::String(message)) if message.is_empty() => UNKNOWN_ERROR.to_string(),
        Some(Value::String(message)) => message.clone(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => UNKNOWN_ERROR.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Result of a non-throwing call. Exactly one of `data` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchOutcome {
    pub data: Option<Value>,
    pub error: Option<String>,
}

impl FetchOutcome {
    pub fn ok(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<Value, String> {
        match self.error {
            Some(message) => Err(message),
            None => Ok(self.data.unwrap_or(Value::Null)),
        }
    }
}

impl From<Result<Value, FetchError>> for FetchOutcome {
    fn from(result: Result<Value, FetchError>) -> Self {
        match result {
            Ok(data) => FetchOutcome::ok(data),
            Err(err) => FetchOutcome::err(err.to_string()),
        }
    }
}

//! Error types for the JSON-RPC pipeline.
//!
//! A call fails in exactly one of four ways, and each has its own type so that
//! callers can tell which layer rejected the request:
//!
//! - **Transport**: no HTTP response was received ([`ClientError::Transport`]).
//! - **HTTP**: a response arrived with a status outside `200..=299` ([`HttpError`]).
//!   The body is never inspected for a JSON-RPC `error` object.
//! - **RPC**: a 2xx response carried a JSON-RPC `error` object ([`RpcError`]).
//! - **Decode**: a 2xx, error-free response did not have the shape the requested
//!   method promises ([`DecodeError`]).
//!
//! None of these are retried or recovered from inside the crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use monero_rpc::rpc::{ClientError, RpcClient};
//!
//! # async fn example() -> Result<(), ClientError> {
//! let client = RpcClient::new("http://127.0.0.1:18081")?;
//! match client.call("get_block_header_by_height", Some(serde_json::json!({ "height": u64::MAX }))).await {
//!     Err(ClientError::Rpc(e)) => eprintln!("daemon rejected {}: {} ({})", e.method(), e.message, e.code),
//!     Err(ClientError::Http(e)) => eprintln!("daemon unreachable or misconfigured: {e}"),
//!     Err(e) => eprintln!("{e}"),
//!     Ok(result) => println!("{result:?}"),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

use super::envelope::RequestEnvelope;

/// Every way an [`RpcClient`](super::RpcClient) operation can fail.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured endpoint could not be turned into a `/json_rpc` URL.
    #[error("Invalid RPC endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The request was refused before anything was sent.
    #[error("Invalid JSON-RPC request `{method}`: {reason}")]
    InvalidRequest { method: String, reason: String },

    /// The request envelope could not be serialized.
    #[error("Failed to encode request for `{method}`: {source}")]
    Encode {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    /// The round trip failed before any HTTP response was received
    /// (connection refused, DNS failure, TLS error, timeout, ...).
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// A response was received but its status code is outside `200..=299`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP error {status_code}{}{}", fmt_reason(.reason), fmt_body(.body))]
pub struct HttpError {
    pub status_code: u16,
    /// Canonical reason phrase of the status code, empty for non-standard codes.
    pub reason: String,
    /// The response payload, when it could be read.
    pub body: Option<String>,
}

fn fmt_reason(reason: &str) -> String {
    if reason.is_empty() {
        String::new()
    } else {
        format!(" {reason}")
    }
}

fn fmt_body(body: &Option<String>) -> String {
    match body {
        Some(body) if !body.is_empty() => format!(": {body}"),
        _ => String::new(),
    }
}

/// A 2xx response whose body held a JSON-RPC `error` object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("RPC error {code} from `{}`: {message}", method_of(.request))]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    /// The envelope that produced the error, kept so callers can tell which
    /// method and params the daemon rejected.
    pub request: RequestEnvelope,
}

impl RpcError {
    pub fn method(&self) -> &str {
        method_of(&self.request)
    }
}

fn method_of(request: &RequestEnvelope) -> &str {
    &request.method
}

/// A successful response that does not match what the method promises.
///
/// Usually means the client and the daemon disagree on the protocol version.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Response to `{method}` is not a JSON object: {source}")]
    MalformedBody {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Response to `{method}` has a malformed `error` object: {reason}")]
    MalformedError { method: String, reason: String },

    #[error("Response to `{method}` has neither `result` nor `error`")]
    MissingResult { method: String },

    #[error("Response to `{method}` is missing required field `{field}`")]
    MissingField { method: String, field: String },

    #[error("Response to `{method}` has invalid field `{field}`: expected {expected}, {reason}")]
    InvalidField {
        method: String,
        field: String,
        expected: &'static str,
        reason: String,
    },
}

impl DecodeError {
    /// The method whose response failed to decode.
    pub fn method(&self) -> &str {
        match self {
            DecodeError::MalformedBody { method, .. }
            | DecodeError::MalformedError { method, .. }
            | DecodeError::MissingResult { method }
            | DecodeError::MissingField { method, .. }
            | DecodeError::InvalidField { method, .. } => method,
        }
    }

    /// The offending field path, for field-level failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            DecodeError::MissingField { field, .. } | DecodeError::InvalidField { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

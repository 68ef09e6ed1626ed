//! Two-stage response validation.
//!
//! 1. [`check_http_status`]: anything outside `200..=299` becomes an [`HttpError`] and
//!    the body is never parsed as JSON-RPC, even when it happens to contain an `error`.
//! 2. [`check_rpc_response`]: the body is parsed losslessly and a non-null `error`
//!    object becomes an [`RpcError`] carrying the original request. Otherwise the
//!    `result` value is handed back for mapping.

use serde_json::{Map, Value};

use super::{
    envelope::RequestEnvelope,
    error::{ClientError, DecodeError, HttpError, RpcError},
    numeric::{self, NumericError},
    transport::HttpReply,
};

pub(crate) fn check_http_status(reply: HttpReply) -> Result<Vec<u8>, ClientError> {
    if !reply.status.is_success() {
        let reason = reply.reason().to_string();
        let body = reply.body.ok().map(|bytes| String::from_utf8_lossy(&bytes).into_owned());
        return Err(HttpError {
            status_code: reply.status.as_u16(),
            reason,
            body,
        }
        .into());
    }

    Ok(reply.body?)
}

pub(crate) fn check_rpc_response(body: &[u8], request: &RequestEnvelope) -> Result<Value, ClientError> {
    let mut response = numeric::parse_object(body).map_err(|source| DecodeError::MalformedBody {
        method: request.method.clone(),
        source,
    })?;

    match response.remove("error") {
        None | Some(Value::Null) => {},
        Some(Value::Object(error)) => return Err(extract_rpc_error(error, request)?.into()),
        Some(other) => {
            return Err(DecodeError::MalformedError {
                method: request.method.clone(),
                reason: format!("expected an object, got {other}"),
            }
            .into());
        },
    }

    match response.remove("result") {
        None | Some(Value::Null) => Err(DecodeError::MissingResult {
            method: request.method.clone(),
        }
        .into()),
        Some(result) => Ok(result),
    }
}

fn extract_rpc_error(mut error: Map<String, Value>, request: &RequestEnvelope) -> Result<RpcError, DecodeError> {
    let malformed = |reason: String| DecodeError::MalformedError {
        method: request.method.clone(),
        reason,
    };

    let code = match error.get("code") {
        Some(Value::Number(code)) => numeric::decode_integer(code)
            .and_then(|code| numeric::narrow::<i64>(&code))
            .map_err(|e: NumericError| malformed(format!("`code`: {e}")))?,
        Some(other) => return Err(malformed(format!("`code` is not a number: {other}"))),
        None => return Err(malformed("missing `code`".to_string())),
    };

    let message = match error.remove("message") {
        Some(Value::String(message)) => message,
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    };

    Ok(RpcError {
        code,
        message,
        request: request.clone(),
    })
}

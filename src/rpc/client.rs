//! The composition root of the pipeline.
//!
//! [`RpcClient`] owns one endpoint configuration (URL, optional credentials,
//! connection pool) and exposes the single primitive everything else builds on:
//! envelope → transport → HTTP check → JSON-RPC check → `result`.

use std::time::Duration;

use log::{debug, warn};
use serde_json::{Map, Value};
use url::Url;

use crate::config::EndpointConfig;

use super::{
    envelope::RequestEnvelope,
    error::{ClientError, ClientResult},
    mapper::FromRpcResult,
    method::RpcMethod,
    transport::{Credentials, HttpTransport},
    validator,
};

/// Request id used when none is configured.
pub const DEFAULT_REQUEST_ID: &str = "0";

const JSON_RPC_PATH: &str = "/json_rpc";

/// JSON-RPC client for one monerod or monero-wallet-rpc endpoint.
///
/// Calls are independent single round trips: no retries, no batching, no
/// background work. The client holds no mutable state between calls apart from
/// the pooled HTTP connections, so it can be cloned or shared across tasks freely.
///
/// # Example
///
/// ```rust,no_run
/// use monero_rpc::rpc::RpcClient;
///
/// # async fn example() -> Result<(), monero_rpc::rpc::ClientError> {
/// let client = RpcClient::with_credentials("127.0.0.1", 18081, Some("monero"), Some("secret"))?;
/// let result = client.call("get_block_count", None).await?;
/// println!("count = {}", result["count"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RpcClient {
    transport: HttpTransport,
    request_id: String,
}

impl RpcClient {
    /// Creates an anonymous client from an endpoint such as `http://127.0.0.1:18081`.
    ///
    /// A missing scheme defaults to `http://`. Requests always go to `/json_rpc`
    /// on the endpoint's host and port.
    pub fn new(endpoint: &str) -> ClientResult<Self> {
        Self::build(parse_endpoint(endpoint)?, None, None, DEFAULT_REQUEST_ID)
    }

    /// Creates an anonymous client for `http://{host}:{port}/json_rpc`.
    pub fn from_host_port(host: &str, port: u16) -> ClientResult<Self> {
        Self::with_credentials(host, port, None, None)
    }

    /// Creates a client for `http://{host}:{port}/json_rpc` that sends basic-auth
    /// credentials when either part is given.
    pub fn with_credentials(
        host: &str,
        port: u16,
        username: Option<&str>,
        password: Option<&str>,
    ) -> ClientResult<Self> {
        let rpc_uri = if host.contains(':') && !host.starts_with('[') {
            parse_endpoint(&format!("http://[{host}]:{port}"))?
        } else {
            parse_endpoint(&format!("http://{host}:{port}"))?
        };
        Self::build(
            rpc_uri,
            Credentials::from_parts(username, password),
            None,
            DEFAULT_REQUEST_ID,
        )
    }

    /// Creates a client from loaded configuration.
    pub fn with_config(config: &EndpointConfig) -> ClientResult<Self> {
        Self::build(
            parse_endpoint(&config.uri)?,
            Credentials::from_parts(config.username.as_deref(), config.password.as_deref()),
            config.timeout_secs.map(Duration::from_secs),
            &config.request_id,
        )
    }

    fn build(
        rpc_uri: Url,
        credentials: Option<Credentials>,
        timeout: Option<Duration>,
        request_id: &str,
    ) -> ClientResult<Self> {
        debug!(
            endpoint = rpc_uri.as_str(),
            authenticated = credentials.is_some(),
            timeout_secs:? = timeout.map(|t| t.as_secs());
            "Creating JSON-RPC client"
        );
        Ok(Self {
            transport: HttpTransport::new(rpc_uri, credentials, timeout)?,
            request_id: request_id.to_string(),
        })
    }

    /// The full URL requests are POSTed to.
    pub fn rpc_uri(&self) -> &Url {
        self.transport.rpc_uri()
    }

    pub fn rpc_host(&self) -> Option<&str> {
        self.rpc_uri().host_str()
    }

    /// The explicit port, or the scheme's default one.
    pub fn rpc_port(&self) -> Option<u16> {
        self.rpc_uri().port_or_known_default()
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.transport.has_credentials()
    }

    /// Sends `method` and returns its `result` value, whatever its JSON type.
    pub async fn call_value(&self, method: &str, params: Option<Value>) -> ClientResult<Value> {
        if method.trim().is_empty() {
            return Err(ClientError::InvalidRequest {
                method: method.to_string(),
                reason: "method name must not be empty".to_string(),
            });
        }
        let envelope = RequestEnvelope::new(self.request_id.as_str(), method, params);

        let result = self.round_trip(&envelope).await;
        if let Err(e) = &result {
            warn!(
                method = method,
                endpoint = self.rpc_uri().as_str(),
                error:% = e;
                "JSON-RPC call failed"
            );
        }
        result
    }

    /// Sends `method` and returns its `result` object.
    ///
    /// A `result` that is not a JSON object is a [`DecodeError`](super::DecodeError).
    pub async fn call(&self, method: &str, params: Option<Value>) -> ClientResult<Map<String, Value>> {
        self.call_as(method, params).await
    }

    /// Sends a typed method and maps its `result` onto the method's response model.
    pub async fn call_method<M: RpcMethod>(&self, request: &M) -> ClientResult<M::Response> {
        self.call_as(M::METHOD, request.params()).await
    }

    async fn call_as<T: FromRpcResult>(&self, method: &str, params: Option<Value>) -> ClientResult<T> {
        let result = self.call_value(method, params).await?;
        T::from_result(method, result).map_err(|e| {
            warn!(
                method = method,
                field = e.field().unwrap_or_default();
                "Unexpected JSON-RPC result shape"
            );
            ClientError::from(e)
        })
    }

    async fn round_trip(&self, envelope: &RequestEnvelope) -> ClientResult<Value> {
        let reply = self.transport.send(envelope).await?;
        debug!(
            method = envelope.method.as_str(),
            status = reply.status.as_u16();
            "Received JSON-RPC response"
        );

        let body = validator::check_http_status(reply)?;
        validator::check_rpc_response(&body, envelope)
    }
}

fn parse_endpoint(endpoint: &str) -> ClientResult<Url> {
    let invalid = |reason: String| ClientError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let trimmed = endpoint.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let base = Url::parse(&with_scheme).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", base.scheme())));
    }
    if base.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }

    base.join(JSON_RPC_PATH).map_err(|e| invalid(e.to_string()))
}

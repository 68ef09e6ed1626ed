use std::{fmt, time::Duration};

use log::debug;
use reqwest::{StatusCode, header::CONTENT_TYPE};
use url::Url;

use super::{envelope::RequestEnvelope, error::ClientError};

/// Basic-auth credential pair attached to every request of a client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Builds credentials when at least one part is given; the missing part is empty.
    pub fn from_parts(username: Option<&str>, password: Option<&str>) -> Option<Self> {
        if username.is_none() && password.is_none() {
            return None;
        }
        Some(Self {
            username: username.unwrap_or_default().to_string(),
            password: password.unwrap_or_default().to_string(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// What came back from one POST: the status line and the fully buffered body.
///
/// A body that failed to download is kept as the error so the validator can
/// decide whether it matters (it does not for non-2xx statuses).
#[derive(Debug)]
pub(crate) struct HttpReply {
    pub status: StatusCode,
    pub body: Result<Vec<u8>, reqwest::Error>,
}

impl HttpReply {
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or_default()
    }
}

/// Single-shot HTTP POST to one `/json_rpc` endpoint.
///
/// No retries and no timeout unless one was configured. Clones share the
/// underlying `reqwest` connection pool.
#[derive(Clone)]
pub(crate) struct HttpTransport {
    rpc_uri: Url,
    client: reqwest::Client,
    credentials: Option<Credentials>,
}

impl HttpTransport {
    pub fn new(rpc_uri: Url, credentials: Option<Credentials>, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            rpc_uri,
            client,
            credentials,
        })
    }

    pub fn rpc_uri(&self) -> &Url {
        &self.rpc_uri
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    pub async fn send(&self, envelope: &RequestEnvelope) -> Result<HttpReply, ClientError> {
        let body = serde_json::to_vec(envelope).map_err(|source| ClientError::Encode {
            method: envelope.method.clone(),
            source,
        })?;
        debug!(
            method = envelope.method.as_str(),
            endpoint = self.rpc_uri.as_str(),
            has_params = envelope.params.is_some(),
            bytes = body.len();
            "Sending JSON-RPC request"
        );

        let mut request = self
            .client
            .post(self.rpc_uri.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await.map(|bytes| bytes.to_vec());

        Ok(HttpReply { status, body })
    }
}

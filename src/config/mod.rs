mod loader;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use loader::{get_default_config, load_configuration, write_config_to};

use crate::{cli::ConnectionArgs, rpc::DEFAULT_REQUEST_ID};

/// Connection settings for one JSON-RPC endpoint.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Endpoint such as `http://127.0.0.1:18081`; requests go to its `/json_rpc`.
    pub uri: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Request timeout. Unset leaves the HTTP client's default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_request_id")]
    pub request_id: String,
}

fn default_request_id() -> String {
    DEFAULT_REQUEST_ID.to_string()
}

impl EndpointConfig {
    pub fn anonymous(uri: &str) -> Self {
        Self {
            uri: uri.to_string(),
            username: None,
            password: None,
            timeout_secs: None,
            request_id: default_request_id(),
        }
    }

    fn local_daemon() -> Self {
        Self::anonymous("http://127.0.0.1:18081")
    }

    fn local_wallet() -> Self {
        Self::anonymous("http://127.0.0.1:18082")
    }
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<REDACTED>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("request_id", &self.request_id)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "EndpointConfig::local_daemon")]
    pub daemon: EndpointConfig,
    #[serde(default = "EndpointConfig::local_wallet")]
    pub wallet: EndpointConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            daemon: EndpointConfig::local_daemon(),
            wallet: EndpointConfig::local_wallet(),
        }
    }
}

impl AppConfig {
    /// Command line values win over the file and environment.
    ///
    /// `--username`/`--password` apply to both endpoints.
    pub fn apply_connection(&mut self, args: &ConnectionArgs) {
        if let Some(daemon_url) = &args.daemon_url {
            self.daemon.uri = daemon_url.clone();
        }
        if let Some(wallet_url) = &args.wallet_url {
            self.wallet.uri = wallet_url.clone();
        }
        for endpoint in [&mut self.daemon, &mut self.wallet] {
            if let Some(username) = &args.username {
                endpoint.username = Some(username.clone());
            }
            if let Some(password) = &args.password {
                endpoint.password = Some(password.clone());
            }
        }
    }
}

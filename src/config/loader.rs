use std::{fs, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use config::{Config, Environment};
use log::info;

use super::AppConfig;

const ENV_PREFIX: &str = "MONERO_RPC";

pub fn get_default_config() -> &'static str {
    include_str!("../../config/config.toml")
}

/// Loads `path`, writing the embedded default there first if it does not exist.
///
/// Environment variables such as `MONERO_RPC_DAEMON__URI` override file values.
pub fn load_configuration(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        let sources = get_default_config();
        write_config_to(path, sources).context("Could not create default config")?;
        info!(path:% = path.display(); "Created new configuration file");
    }

    let filename = path.to_str().context("Invalid config file path")?;

    let cfg = Config::builder()
        .add_source(config::File::with_name(filename))
        .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("_").separator("__"))
        .build()
        .context("Could not build config")?;

    cfg.try_deserialize().context("Invalid configuration")
}

pub fn write_config_to(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create parent directories")?;
    };

    let mut file = File::create(path).context("Failed to create config file")?;
    file.write_all(source.as_bytes())
        .context("Failed to write config content")?;
    file.write_all(b"\n").context("Failed to write newline")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::rpc::DEFAULT_REQUEST_ID;

    #[test]
    fn test_missing_file_gets_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_configuration(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.daemon.uri, "http://127.0.0.1:18081");
        assert_eq!(config.wallet.uri, "http://127.0.0.1:18082");
        assert_eq!(config.daemon.request_id, DEFAULT_REQUEST_ID);
        assert_eq!(config.daemon.timeout_secs, None);
    }

    #[test]
    fn test_existing_file_is_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_config_to(
            &path,
            r#"
[daemon]
uri = "http://10.0.0.5:38081"
timeout_secs = 30

[wallet]
uri = "http://10.0.0.5:38083"
username = "rpc_user"
password = "abc123"
request_id = "1"
"#,
        )
        .unwrap();

        let config = load_configuration(&path).unwrap();

        assert_eq!(config.daemon.uri, "http://10.0.0.5:38081");
        assert_eq!(config.daemon.timeout_secs, Some(30));
        assert_eq!(config.daemon.username, None);
        assert_eq!(config.wallet.username.as_deref(), Some("rpc_user"));
        assert_eq!(config.wallet.request_id, "1");
    }

    #[test]
    fn test_missing_sections_use_local_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_config_to(&path, "[daemon]\nuri = \"http://node:18089\"").unwrap();

        let config = load_configuration(&path).unwrap();

        assert_eq!(config.daemon.uri, "http://node:18089");
        assert_eq!(config.wallet, AppConfig::default().wallet);
    }
}

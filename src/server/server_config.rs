use std::{fs, io::ErrorKind, net::SocketAddr, path::Path};
use serde::{Serialize, Deserialize};
use toml;
use anyhow::{self, Context};
use log::info;

use tally::LedgerConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub ledger: LedgerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            ledger: LedgerConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str(content)
            .with_context(|| "failed to parse config file")?;
        return Ok(config);
    }

    /// Reads `filepath`, falling back to defaults when it does not exist.
    pub fn read_or_default(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let filepath = filepath.as_ref();
        match fs::read_to_string(filepath) {
            Ok(content) => Self::from_toml(&content),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("no config at {}, using defaults", filepath.display());
                Ok(ServerConfig::default())
            },
            Err(err) => Err(err).with_context(|| "failed to read config file"),
        }
    }
}


#[cfg(test)]
mod tests {
    use std::{net::SocketAddr, path::PathBuf, time::Duration};

    use super::ServerConfig;

    #[test]
    fn defaults() {
        let config = ServerConfig::from_toml("").unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn nested_ledger_section() {
        let config = ServerConfig::from_toml(r#"
            bind_addr = "0.0.0.0:8080"

            [ledger]
            store_path = "data/store.json"
            validation_delay_ms = 50
        "#).unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.ledger.store_path, PathBuf::from("data/store.json"));
        assert_eq!(config.ledger.storage_key, "expenses");
        assert_eq!(config.ledger.validation_delay, Duration::from_millis(50));
    }

    #[test]
    fn missing_file_falls_back() {
        let config = ServerConfig::read_or_default("/definitely/not/here.toml").unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn bad_address() {
        assert!(ServerConfig::from_toml("bind_addr = \"nowhere\"").is_err());
    }
}

use std::{fs, path::{Path, PathBuf}, time::Duration};

use anyhow::{self, Context};
use serde::{Serialize, Deserialize};
use serde_with::{serde_as, DurationMilliSeconds};

use crate::backend::DEFAULT_STORAGE_KEY;
use crate::core::validate::DEFAULT_VALIDATION_DELAY;

/// Where the ledger lives and how it behaves. Every field may be omitted.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// File holding the key-value store
    pub store_path: PathBuf,
    /// Key the expense list is stored under
    pub storage_key: String,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "validation_delay_ms")]
    pub validation_delay: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            store_path: PathBuf::from("tally.json"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            validation_delay: DEFAULT_VALIDATION_DELAY,
        }
    }
}

impl LedgerConfig {
    pub fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file_content = fs::read_to_string(filepath)
            .with_context(|| "failed to read config file")?;
        return Self::from_toml(&file_content);
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str(content)
            .with_context(|| "failed to parse config file")?;
        return Ok(config);
    }
}

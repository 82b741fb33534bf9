// src/config/config.rs
use crate::utils::error::{NotifierError, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

/// MIA minted per won block
///
/// Provisional flat rate; the real CityCoins issuance schedule halves over
/// time, so deployments override this through `issuance_per_block`.
pub const DEFAULT_ISSUANCE_PER_BLOCK: u64 = 100_000;

/// Share of winnings kept by contributors after the pool's 4% fee
pub const DEFAULT_FEE_RETENTION: f64 = 0.96;

/// Public statistics service queried for history and chain height
pub const DEFAULT_STATS_API_URL: &str = "https://miamining.com";

/// Source of string-keyed configuration values
///
/// An absent key is `None`, never an error; typed extraction and the
/// required/optional decision happen in [`Settings::from_provider`].
pub trait ConfigProvider {
    /// Looks up a raw configuration value
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigProvider for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

/// Configuration backed by a flat TOML file
///
/// Every top-level scalar (string, integer, float, boolean) is exposed as
/// its string form. Tables and arrays are ignored.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    values: BTreeMap<String, String>,
}

impl FileConfig {
    /// Loads configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Ok(FileConfig)` - Successfully loaded configuration
    /// * `Err(NotifierError)` - If file couldn't be read or parsed
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let config_str = std::fs::read_to_string(&path).map_err(|e| {
            NotifierError::ConfigError(format!(
                "Failed to read config at {}: {}",
                path.display(),
                e
            ))
        })?;

        config_str.parse()
    }

    /// Generates a configuration template string
    ///
    /// # Returns
    /// String containing a commented TOML configuration template
    pub fn generate_template() -> String {
        let mut template = String::new();
        template.push_str("# MIA Block Win Notifier Configuration\n\n");
        template.push_str("# Wallet whose wins are tracked\n");
        template.push_str("wallet_address = \"SP000000000000000000002Q6VF78\"\n");
        template.push_str("# First block height mined by this pool\n");
        template.push_str("mining_start_block = 24497\n");
        template.push_str("# Pool name used in the notification header\n");
        template.push_str("pool_id = \"MIA Pool\"\n");
        template.push_str("# Total STX contributed to the pool\n");
        template.push_str("pool_total = 100000.0\n\n");
        template.push_str("# Discord webhooks (production and test)\n");
        template.push_str("discord_webhook = \"https://discord.com/api/webhooks/ID/TOKEN\"\n");
        template.push_str("discord_webhook_test = \"https://discord.com/api/webhooks/ID/TOKEN\"\n\n");
        template.push_str("# Optional overrides\n");
        template.push_str(&format!(
            "# issuance_per_block = {}\n",
            DEFAULT_ISSUANCE_PER_BLOCK
        ));
        template.push_str(&format!("# fee_retention = {}\n", DEFAULT_FEE_RETENTION));
        template.push_str(&format!("# stats_api_url = \"{}\"\n", DEFAULT_STATS_API_URL));

        template
    }
}

impl FromStr for FileConfig {
    type Err = NotifierError;

    fn from_str(s: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(s)
            .map_err(|e| NotifierError::ConfigError(format!("Invalid config format: {}", e)))?;

        let values = table
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    toml::Value::String(s) => s,
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Float(f) => f.to_string(),
                    toml::Value::Boolean(b) => b.to_string(),
                    _ => {
                        log::debug!("ignoring non-scalar config key: {}", key);
                        return None;
                    }
                };
                Some((key, text))
            })
            .collect();

        Ok(FileConfig { values })
    }
}

impl ConfigProvider for FileConfig {
    fn get(&self, key: &str) -> Option<String> {
        log::debug!("fetching config: {}", key);
        self.values.get(key).cloned()
    }
}

/// Business constants that turn bids into winnings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Economics {
    /// MIA minted per won block
    pub issuance_per_block: u64,
    /// Fraction of winnings retained after pool fees
    pub fee_retention: f64,
}

impl Default for Economics {
    fn default() -> Self {
        Economics {
            issuance_per_block: DEFAULT_ISSUANCE_PER_BLOCK,
            fee_retention: DEFAULT_FEE_RETENTION,
        }
    }
}

/// Typed view over a [`ConfigProvider`]
#[derive(Debug, Clone)]
pub struct Settings {
    /// Tracked wallet address
    pub wallet_address: String,
    /// Inclusive lower bound on block heights counted for the pool
    pub mining_start_block: u64,
    /// Pool name shown in the report header
    pub pool_id: String,
    /// Total funds under management, in display units
    pub pool_total: f64,
    /// Production destination
    pub discord_webhook: Option<String>,
    /// Test destination, posted to on every new win
    pub discord_webhook_test: Option<String>,
    /// Base URL of the stats service
    pub stats_api_url: String,
    /// Issuance and fee constants
    pub economics: Economics,
}

impl Settings {
    /// Extracts and validates settings from a provider
    ///
    /// Webhooks stay optional here; the run fails only when a
    /// destination it actually needs is missing.
    pub fn from_provider(provider: &impl ConfigProvider) -> Result<Self> {
        let defaults = Economics::default();

        Ok(Settings {
            wallet_address: required(provider, "wallet_address")?,
            mining_start_block: parse_required(provider, "mining_start_block")?,
            pool_id: required(provider, "pool_id")?,
            pool_total: parse_required(provider, "pool_total")?,
            discord_webhook: provider.get("discord_webhook"),
            discord_webhook_test: provider.get("discord_webhook_test"),
            stats_api_url: provider
                .get("stats_api_url")
                .unwrap_or_else(|| DEFAULT_STATS_API_URL.to_string()),
            economics: Economics {
                issuance_per_block: parse_optional(provider, "issuance_per_block")?
                    .unwrap_or(defaults.issuance_per_block),
                fee_retention: parse_optional(provider, "fee_retention")?
                    .unwrap_or(defaults.fee_retention),
            },
        })
    }
}

fn required(provider: &impl ConfigProvider, key: &str) -> Result<String> {
    provider
        .get(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| NotifierError::ConfigError(format!("Missing required key: {}", key)))
}

fn parse_required<T: FromStr>(provider: &impl ConfigProvider, key: &str) -> Result<T> {
    let raw = required(provider, key)?;
    parse_value(key, &raw)
}

fn parse_optional<T: FromStr>(provider: &impl ConfigProvider, key: &str) -> Result<Option<T>> {
    provider
        .get(key)
        .map(|raw| parse_value(key, &raw))
        .transpose()
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| NotifierError::ConfigError(format!("Invalid value for {}: {:?}", key, raw)))
}

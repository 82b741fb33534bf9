// src/network/stats_api.rs
use crate::types::{HistorySnapshot, RawBlock};
use crate::utils::error::{NotifierError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use url::Url;

/// Source of a wallet's mining history and of the chain tip
#[allow(async_fn_in_trait)]
pub trait MiningHistorySource {
    /// Every block the stats service knows about for `wallet`
    async fn fetch_history(&self, wallet: &str) -> Result<HistorySnapshot>;

    /// Current chain height
    async fn fetch_current_height(&self) -> Result<u64>;
}

/// Client for the public miamining.com statistics API
///
/// Both endpoints are unauthenticated, read-only GETs.
pub struct StatsApiClient {
    /// HTTP client for making requests
    client: Client,
    /// Service root, e.g. `https://miamining.com`
    base_url: Url,
}

/// Body of `GET /blocks/current_block`
#[derive(Debug, Deserialize)]
struct CurrentBlockResponse {
    #[serde(rename = "currentBlock")]
    current_block: HeightField,
}

/// Heights are served as numbers by some deployments and strings by others
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HeightField {
    Number(u64),
    Text(String),
}

impl StatsApiClient {
    /// Creates a client rooted at `base_url`
    ///
    /// # Errors
    /// `UrlError` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(StatsApiClient {
            client: Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }
}

impl MiningHistorySource for StatsApiClient {
    async fn fetch_history(&self, wallet: &str) -> Result<HistorySnapshot> {
        let mut url = self.endpoint("blocks")?;
        url.query_pairs_mut().append_pair("miner", wallet);
        log::debug!("fetching history: {}", url);

        let raw: BTreeMap<String, RawBlock> = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_history(raw)
    }

    async fn fetch_current_height(&self) -> Result<u64> {
        let url = self.endpoint("blocks/current_block")?;
        log::debug!("fetching current block: {}", url);

        let response: CurrentBlockResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.current_block.into_height()
    }
}

impl HeightField {
    fn into_height(self) -> Result<u64> {
        match self {
            HeightField::Number(n) => Ok(n),
            HeightField::Text(s) => s.trim().parse().map_err(|_| {
                NotifierError::ProtocolError(format!("Invalid currentBlock: {:?}", s))
            }),
        }
    }
}

/// Converts the height-keyed wire map into a [`HistorySnapshot`]
///
/// # Errors
/// `ProtocolError` if a key is not a block height.
pub fn parse_history(raw: BTreeMap<String, RawBlock>) -> Result<HistorySnapshot> {
    raw.into_iter()
        .map(|(key, block)| {
            let height = key.trim().parse::<u64>().map_err(|_| {
                NotifierError::ProtocolError(format!("Invalid block height key: {:?}", key))
            })?;
            Ok((height, block.into_block(height)))
        })
        .collect()
}

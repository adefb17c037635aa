//! DEX pair listing for liquidity detection
//!
//! Pulls the full Raydium pair list over HTTP and keeps the pairs that trade
//! the target mint. A failed listing degrades to "no pairs" instead of
//! aborting the run.

use crate::error::{AppError, AppResult};
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;

/// One pair object as served by the Raydium pair listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaydiumPair {
    #[serde(default)]
    pub lp_mint: Option<String>,
    #[serde(default)]
    pub base_mint: Option<String>,
    #[serde(default)]
    pub quote_mint: Option<String>,
    #[serde(default)]
    pub base_symbol: Option<String>,
    #[serde(default)]
    pub quote_symbol: Option<String>,
    #[serde(default)]
    pub base_decimals: Option<u8>,
    #[serde(default)]
    pub quote_decimals: Option<u8>,
    /// Base reserve, raw pool units
    #[serde(default)]
    pub token_amount_coin: Option<f64>,
    /// Quote reserve, raw pool units
    #[serde(default)]
    pub token_amount_pc: Option<f64>,
}

/// A pool trading the target token
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityPair {
    pub pool_address: String,
    pub base_mint_address: String,
    pub quote_mint_address: String,
    pub base_token_name: String,
    pub quote_token_name: String,
    pub base_token_decimals: u8,
    pub quote_token_decimals: u8,
    /// Raw reserve, not decimal-adjusted
    pub base_token_liquidity: f64,
    /// Raw reserve, not decimal-adjusted
    pub quote_token_liquidity: f64,
}

impl From<&RaydiumPair> for LiquidityPair {
    fn from(pair: &RaydiumPair) -> Self {
        Self {
            pool_address: pair.lp_mint.clone().unwrap_or_default(),
            base_mint_address: pair.base_mint.clone().unwrap_or_default(),
            quote_mint_address: pair.quote_mint.clone().unwrap_or_default(),
            base_token_name: pair.base_symbol.clone().unwrap_or_default(),
            quote_token_name: pair.quote_symbol.clone().unwrap_or_default(),
            base_token_decimals: pair.base_decimals.unwrap_or_default(),
            quote_token_decimals: pair.quote_decimals.unwrap_or_default(),
            base_token_liquidity: pair.token_amount_coin.unwrap_or_default(),
            quote_token_liquidity: pair.token_amount_pc.unwrap_or_default(),
        }
    }
}

/// Pair count and summed reserves for the target token
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiquiditySummary {
    pub pair_count: usize,
    /// Sum of base reserves over pairs where the token is the base side
    pub total_base_liquidity: f64,
    /// Sum of quote reserves over pairs where the token is the quote side
    pub total_quote_liquidity: f64,
}

impl LiquiditySummary {
    /// Sum the target token's own side of each pair.
    ///
    /// A pair counts toward the base total when the token is its base mint,
    /// otherwise toward the quote total when it is the quote mint.
    pub fn from_pairs(pairs: &[LiquidityPair], mint: &str) -> Self {
        let mut summary = Self {
            pair_count: pairs.len(),
            ..Self::default()
        };

        for pair in pairs {
            if pair.base_mint_address == mint {
                summary.total_base_liquidity += pair.base_token_liquidity;
            } else if pair.quote_mint_address == mint {
                summary.total_quote_liquidity += pair.quote_token_liquidity;
            }
        }

        summary
    }
}

/// Keep pairs where `mint` is either side, in listing order
pub fn filter_pairs(pairs: &[RaydiumPair], mint: &str) -> Vec<LiquidityPair> {
    pairs
        .iter()
        .filter(|pair| {
            pair.base_mint.as_deref() == Some(mint) || pair.quote_mint.as_deref() == Some(mint)
        })
        .map(LiquidityPair::from)
        .collect()
}

/// Fetches tradable pairs from the DEX aggregator
pub struct LiquidityFetcher {
    http_client: reqwest::Client,
    pairs_url: String,
}

impl LiquidityFetcher {
    /// Create a new liquidity fetcher for a pair listing URL
    pub fn new(pairs_url: &str) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(http_client, pairs_url))
    }

    /// Create from an existing HTTP client
    pub fn with_client(http_client: reqwest::Client, pairs_url: &str) -> Self {
        Self {
            http_client,
            pairs_url: pairs_url.to_string(),
        }
    }

    /// Pairs trading `mint`; empty when the listing cannot be fetched
    pub async fn fetch_liquidity_pairs(&self, mint: &Pubkey) -> Vec<LiquidityPair> {
        tracing::info!(url = %self.pairs_url, "Fetching pools");

        let pools = match self.fetch_all_pairs().await {
            Ok(pools) => pools,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    url = %self.pairs_url,
                    "Error fetching Raydium pools, reporting without liquidity"
                );
                return Vec::new();
            }
        };

        let pairs = filter_pairs(&pools, &mint.to_string());
        tracing::debug!(
            mint = %mint,
            listed = pools.len(),
            pairs = pairs.len(),
            "Filtered pair listing"
        );
        pairs
    }

    async fn fetch_all_pairs(&self) -> AppResult<Vec<RaydiumPair>> {
        let response = self
            .http_client
            .get(&self.pairs_url)
            .send()
            .await
            .map_err(|e| AppError::Http(format!("Raydium pairs request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Http(format!(
                "Raydium API returned error: {}",
                response.status()
            )));
        }

        let listing = response
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| AppError::Http(format!("Failed to parse Raydium pairs: {}", e)))?;

        Ok(decode_pairs(listing))
    }
}

/// Decode listing entries one by one, skipping entries that do not fit [`RaydiumPair`]
pub fn decode_pairs(listing: Vec<serde_json::Value>) -> Vec<RaydiumPair> {
    listing
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(pair) => Some(pair),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed Raydium pair");
                None
            }
        })
        .collect()
}

//! One scan: metadata, then liquidity, then scoring

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::risk::{self, RiskFinding, RiskThresholds};
use crate::token::{LiquidityFetcher, LiquidityPair, LiquiditySummary, TokenMetadata, TokenMetadataFetcher};
use solana_sdk::pubkey::Pubkey;

/// Everything the report printer needs
#[derive(Debug, Clone)]
pub struct TokenRiskReport {
    pub metadata: TokenMetadata,
    pub pairs: Vec<LiquidityPair>,
    pub liquidity: LiquiditySummary,
    pub findings: Vec<RiskFinding>,
}

/// Runs the fetch and analysis stages in order
pub struct TokenScanner {
    metadata_fetcher: TokenMetadataFetcher,
    liquidity_fetcher: LiquidityFetcher,
    thresholds: RiskThresholds,
}

impl TokenScanner {
    /// Build the RPC and HTTP clients from configuration
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Ok(Self::new(
            TokenMetadataFetcher::new(&config.rpc_url),
            LiquidityFetcher::new(&config.pairs_api_url)?,
            config.risk.clone(),
        ))
    }

    pub fn new(
        metadata_fetcher: TokenMetadataFetcher,
        liquidity_fetcher: LiquidityFetcher,
        thresholds: RiskThresholds,
    ) -> Self {
        Self {
            metadata_fetcher,
            liquidity_fetcher,
            thresholds,
        }
    }

    /// Scan one mint. Metadata failures abort; liquidity failures degrade to zero.
    pub async fn scan(&self, mint: &Pubkey) -> AppResult<TokenRiskReport> {
        let metadata = self.metadata_fetcher.fetch_token_metadata(mint).await?;

        let pairs = self.liquidity_fetcher.fetch_liquidity_pairs(mint).await;
        let liquidity = LiquiditySummary::from_pairs(&pairs, &mint.to_string());

        let findings = risk::analyze_with(
            &self.thresholds,
            &metadata,
            liquidity.pair_count,
            liquidity.total_base_liquidity,
            liquidity.total_quote_liquidity,
        );

        tracing::info!(
            mint = %mint,
            pairs = liquidity.pair_count,
            overall = %risk::overall(&findings),
            "Scan complete"
        );

        Ok(TokenRiskReport {
            metadata,
            pairs,
            liquidity,
            findings,
        })
    }
}

//! Configuration management for the token risk scanner
//!
//! Loads configuration from optional config files and environment variables.
//! Environment variables override file values.

use crate::constants::endpoints;
use crate::error::{AppError, AppResult};
use crate::risk::RiskThresholds;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Solana RPC endpoint URL
    #[serde(default)]
    pub rpc_url: String,
    /// Mint address of the token to scan
    #[serde(default)]
    pub contract_address: String,
    /// DEX pair listing endpoint
    #[serde(default = "default_pairs_api_url")]
    pub pairs_api_url: String,
    /// Risk heuristic thresholds
    #[serde(default)]
    pub risk: RiskThresholds,
}

fn default_pairs_api_url() -> String {
    endpoints::RAYDIUM_PAIRS.to_string()
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables prefixed with TOKEN_RISK_ (nested keys use `__`)
    /// 2. Plain environment variables (`rpc_url`, `contract_address`, `RISK__HIGH_CONCENTRATION`)
    /// 3. config/config.{toml,yaml,json} (if exists)
    /// 4. config.{toml,yaml,json} (if exists)
    /// 5. Default values
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(
            Environment::default().separator("__"),
            Environment::with_prefix("TOKEN_RISK")
                .prefix_separator("_")
                .separator("__"),
        )
    }

    fn load_from(plain_env: Environment, prefixed_env: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("pairs_api_url", endpoints::RAYDIUM_PAIRS)?
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config/config").required(false))
            // RPC_URL=... -> rpc_url, RISK__HIGH_CONCENTRATION=0.6 -> risk.high_concentration
            .add_source(plain_env)
            // TOKEN_RISK_RISK__HIGH_CONCENTRATION=0.6 -> risk.high_concentration
            .add_source(prefixed_env)
            .build()?;

        config.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc_url.trim().is_empty() {
            return Err(ConfigError::Message(
                "rpc_url must be set (env rpc_url or RPC_URL)".to_string(),
            ));
        }

        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err(ConfigError::Message(format!(
                "rpc_url must be an http(s) URL, got '{}'",
                self.rpc_url
            )));
        }

        if self.contract_address.trim().is_empty() {
            return Err(ConfigError::Message(
                "contract_address must be set (env contract_address or CONTRACT_ADDRESS)".to_string(),
            ));
        }

        if Pubkey::from_str(self.contract_address.trim()).is_err() {
            return Err(ConfigError::Message(format!(
                "contract_address '{}' is not a valid Solana address",
                self.contract_address
            )));
        }

        if self.risk.medium_concentration > self.risk.high_concentration {
            return Err(ConfigError::Message(
                "risk.medium_concentration must not exceed risk.high_concentration".to_string(),
            ));
        }

        if self.risk.high_liquidity_floor > self.risk.medium_liquidity_floor {
            return Err(ConfigError::Message(
                "risk.high_liquidity_floor must not exceed risk.medium_liquidity_floor".to_string(),
            ));
        }

        Ok(())
    }

    /// The token mint to scan
    pub fn mint(&self) -> AppResult<Pubkey> {
        Pubkey::from_str(self.contract_address.trim()).map_err(|e| {
            AppError::Validation(format!("Invalid token address: {}", e))
        })
    }
}

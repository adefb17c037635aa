//! Token Risk Scanner Library
//!
//! Builds a risk report for one SPL token: authority centralization,
//! holder concentration and DEX liquidity depth.
//! This library exposes core modules for testing.

pub mod config;
pub mod constants;
pub mod error;
pub mod report;
pub mod risk;
pub mod scanner;
pub mod token;

// Re-export commonly used types for tests
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use report::ReportPrinter;
pub use risk::{analyze, analyze_with, RiskFinding, RiskLevel, RiskThresholds};
pub use scanner::{TokenRiskReport, TokenScanner};
pub use token::{
    ChainReader, HolderBalance, LiquidityFetcher, LiquidityPair, LiquiditySummary, TokenMetadata,
    TokenMetadataFetcher,
};

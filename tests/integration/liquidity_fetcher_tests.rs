//! Integration tests for the liquidity fetcher
//!
//! Serves a pair listing from a local HTTP server and checks
//! filtering plus the soft-fail policy.

use crate::common::{closed_port_url, raydium_pair, serve_pairs, serve_status};
use axum::http::StatusCode;
use serde_json::json;
use solana_sdk::pubkey::Pubkey;
use token_risk_scanner::LiquidityFetcher;

const SOL: &str = "So11111111111111111111111111111111111111112";
const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

#[tokio::test]
async fn test_fetch_filters_listing() {
    let mint = Pubkey::new_unique();
    let target = mint.to_string();
    let url = serve_pairs(json!([
        raydium_pair("lp-1", SOL, USDC, 1.0, 2.0),
        raydium_pair("lp-2", &target, SOL, 10.0, 3.0),
        raydium_pair("lp-3", USDC, &target, 4.0, 40.0),
    ]))
    .await;

    let fetcher = LiquidityFetcher::new(&url).unwrap();
    let pairs = fetcher.fetch_liquidity_pairs(&mint).await;

    let pools: Vec<_> = pairs.iter().map(|p| p.pool_address.as_str()).collect();
    assert_eq!(pools, vec!["lp-2", "lp-3"]);
    assert_eq!(pairs[0].base_token_liquidity, 10.0);
    assert_eq!(pairs[1].quote_token_liquidity, 40.0);
}

#[tokio::test]
async fn test_server_error_yields_empty() {
    let url = serve_status(StatusCode::INTERNAL_SERVER_ERROR).await;
    let fetcher = LiquidityFetcher::new(&url).unwrap();
    assert!(fetcher.fetch_liquidity_pairs(&Pubkey::new_unique()).await.is_empty());
}

#[tokio::test]
async fn test_unreachable_api_yields_empty() {
    let url = closed_port_url().await;
    let fetcher = LiquidityFetcher::new(&url).unwrap();
    assert!(fetcher.fetch_liquidity_pairs(&Pubkey::new_unique()).await.is_empty());
}

#[tokio::test]
async fn test_malformed_body_yields_empty() {
    let url = serve_pairs(json!({ "error": "rate limited" })).await;
    let fetcher = LiquidityFetcher::new(&url).unwrap();
    assert!(fetcher.fetch_liquidity_pairs(&Pubkey::new_unique()).await.is_empty());
}

#[tokio::test]
async fn test_mistyped_entry_does_not_drop_listing() {
    let mint = Pubkey::new_unique();
    let target = mint.to_string();
    let mut bad = raydium_pair("lp-bad", &target, SOL, 0.0, 0.0);
    bad["tokenAmountCoin"] = json!("12.5");
    let url = serve_pairs(json!([
        raydium_pair("lp-1", &target, SOL, 10.0, 3.0),
        bad,
        raydium_pair("lp-2", USDC, &target, 4.0, 40.0),
    ]))
    .await;

    let fetcher = LiquidityFetcher::new(&url).unwrap();
    let pairs = fetcher.fetch_liquidity_pairs(&mint).await;

    let pools: Vec<_> = pairs.iter().map(|p| p.pool_address.as_str()).collect();
    assert_eq!(pools, vec!["lp-1", "lp-2"]);
}

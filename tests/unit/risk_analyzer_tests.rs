//! Risk Analyzer Unit Tests
//!
//! Tests the three heuristics:
//! - Authority centralization
//! - Top holder concentration bands
//! - Liquidity depth bands

use rust_decimal::Decimal;
use token_risk_scanner::{analyze, analyze_with, HolderBalance, RiskLevel, RiskThresholds, TokenMetadata};

fn token(
    mint_authority: Option<&str>,
    freeze_authority: Option<&str>,
    update_authority: &str,
    top_holder: i64,
    supply: u64,
) -> TokenMetadata {
    TokenMetadata {
        mint: "MintX".to_string(),
        name: "Sample".to_string(),
        symbol: "SMPL".to_string(),
        total_supply: supply,
        decimals: 0,
        mint_authority: mint_authority.map(str::to_string),
        freeze_authority: freeze_authority.map(str::to_string),
        update_authority: update_authority.to_string(),
        largest_holders: vec![HolderBalance {
            address: "HolderX".to_string(),
            amount: Decimal::from(top_holder),
        }],
    }
}

fn severities(findings: &[token_risk_scanner::RiskFinding]) -> Vec<RiskLevel> {
    findings.iter().map(|f| f.severity).collect()
}

#[test]
fn test_always_three_findings_in_fixed_order() {
    let meta = token(Some("AuthX"), Some("AuthX"), "AuthX", 600, 1000);
    let findings = analyze(&meta, 0, 0.0, 0.0);

    assert_eq!(findings.len(), 3);
    assert!(findings[0].message.contains("Centralized control"));
    assert!(findings[1].message.contains("single address"));
    assert!(findings[2].message.contains("liquidity"));
}

#[test]
fn test_identical_authorities_are_high() {
    let meta = token(Some("AuthX"), Some("AuthX"), "AuthX", 1, 1000);
    assert_eq!(analyze(&meta, 0, 0.0, 0.0)[0].severity, RiskLevel::High);
}

#[test]
fn test_different_update_authority_is_low() {
    let meta = token(Some("AuthX"), Some("AuthX"), "AuthY", 1, 1000);
    let finding = &analyze(&meta, 0, 0.0, 0.0)[0];
    assert_eq!(finding.severity, RiskLevel::Low);
    assert_eq!(finding.message, "Distributed control over authorities.");
}

#[test]
fn test_renounced_authorities_are_low() {
    // Absent mint and freeze authority never count as "equal"
    let meta = token(None, None, "AuthX", 1, 1000);
    assert_eq!(analyze(&meta, 0, 0.0, 0.0)[0].severity, RiskLevel::Low);

    let meta = token(Some("AuthX"), None, "AuthX", 1, 1000);
    assert_eq!(analyze(&meta, 0, 0.0, 0.0)[0].severity, RiskLevel::Low);
}

#[test]
fn test_concentration_bands() {
    let cases = [
        (600, RiskLevel::High),
        (501, RiskLevel::High),
        (500, RiskLevel::Medium),
        (300, RiskLevel::Medium),
        (201, RiskLevel::Medium),
        (200, RiskLevel::Low),
        (100, RiskLevel::Low),
    ];

    for (top, expected) in cases {
        let meta = token(None, None, "AuthX", top, 1000);
        assert_eq!(
            analyze(&meta, 0, 0.0, 0.0)[1].severity,
            expected,
            "top holder {} of 1000",
            top
        );
    }
}

#[test]
fn test_concentration_uses_denominated_supply() {
    let mut meta = token(None, None, "AuthX", 600_000, 1_000_000_000_000);
    meta.decimals = 6;
    let finding = &analyze(&meta, 0, 0.0, 0.0)[1];
    assert_eq!(finding.severity, RiskLevel::High);
    assert_eq!(finding.message, "Over 50% of supply held by a single address.");
}

#[test]
fn test_liquidity_bands() {
    let meta = token(None, None, "AuthX", 1, 1000);

    assert_eq!(analyze(&meta, 2, 40_000.0, 40_000.0)[2].severity, RiskLevel::High);
    assert_eq!(analyze(&meta, 1, 100_000.0, 0.0)[2].severity, RiskLevel::Medium);
    assert_eq!(analyze(&meta, 1, 0.0, 999_999.0)[2].severity, RiskLevel::Medium);
    assert_eq!(analyze(&meta, 1, 500_000.0, 500_000.0)[2].severity, RiskLevel::Low);
}

#[test]
fn test_zero_supply_does_not_divide() {
    let meta = token(None, None, "AuthX", 10, 0);
    let finding = &analyze(&meta, 0, 0.0, 0.0)[1];
    assert_eq!(finding.severity, RiskLevel::Low);
    assert!(finding.message.starts_with("Holder concentration unavailable"));
}

#[test]
fn test_analyze_is_deterministic() {
    let meta = token(Some("A"), Some("B"), "C", 300, 1000);
    let first = analyze(&meta, 3, 120_000.0, 5.0);
    let second = analyze(&meta, 3, 120_000.0, 5.0);

    assert_eq!(first, second);
    assert_eq!(
        severities(&first),
        vec![RiskLevel::Low, RiskLevel::Medium, RiskLevel::Medium]
    );
}

#[test]
fn test_custom_thresholds() {
    let thresholds = RiskThresholds {
        high_concentration: 0.8,
        medium_concentration: 0.5,
        high_liquidity_floor: 10.0,
        medium_liquidity_floor: 20.0,
    };
    let meta = token(None, None, "AuthX", 600, 1000);
    let findings = analyze_with(&thresholds, &meta, 1, 15.0, 0.0);

    assert_eq!(findings[1].severity, RiskLevel::Medium);
    assert_eq!(findings[2].severity, RiskLevel::Medium);
}

//! Report Printer Unit Tests
//!
//! Tests section order and line formats of the console report.

use rust_decimal::Decimal;
use token_risk_scanner::{
    HolderBalance, LiquiditySummary, ReportPrinter, RiskFinding, RiskLevel, TokenMetadata,
    TokenRiskReport,
};

fn report() -> TokenRiskReport {
    TokenRiskReport {
        metadata: TokenMetadata {
            mint: "MintX".to_string(),
            name: "Sample".to_string(),
            symbol: "SMPL".to_string(),
            total_supply: 1_000_000_000_000,
            decimals: 6,
            mint_authority: Some("Auth1".to_string()),
            freeze_authority: None,
            update_authority: "Auth1".to_string(),
            largest_holders: vec![
                HolderBalance {
                    address: "HolderA".to_string(),
                    amount: Decimal::new(600_000_000_000, 6),
                },
                HolderBalance {
                    address: "HolderB".to_string(),
                    amount: Decimal::new(1_500_000, 6),
                },
            ],
        },
        pairs: Vec::new(),
        liquidity: LiquiditySummary {
            pair_count: 2,
            total_base_liquidity: 30_000.0,
            total_quote_liquidity: 20_000.0,
        },
        findings: vec![
            RiskFinding {
                severity: RiskLevel::Low,
                message: "Distributed control over authorities.".to_string(),
            },
            RiskFinding {
                severity: RiskLevel::Medium,
                message: "Significant portion of supply held by a single address.".to_string(),
            },
            RiskFinding {
                severity: RiskLevel::High,
                message: "Low total liquidity.".to_string(),
            },
        ],
    }
}

fn render() -> String {
    let mut printer = ReportPrinter::new(Vec::new());
    printer.print(&report()).unwrap();
    String::from_utf8(printer.into_inner()).unwrap()
}

#[test]
fn test_sections_in_fixed_order() {
    let output = render();
    let positions: Vec<usize> = [
        "Token Metadata",
        "Token Authorities",
        "Top 2 Holders",
        "############## Liquidity",
        "Risk Analysis",
    ]
    .iter()
    .map(|title| output.find(title).unwrap_or_else(|| panic!("missing section {}", title)))
    .collect();

    assert!(positions.windows(2).all(|w| w[0] < w[1]), "sections out of order: {}", output);
}

#[test]
fn test_metadata_and_authority_lines() {
    let output = render();
    assert!(output.contains("Name: Sample\n"));
    assert!(output.contains("Symbol: SMPL\n"));
    assert!(output.contains("Token Supply: 1000000\n"));
    assert!(output.contains("Decimals: 6\n"));
    assert!(output.contains("Mint Authority: Auth1\n"));
    assert!(output.contains("Freeze Authority: None\n"));
    assert!(output.contains("Update Authority: Auth1\n"));
}

#[test]
fn test_holders_in_fetch_order() {
    let output = render();
    let first = output.find("HolderA : 600000\n").unwrap();
    let second = output.find("HolderB : 1.5\n").unwrap();
    assert!(first < second);
}

#[test]
fn test_liquidity_and_findings() {
    let output = render();
    assert!(output.contains("Total Number of Pairs: 2\n"));
    assert!(output.contains("Total Base Liquidity: 30000\n"));
    assert!(output.contains("Total Quote Liquidity: 20000\n"));
    assert!(output.contains("Low risk: Distributed control over authorities."));
    assert!(output.contains("Medium risk: Significant portion of supply held by a single address."));
    assert!(output.contains("High risk: Low total liquidity."));
    assert!(output.contains("Overall risk: "));
    assert!(output.contains("HIGH"));
}

//! Heuristic risk scoring
//!
//! Three findings, always in this order:
//! 1. Authority centralization (mint, freeze and update authority)
//! 2. Top holder concentration
//! 3. Liquidity depth (raw base + quote reserves)

use crate::token::TokenMetadata;
use rust_decimal::prelude::*;
use serde::Deserialize;
use std::fmt;

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Label used in front of a finding's message
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// One labeled risk finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskFinding {
    pub severity: RiskLevel,
    pub message: String,
}

impl RiskFinding {
    fn new(severity: RiskLevel, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Cut-offs for the concentration and liquidity heuristics
#[derive(Debug, Clone, Deserialize)]
pub struct RiskThresholds {
    /// Top holder share above which concentration is HIGH
    #[serde(default = "default_high_concentration")]
    pub high_concentration: f64,
    /// Top holder share above which concentration is MEDIUM
    #[serde(default = "default_medium_concentration")]
    pub medium_concentration: f64,
    /// Total liquidity below which depth is HIGH risk
    #[serde(default = "default_high_liquidity_floor")]
    pub high_liquidity_floor: f64,
    /// Total liquidity below which depth is MEDIUM risk
    #[serde(default = "default_medium_liquidity_floor")]
    pub medium_liquidity_floor: f64,
}

fn default_high_concentration() -> f64 {
    0.5
}

fn default_medium_concentration() -> f64 {
    0.2
}

fn default_high_liquidity_floor() -> f64 {
    100_000.0
}

fn default_medium_liquidity_floor() -> f64 {
    1_000_000.0
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_concentration: default_high_concentration(),
            medium_concentration: default_medium_concentration(),
            high_liquidity_floor: default_high_liquidity_floor(),
            medium_liquidity_floor: default_medium_liquidity_floor(),
        }
    }
}

/// Score a token with the default thresholds
pub fn analyze(
    metadata: &TokenMetadata,
    pair_count: usize,
    total_base_liquidity: f64,
    total_quote_liquidity: f64,
) -> Vec<RiskFinding> {
    analyze_with(
        &RiskThresholds::default(),
        metadata,
        pair_count,
        total_base_liquidity,
        total_quote_liquidity,
    )
}

/// Score a token with explicit thresholds
pub fn analyze_with(
    thresholds: &RiskThresholds,
    metadata: &TokenMetadata,
    _pair_count: usize,
    total_base_liquidity: f64,
    total_quote_liquidity: f64,
) -> Vec<RiskFinding> {
    vec![
        authority_finding(metadata),
        concentration_finding(thresholds, metadata),
        liquidity_finding(thresholds, total_base_liquidity + total_quote_liquidity),
    ]
}

/// Highest severity among the findings
pub fn overall(findings: &[RiskFinding]) -> RiskLevel {
    findings
        .iter()
        .map(|finding| finding.severity)
        .max()
        .unwrap_or(RiskLevel::Low)
}

fn authority_finding(metadata: &TokenMetadata) -> RiskFinding {
    let centralized = match &metadata.mint_authority {
        Some(mint_authority) => {
            metadata.freeze_authority.as_ref() == Some(mint_authority)
                && *mint_authority == metadata.update_authority
        }
        None => false,
    };

    if centralized {
        RiskFinding::new(
            RiskLevel::High,
            "Centralized control over minting, freezing, and updating.",
        )
    } else {
        RiskFinding::new(RiskLevel::Low, "Distributed control over authorities.")
    }
}

/// Top holder's share of supply, or why it cannot be computed
fn top_holder_share(metadata: &TokenMetadata) -> Result<f64, &'static str> {
    let supply = metadata
        .denominated_supply()
        .filter(|supply| !supply.is_zero())
        .ok_or("no circulating supply")?;
    let top = metadata.top_holder().ok_or("no holder accounts returned")?;

    top.amount
        .checked_div(supply)
        .and_then(|share| share.to_f64())
        .ok_or("no circulating supply")
}

fn concentration_finding(thresholds: &RiskThresholds, metadata: &TokenMetadata) -> RiskFinding {
    let share = match top_holder_share(metadata) {
        Ok(share) => share,
        Err(reason) => {
            return RiskFinding::new(
                RiskLevel::Low,
                format!("Holder concentration unavailable: {}.", reason),
            )
        }
    };

    if share > thresholds.high_concentration {
        RiskFinding::new(
            RiskLevel::High,
            format!(
                "Over {:.0}% of supply held by a single address.",
                thresholds.high_concentration * 100.0
            ),
        )
    } else if share > thresholds.medium_concentration {
        RiskFinding::new(
            RiskLevel::Medium,
            "Significant portion of supply held by a single address.",
        )
    } else {
        RiskFinding::new(RiskLevel::Low, "Well-distributed token supply.")
    }
}

fn liquidity_finding(thresholds: &RiskThresholds, total_liquidity: f64) -> RiskFinding {
    if total_liquidity < thresholds.high_liquidity_floor {
        RiskFinding::new(RiskLevel::High, "Low total liquidity.")
    } else if total_liquidity < thresholds.medium_liquidity_floor {
        RiskFinding::new(RiskLevel::Medium, "Moderate total liquidity.")
    } else {
        RiskFinding::new(RiskLevel::Low, "High total liquidity.")
    }
}

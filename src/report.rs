//! Console report rendering
//!
//! Writes the sections in a fixed order: metadata, authorities, holders,
//! liquidity, risk analysis. Severity colouring happens only here.

use crate::risk::{self, RiskFinding, RiskLevel};
use crate::scanner::TokenRiskReport;
use colored::{ColoredString, Colorize};
use std::io::{self, Write};

/// Writes a [`TokenRiskReport`] to any output stream
pub struct ReportPrinter<W: Write> {
    out: W,
}

impl<W: Write> ReportPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Print every section of the report
    pub fn print(&mut self, report: &TokenRiskReport) -> io::Result<()> {
        let metadata = &report.metadata;

        self.section("Token Metadata")?;
        writeln!(self.out, "Name: {}", metadata.name)?;
        writeln!(self.out, "Symbol: {}", metadata.symbol)?;
        match metadata.denominated_supply() {
            Some(supply) => writeln!(self.out, "Token Supply: {}", supply.normalize())?,
            None => writeln!(self.out, "Token Supply: {} (raw)", metadata.total_supply)?,
        }
        writeln!(self.out, "Decimals: {}", metadata.decimals)?;

        self.section("Token Authorities")?;
        writeln!(self.out, "Mint Authority: {}", display_authority(&metadata.mint_authority))?;
        writeln!(self.out, "Freeze Authority: {}", display_authority(&metadata.freeze_authority))?;
        writeln!(self.out, "Update Authority: {}", metadata.update_authority)?;

        self.section(&format!("Top {} Holders", metadata.largest_holders.len()))?;
        for holder in &metadata.largest_holders {
            writeln!(self.out, "{} : {}", holder.address, holder.amount.normalize())?;
        }

        self.section("Liquidity")?;
        writeln!(self.out, "Total Number of Pairs: {}", report.liquidity.pair_count)?;
        writeln!(self.out, "Total Base Liquidity: {}", report.liquidity.total_base_liquidity)?;
        writeln!(self.out, "Total Quote Liquidity: {}", report.liquidity.total_quote_liquidity)?;

        self.section("Risk Analysis")?;
        for finding in &report.findings {
            writeln!(self.out, "{}", render_finding(finding))?;
        }
        let overall = risk::overall(&report.findings);
        writeln!(self.out, "Overall risk: {}", colorize(overall, overall.to_string()))?;

        self.out.flush()
    }

    /// Recover the underlying stream
    pub fn into_inner(self) -> W {
        self.out
    }

    fn section(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "\n\n############## {} ##############", title)
    }
}

fn display_authority(authority: &Option<String>) -> &str {
    authority.as_deref().unwrap_or("None")
}

/// `<Level> risk: <message>`, coloured by severity
pub fn render_finding(finding: &RiskFinding) -> ColoredString {
    colorize(
        finding.severity,
        format!("{} risk: {}", finding.severity.label(), finding.message),
    )
}

fn colorize(level: RiskLevel, text: String) -> ColoredString {
    match level {
        RiskLevel::High => text.red(),
        RiskLevel::Medium => text.yellow(),
        RiskLevel::Low => text.green(),
    }
}

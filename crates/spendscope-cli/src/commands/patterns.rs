//! Pattern command implementations

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use spendscope_core::patterns::{PatternDetail, PatternSummary};
use spendscope_core::{
    load_transactions, Impact, Pattern, PatternEngine, PatternQuery, Timeframe, Transaction,
};
use tracing::debug;

use super::truncate;

fn load(file: &Path) -> Result<Vec<Transaction>> {
    let transactions = load_transactions(file)
        .with_context(|| format!("Failed to load transactions from {}", file.display()))?;
    debug!(count = transactions.len(), path = %file.display(), "Loaded transactions");
    Ok(transactions)
}

fn engine(currency: &str) -> PatternEngine {
    PatternEngine::new().with_currency(currency)
}

fn impact_icon(impact: Impact) -> &'static str {
    match impact {
        Impact::Critical => "🚨",
        Impact::High => "🔴",
        Impact::Medium => "🟡",
        Impact::Low => "🟢",
    }
}

pub fn cmd_analyze(
    file: &Path,
    timeframe: Timeframe,
    query: &PatternQuery,
    currency: &str,
    json: bool,
) -> Result<()> {
    let transactions = load(file)?;

    let patterns = engine(currency)
        .analyze_ranked(&transactions, timeframe, query)
        .context("Pattern analysis failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&patterns)?);
    } else {
        print!("{}", render_patterns(&patterns, query));
    }

    Ok(())
}

pub fn cmd_summary(file: &Path, timeframe: Timeframe, currency: &str, json: bool) -> Result<()> {
    let transactions = load(file)?;

    let patterns = engine(currency)
        .analyze(&transactions, timeframe)
        .context("Pattern analysis failed")?;
    let summary = PatternSummary::from_patterns(&patterns);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_summary(&summary));
    }

    Ok(())
}

pub fn cmd_detail(
    file: &Path,
    timeframe: Timeframe,
    pattern_id: &str,
    currency: &str,
    json: bool,
) -> Result<()> {
    let transactions = load(file)?;

    let detail = engine(currency)
        .detail(&transactions, timeframe, pattern_id)
        .with_context(|| format!("No pattern {} in {}", pattern_id, file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        print!("{}", render_detail(&detail));
    }

    Ok(())
}

/// Table view of ranked patterns
pub fn render_patterns(patterns: &[Pattern], query: &PatternQuery) -> String {
    let mut out = String::new();

    if patterns.is_empty() {
        let _ = writeln!(out, "✅ No notable spending patterns found.");
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "🔍 Spending Patterns ({} found, type: {}, sorted by {})",
        patterns.len(),
        query.filter,
        query.sort
    );
    let _ = writeln!(
        out,
        "   ─────────────────────────────────────────────────────────────"
    );

    for p in patterns {
        let _ = writeln!(
            out,
            "   {} {:8} │ {:10} │ {:>3.0}% │ {}",
            impact_icon(p.impact),
            p.impact.as_str(),
            p.pattern_type.as_str(),
            p.confidence * 100.0,
            truncate(&p.title, 48)
        );
        let _ = writeln!(out, "      {}", p.description);
        if let Some(first) = p.recommendations.first() {
            let _ = writeln!(out, "      → {}", first);
        }
    }

    out
}

pub fn render_summary(summary: &PatternSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "📊 Pattern Summary");
    let _ = writeln!(out, "   ─────────────────────────────");
    let _ = writeln!(out, "   Total patterns:   {}", summary.total);
    let _ = writeln!(
        out,
        "   By impact:        🚨 {} critical, 🔴 {} high, 🟡 {} medium, 🟢 {} low",
        summary.by_impact.critical,
        summary.by_impact.high,
        summary.by_impact.medium,
        summary.by_impact.low
    );
    let _ = writeln!(
        out,
        "   By type:          {} trend, {} recurring, {} anomaly, {} behavioral",
        summary.by_type.trend,
        summary.by_type.recurring,
        summary.by_type.anomaly,
        summary.by_type.behavioral
    );
    let _ = writeln!(out, "   High confidence:  {}", summary.high_confidence);
    let _ = writeln!(
        out,
        "   Trends:           📈 {} increasing, 📉 {} decreasing",
        summary.increasing_trends, summary.decreasing_trends
    );
    out
}

pub fn render_detail(detail: &PatternDetail) -> String {
    let p = &detail.pattern;
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "{} {}", impact_icon(p.impact), p.title);
    let _ = writeln!(out, "   {}", p.description);
    let _ = writeln!(
        out,
        "   id: {}  │  impact: {}  │  confidence: {:.0}%  │  timeframe: {}",
        p.id,
        p.impact,
        p.confidence * 100.0,
        p.timeframe
    );

    if !p.insights.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "   Insights");
        for insight in &p.insights {
            let _ = writeln!(out, "   • {}", insight);
        }
    }

    if !p.recommendations.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "   Recommendations");
        for rec in &p.recommendations {
            let _ = writeln!(out, "   → {}", rec);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "   Chart ({})", detail.series.visualization_type);
    let max = detail
        .series
        .points
        .iter()
        .map(|pt| pt.value)
        .fold(0.0_f64, f64::max);
    for point in &detail.series.points {
        let width = if max > 0.0 {
            (point.value / max * 30.0).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "   {:>10} │{:<30}│ {:.2}{}",
            truncate(&point.label, 10),
            "█".repeat(width),
            point.value,
            if point.highlighted { " ◀" } else { "" }
        );
    }

    out
}

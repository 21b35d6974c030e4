//! Domain models for Spendscope

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A categorized transaction supplied by the transaction source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Spent amount, always non-negative
    pub amount: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Flagged upstream as part of a regular, repeating charge
    #[serde(default)]
    pub is_recurring: bool,
    /// Categorization confidence in [0, 1]; carried through, never scored
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    1.0
}

impl Transaction {
    /// Create a transaction with the required fields; optional fields start empty
    pub fn new(
        id: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            category: category.into(),
            subcategory: None,
            description: description.into(),
            date,
            merchant: None,
            location: None,
            tags: BTreeSet::new(),
            is_recurring: false,
            confidence: default_confidence(),
        }
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    pub fn with_recurring(mut self, is_recurring: bool) -> Self {
        self.is_recurring = is_recurring;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Check the record against the ingestion contract
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::invalid_transaction(&self.id, "id must not be empty"));
        }
        if !self.amount.is_finite() {
            return Err(Error::invalid_transaction(&self.id, "amount must be finite"));
        }
        if self.amount < 0.0 {
            return Err(Error::invalid_transaction(
                &self.id,
                format!("amount must be non-negative, got {}", self.amount),
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(Error::invalid_transaction(
                &self.id,
                format!("confidence must be within [0, 1], got {}", self.confidence),
            ));
        }
        Ok(())
    }
}

/// Validate a whole batch, including id uniqueness
pub fn validate_transactions(transactions: &[Transaction]) -> Result<()> {
    let mut seen = HashSet::with_capacity(transactions.len());
    for tx in transactions {
        tx.validate()?;
        if !seen.insert(tx.id.as_str()) {
            return Err(Error::invalid_transaction(&tx.id, "duplicate transaction id"));
        }
    }
    Ok(())
}

/// Caller-selected analysis window, echoed into every pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

impl std::str::FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            _ => Err(format!("Unknown timeframe: {}", s)),
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tx(id: &str, amount: f64) -> Transaction {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Transaction::new(id, amount, "Groceries", "MARKET", date)
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let err = tx("t1", -5.0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidTransaction { .. }));
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_validate_rejects_bad_confidence() {
        let mut t = tx("t1", 5.0);
        t.confidence = 1.5;
        assert!(t.validate().is_err());
        t.confidence = 0.0;
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nan_and_empty_id() {
        assert!(tx("t1", f64::NAN).validate().is_err());
        assert!(tx("  ", 1.0).validate().is_err());
    }

    #[test]
    fn test_validate_transactions_duplicate_ids() {
        let batch = vec![tx("a", 1.0), tx("b", 2.0), tx("a", 3.0)];
        let err = validate_transactions(&batch).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
        assert!(validate_transactions(&batch[..2]).is_ok());
    }

    #[test]
    fn test_transaction_json_uses_camel_case() {
        let t = tx("t1", 12.5).with_recurring(true).with_merchant("ACME");
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["isRecurring"], true);
        assert_eq!(json["merchant"], "ACME");
        assert!(json.get("subcategory").is_none());

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_with_tag_deduplicates() {
        let t = tx("t1", 4.0)
            .with_tag("weekly")
            .with_tag("essentials")
            .with_tag("weekly");
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["tags"], serde_json::json!(["essentials", "weekly"]));
    }

    #[test]
    fn test_transaction_json_defaults() {
        let t: Transaction = serde_json::from_str(
            r#"{"id":"x","amount":3.0,"category":"Bills","date":"2024-01-02T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(!t.is_recurring);
        assert_eq!(t.confidence, 1.0);
        assert!(t.tags.is_empty());
        assert_eq!(t.description, "");
    }

    #[test]
    fn test_timeframe_parse() {
        assert_eq!("Quarter".parse::<Timeframe>().unwrap(), Timeframe::Quarter);
        assert_eq!(Timeframe::default(), Timeframe::Month);
        assert!("decade".parse::<Timeframe>().is_err());
    }
}

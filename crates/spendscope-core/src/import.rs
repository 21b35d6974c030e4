//! Transaction import from CSV and JSON files
//!
//! This is the ingestion boundary: everything returned from here has passed
//! [`validate_transactions`], so the engine never sees malformed records.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{validate_transactions, Transaction};

/// Supported transaction file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Json,
}

impl ImportFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Load and validate transactions from a `.csv` or `.json` file
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let format = ImportFormat::from_path(path).ok_or_else(|| {
        Error::Import(format!(
            "Unsupported file type: {} (expected .csv or .json)",
            path.display()
        ))
    })?;
    let file = File::open(path)?;

    let transactions = match format {
        ImportFormat::Csv => parse_csv(file)?,
        ImportFormat::Json => parse_json(file)?,
    };

    info!(
        path = %path.display(),
        count = transactions.len(),
        "Loaded transactions"
    );
    Ok(transactions)
}

/// Parse a JSON array of transactions
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let transactions: Vec<Transaction> = serde_json::from_reader(reader)?;
    validate_transactions(&transactions)?;
    Ok(transactions)
}

/// Column positions resolved from the header row
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn new(headers: &StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase().replace([' ', '_'], ""), i))
            .collect();
        Self { index }
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::Import(format!("Missing required column: {}", name)))
    }

    /// Non-empty value of an optional column
    fn get<'r>(&self, record: &'r StringRecord, names: &[&str]) -> Option<&'r str> {
        names
            .iter()
            .find_map(|name| self.index.get(*name))
            .and_then(|&i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Parse the neutral transaction CSV format
///
/// Required columns: `date`, `amount`, `category`. Optional: `id`,
/// `description`, `subcategory`, `merchant`, `location`, `tags`
/// (`;`-separated), `recurring`, `confidence`. Negative amounts are taken as
/// expenses exported with a sign and imported as their absolute value.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::new(rdr.headers()?);
    let date_col = columns.require("date")?;
    let amount_col = columns.require("amount")?;
    let category_col = columns.require("category")?;

    let mut transactions = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        let line = row + 2;

        let date_str = record
            .get(date_col)
            .ok_or_else(|| Error::Import(format!("Missing date on line {}", line)))?;
        let date = parse_date(date_str)?;

        let amount_str = record
            .get(amount_col)
            .ok_or_else(|| Error::Import(format!("Missing amount on line {}", line)))?;
        let amount = parse_amount(amount_str)?.abs();

        let category = record
            .get(category_col)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Import(format!("Missing category on line {}", line)))?
            .to_string();

        let description = columns
            .get(&record, &["description"])
            .unwrap_or_default()
            .to_string();

        let id = match columns.get(&record, &["id"]) {
            Some(id) => id.to_string(),
            None => generate_id(&date, &description, amount, row),
        };

        let recurring = match columns.get(&record, &["recurring", "isrecurring"]) {
            Some(value) => parse_bool(value)?,
            None => false,
        };

        let confidence = match columns.get(&record, &["confidence"]) {
            Some(value) => value
                .parse::<f64>()
                .map_err(|_| Error::Import(format!("Unable to parse confidence: {}", value)))?,
            None => 1.0,
        };

        let mut tx = Transaction::new(id, amount, category, description, date)
            .with_recurring(recurring);
        tx.subcategory = columns.get(&record, &["subcategory"]).map(String::from);
        tx.merchant = columns.get(&record, &["merchant"]).map(String::from);
        tx.location = columns.get(&record, &["location"]).map(String::from);
        tx.confidence = confidence;
        if let Some(tags) = columns.get(&record, &["tags"]) {
            for tag in tags.split(';').map(str::trim).filter(|t| !t.is_empty()) {
                tx = tx.with_tag(tag);
            }
        }

        transactions.push(tx);
    }

    debug!(count = transactions.len(), "Parsed transaction CSV");
    validate_transactions(&transactions)?;
    Ok(transactions)
}

/// Stable id for a row without one
fn generate_id(date: &DateTime<Utc>, description: &str, amount: f64, row: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_rfc3339().as_bytes());
    hasher.update(description.as_bytes());
    hasher.update(amount.to_be_bytes());
    // Row position separates identical purchases on the same day
    hasher.update((row as u64).to_be_bytes());
    let hash = hex::encode(hasher.finalize());
    hash[..16].to_string()
}

/// Parse a timestamp; bare dates are taken as midnight UTC
fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.and_utc());
        }
    }

    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%Y", // 01/15/2024
        "%d.%m.%Y", // 15.01.2024
    ];
    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc());
            }
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', '฿', '€', '£', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    let amount = cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))?;
    if !amount.is_finite() {
        return Err(Error::Import(format!("Amount is not a number: {}", s)));
    }
    Ok(amount)
}

fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(Error::Import(format!("Unable to parse flag: {}", s))),
    }
}

//! Category grouping
//!
//! Partitions a transaction batch by category key. The key ignores case,
//! surrounding whitespace, and the difference between spaces and underscores,
//! so "Food", " food" and "FOOD" land in one group. Groups come back in
//! ascending key order and members in canonical order (date, amount, id),
//! so every detector result depends only on the multiset of transactions and
//! never on the order the caller happened to supply them in.

use std::collections::BTreeMap;

use crate::models::Transaction;

/// All transactions of one category, borrowed from the caller's batch
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    /// Display name: the smallest trimmed spelling among the members
    pub category: &'a str,
    /// Normalized grouping key, see [`category_key`]
    pub key: String,
    pub transactions: Vec<&'a Transaction>,
}

impl<'a> CategoryGroup<'a> {
    /// Build a group, putting members into canonical order
    pub fn new(category: &'a str, mut transactions: Vec<&'a Transaction>) -> Self {
        transactions.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.amount.total_cmp(&b.amount))
                .then_with(|| a.id.cmp(&b.id))
        });
        Self {
            category,
            key: category_key(category),
            transactions,
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of all amounts in the category
    pub fn total(&self) -> f64 {
        self.transactions.iter().map(|t| t.amount).sum()
    }

    /// Mean amount, or 0 for an empty group
    pub fn mean(&self) -> f64 {
        if self.transactions.is_empty() {
            return 0.0;
        }
        self.total() / self.transactions.len() as f64
    }

    pub fn amounts(&self) -> Vec<f64> {
        self.transactions.iter().map(|t| t.amount).collect()
    }
}

/// Normalized category key: lowercase words joined by single spaces
///
/// Whitespace runs and underscores both count as word separators, so the key
/// never contains `_` and maps one-to-one onto the slug used in pattern ids.
pub fn category_key(category: &str) -> String {
    category
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Partition transactions by category key without dropping any
pub fn group_by_category(transactions: &[Transaction]) -> Vec<CategoryGroup<'_>> {
    let mut groups: BTreeMap<String, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions {
        groups.entry(category_key(&tx.category)).or_default().push(tx);
    }

    groups
        .into_values()
        .filter_map(|members| {
            let category = members.iter().map(|&t| t.category.trim()).min()?;
            Some(CategoryGroup::new(category, members))
        })
        .collect()
}

/// Arithmetic mean of a slice, 0 when empty
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

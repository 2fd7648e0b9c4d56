//! Query engine: pure functions over the immutable joined base.
//!
//! Both operations take the base by reference and return freshly built
//! structures; nothing here mutates shared state, so calls are reentrant
//! and may be repeated with different parameters at will.

use crate::{join::JoinedCustomer, types::CustomerId};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// The amount predicate, parsed once from raw query text.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountQuery {
    /// Empty input: every transaction passes.
    Any,
    /// Numeric input, compared loosely ("50" equals 50).
    Equals(f64),
    /// Non-numeric, non-empty input matches nothing.
    Unsatisfiable,
}

impl AmountQuery {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return AmountQuery::Any;
        }
        match trimmed.parse::<f64>() {
            Ok(v) => AmountQuery::Equals(v),
            Err(_) => AmountQuery::Unsatisfiable,
        }
    }

    fn matches(&self, amount: f64) -> bool {
        match self {
            AmountQuery::Any => true,
            AmountQuery::Equals(v) => amount == *v,
            AmountQuery::Unsatisfiable => false,
        }
    }
}

/// Filter the joined base by customer name and transaction amount.
///
/// The name predicate is a case-folded substring match against the
/// customer, but it decides which transaction rows survive: a customer
/// whose name misses contributes zero rows. The customer entity itself is
/// always retained, its transaction list just comes back empty. With both
/// queries empty the result reproduces `base` element for element.
pub fn filter(base: &[JoinedCustomer], name_query: &str, amount_query: &str) -> Vec<JoinedCustomer> {
    let needle = name_query.to_lowercase();
    let amount = AmountQuery::parse(amount_query);

    base.iter()
        .map(|jc| {
            let name_hit = jc.customer.name.to_lowercase().contains(&needle);
            let transactions = if name_hit {
                jc.transactions
                    .iter()
                    .filter(|t| amount.matches(t.amount))
                    .cloned()
                    .collect()
            } else {
                Vec::new()
            };
            JoinedCustomer {
                customer: jc.customer.clone(),
                transactions,
            }
        })
        .collect()
}

/// One calendar day's transaction total for the selected customer.
/// Sparse: days with no transactions get no entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAggregate {
    pub day: NaiveDate,
    pub total: f64,
}

impl DailyAggregate {
    /// Date-only display label, no time component.
    pub fn label(&self) -> String {
        self.day.format("%m/%d/%Y").to_string()
    }
}

/// Bucket one customer's transactions by calendar day and sum amounts
/// per bucket. A missing customer yields an empty vec, not an error.
///
/// Output is chronologically sorted. Transactions whose date cannot be
/// parsed are skipped with a warning rather than lumped into a garbage
/// bucket.
pub fn aggregate_by_day(base: &[JoinedCustomer], customer_id: CustomerId) -> Vec<DailyAggregate> {
    let Some(jc) = base.iter().find(|jc| jc.customer.id == customer_id) else {
        return Vec::new();
    };

    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for txn in &jc.transactions {
        match parse_day(&txn.date) {
            Some(day) => *totals.entry(day).or_insert(0.0) += txn.amount,
            None => log::warn!(
                "aggregate: unparseable date {:?} on transaction {}, skipping",
                txn.date,
                txn.id
            ),
        }
    }

    totals
        .into_iter()
        .map(|(day, total)| DailyAggregate { day, total })
        .collect()
}

/// Normalize a source date string to a calendar day. Accepts plain dates,
/// RFC 3339 timestamps, and bare datetime strings; timestamps on the same
/// day bucket together.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Some(d);
    }
    None
}

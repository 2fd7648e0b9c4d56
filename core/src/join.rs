//! Joiner: the canonical joined view, each customer annotated with its
//! own transactions.

use crate::{
    model::{Customer, Transaction},
    types::CustomerId,
};
use serde::Serialize;
use std::collections::HashMap;

/// A customer plus the transactions whose `customer_id` equals its `id`.
/// Each transaction appears under at most one customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedCustomer {
    #[serde(flatten)]
    pub customer: Customer,
    pub transactions: Vec<Transaction>,
}

/// Join the two collections by foreign key, preserving customer order and
/// per-customer transaction order from the inputs.
///
/// Transactions are hash-grouped by `customer_id` in one pass so the join
/// stays linear in the input sizes. A transaction matching no customer is
/// dropped silently; that is intentional source behavior, not an error.
pub fn join(customers: Vec<Customer>, transactions: Vec<Transaction>) -> Vec<JoinedCustomer> {
    let mut by_customer: HashMap<CustomerId, Vec<Transaction>> = HashMap::new();
    for txn in transactions {
        by_customer.entry(txn.customer_id).or_default().push(txn);
    }

    let mut joined = Vec::with_capacity(customers.len());
    for customer in customers {
        let transactions = by_customer.remove(&customer.id).unwrap_or_default();
        joined.push(JoinedCustomer {
            customer,
            transactions,
        });
    }

    let orphaned: usize = by_customer.values().map(Vec::len).sum();
    if orphaned > 0 {
        log::debug!("join: dropped {orphaned} transactions with no matching customer");
    }

    joined
}

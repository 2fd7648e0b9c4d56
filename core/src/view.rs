//! View state: the small container a presentation shell owns.
//!
//! Search text, selection, and the derived views live here as explicit
//! state instead of implicit module-level variables. Derived views are
//! recomputed whole on every effective input change and never patched
//! incrementally. A setter whose value did not actually change is a
//! no-op, so rapid repeated input does not trigger recomputation storms.

use crate::{
    join::{join, JoinedCustomer},
    query::{aggregate_by_day, filter, DailyAggregate},
    source::Snapshot,
    types::CustomerId,
};

#[derive(Debug, Default)]
pub struct ViewState {
    base: Vec<JoinedCustomer>,
    name_query: String,
    amount_query: String,
    selected: Option<CustomerId>,
    filtered: Vec<JoinedCustomer>,
    daily: Vec<DailyAggregate>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the base with a freshly fetched snapshot. The base is only
    /// ever swapped in whole; on a failed fetch the caller simply does not
    /// call this, and the previous snapshot stays installed.
    pub fn install_snapshot(&mut self, snapshot: Snapshot) {
        self.base = join(snapshot.customers, snapshot.transactions);
        self.recompute();
    }

    pub fn set_name_query(&mut self, query: &str) {
        if query == self.name_query {
            return;
        }
        self.name_query = query.to_string();
        self.recompute();
    }

    pub fn set_amount_query(&mut self, query: &str) {
        if query == self.amount_query {
            return;
        }
        self.amount_query = query.to_string();
        self.recompute();
    }

    pub fn select_customer(&mut self, customer_id: Option<CustomerId>) {
        if customer_id == self.selected {
            return;
        }
        self.selected = customer_id;
        // Selection only affects the aggregation, not the listing.
        self.recompute_daily();
    }

    /// The unfiltered joined snapshot.
    pub fn base(&self) -> &[JoinedCustomer] {
        &self.base
    }

    /// The listing under the current predicates.
    pub fn filtered(&self) -> &[JoinedCustomer] {
        &self.filtered
    }

    /// Per-day totals for the selected customer, computed over the
    /// filtered subset so it always reflects live predicate state.
    pub fn daily(&self) -> &[DailyAggregate] {
        &self.daily
    }

    pub fn selected(&self) -> Option<CustomerId> {
        self.selected
    }

    fn recompute(&mut self) {
        self.filtered = filter(&self.base, &self.name_query, &self.amount_query);
        self.recompute_daily();
    }

    fn recompute_daily(&mut self) {
        self.daily = match self.selected {
            Some(id) => aggregate_by_day(&self.filtered, id),
            None => Vec::new(),
        };
    }
}

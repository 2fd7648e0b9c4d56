//! txnview-core: fetch, join, filter, and aggregate customer transactions.
//!
//! Data flows strictly source -> join -> query. A [`source::Snapshot`] is
//! fetched atomically from two HTTP endpoints, joined once into
//! [`join::JoinedCustomer`] records, and every predicate change re-derives
//! views from that immutable base via the pure functions in [`query`].
//! [`view::ViewState`] is the state container a presentation shell drives.

pub mod config;
pub mod error;
pub mod join;
pub mod model;
pub mod query;
pub mod source;
pub mod types;
pub mod view;

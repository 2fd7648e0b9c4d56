//! Shared primitive types used across the pipeline.

/// Canonical numeric customer identifier. The source may deliver ids as
/// JSON numbers or numeric strings; both decode to this one type.
pub type CustomerId = i64;

/// Canonical numeric transaction identifier.
pub type TransactionId = i64;

//! Wire data model for the two source collections.
//!
//! The source is permissive about numeric representation: an id or amount
//! may arrive as a JSON number or as a numeric string, on either side of
//! the customer/transaction relationship. Normalization happens once,
//! here, at deserialization time, so the join and query layers only ever
//! compare canonical numeric values. A record whose id or amount is not
//! numeric at all fails the deserialize, which rejects the whole payload
//! at the fetch boundary.

use crate::types::{CustomerId, TransactionId};
use serde::{de, Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(deserialize_with = "de_loose_id")]
    pub id: CustomerId,
    pub name: String,
    /// Opaque source fields, preserved through the pipeline untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "de_loose_id")]
    pub id: TransactionId,
    #[serde(deserialize_with = "de_loose_id")]
    pub customer_id: CustomerId,
    /// Raw date string as delivered by the source. Parsed into a calendar
    /// day only at aggregation time.
    pub date: String,
    #[serde(deserialize_with = "de_loose_amount")]
    pub amount: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

fn de_loose_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawNumber::deserialize(deserializer)? {
        RawNumber::Int(v) => Ok(v),
        RawNumber::Float(v) if v.fract() == 0.0 => Ok(v as i64),
        RawNumber::Float(v) => Err(de::Error::custom(format!(
            "id must be an integer, got {v}"
        ))),
        RawNumber::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("non-numeric id: {s:?}"))),
    }
}

fn de_loose_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawNumber::deserialize(deserializer)? {
        RawNumber::Int(v) => Ok(v as f64),
        RawNumber::Float(v) => Ok(v),
        RawNumber::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("non-numeric amount: {s:?}"))),
    }
}

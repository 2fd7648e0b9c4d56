//! Fetcher: retrieves the two raw collections as a single atomic snapshot.
//!
//! The two GETs are issued concurrently and awaited jointly. If either
//! request fails (transport error, non-2xx status, undecodable body) the
//! whole fetch fails and no partial snapshot is ever constructed; the
//! caller keeps whatever snapshot it already had. Retry and backoff, if
//! wanted, belong to the caller.

use crate::{
    config::SourceConfig,
    error::{ViewError, ViewResult},
    model::{Customer, Transaction},
};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// One complete, atomically fetched pair of collections.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub customers: Vec<Customer>,
    pub transactions: Vec<Transaction>,
}

pub struct SourceClient {
    http: reqwest::Client,
    config: SourceConfig,
}

impl SourceClient {
    pub fn new(config: SourceConfig) -> ViewResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    /// Fetch both collections concurrently; resolves only once both
    /// succeed.
    pub async fn fetch_snapshot(&self) -> ViewResult<Snapshot> {
        let (customers, transactions) = tokio::try_join!(
            self.fetch_list::<Customer>(&self.config.customers_url),
            self.fetch_list::<Transaction>(&self.config.transactions_url),
        )?;

        log::debug!(
            "snapshot fetched: {} customers, {} transactions",
            customers.len(),
            transactions.len()
        );

        Ok(Snapshot {
            customers,
            transactions,
        })
    }

    async fn fetch_list<T: DeserializeOwned>(&self, url: &str) -> ViewResult<Vec<T>> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ViewError::SourceStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| ViewError::MalformedPayload {
            url: url.to_string(),
            source,
        })
    }
}

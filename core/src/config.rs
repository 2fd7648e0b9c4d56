use serde::{Deserialize, Serialize};

/// Where the two source collections live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub customers_url: String,
    pub transactions_url: String,
    /// Optional per-request deadline. When unset, a hung request blocks
    /// that snapshot refresh indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl SourceConfig {
    /// Load from a JSON config file.
    /// In tests, use SourceConfig::default_test() or from_base_url().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Both endpoints under one base URL, the usual deployment shape.
    pub fn from_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            customers_url: format!("{base}/customers"),
            transactions_url: format!("{base}/transactions"),
            request_timeout_secs: None,
        }
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self::from_base_url("http://localhost:3000")
    }
}

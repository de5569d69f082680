//! Provides currency conversion and exchange rates for the application.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;

/// Exchange rates keyed by currency code, relative to the provider's base
/// currency. An empty table means rates are unavailable.
pub type RateTable = HashMap<String, f64>;

/// Why a provider call failed. The variants let callers report what went
/// wrong while falling back to a safe value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    Status(u16),
    Transport(String),
    Decode(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Status(code) => write!(f, "HTTP error: {code}"),
            ProviderError::Transport(msg) => write!(f, "Request error: {msg}"),
            ProviderError::Decode(msg) => write!(f, "Failed to parse response: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Decode(err.to_string())
    }
}

#[async_trait]
pub trait CurrencyProvider: Send + Sync {
    async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, ProviderError>;
    async fn rates(&self) -> Result<RateTable, ProviderError>;
}

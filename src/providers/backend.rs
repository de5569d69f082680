//! REST client for the local finance backend.
//!
//! One request per call: no caching, no retries. Failure handling is the
//! caller's concern; the currency module wraps these results in its
//! fail-safe layer.

use crate::currency_provider::{CurrencyProvider, ProviderError, RateTable};
use crate::transaction_provider::TransactionProvider;
use crate::transactions::Transaction;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const USER_AGENT: &str = "fintrack/1.0";

pub struct BackendProvider {
    base_url: String,
}

impl BackendProvider {
    pub fn new(base_url: &str) -> Self {
        BackendProvider {
            base_url: base_url.to_string(),
        }
    }

    fn client(&self) -> Result<reqwest::Client, ProviderError> {
        Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
    }
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    #[serde(rename = "convertedAmount")]
    converted_amount: f64,
}

#[async_trait]
impl CurrencyProvider for BackendProvider {
    async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, ProviderError> {
        let url = format!("{}/api/currency/convert", self.base_url);
        debug!("Requesting conversion from {url}");

        let response = self
            .client()?
            .get(&url)
            .query(&[
                ("amount", amount.to_string().as_str()),
                ("from", from),
                ("to", to),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let text = response.text().await?;
        let decoded: ConvertResponse = serde_json::from_str(&text)?;
        Ok(decoded.converted_amount)
    }

    async fn rates(&self) -> Result<RateTable, ProviderError> {
        let url = format!("{}/api/currency/rates", self.base_url);
        debug!("Requesting exchange rates from {url}");

        let response = self.client()?.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl TransactionProvider for BackendProvider {
    async fn fetch_for_user(&self, user_id: u64) -> Result<Vec<Transaction>, ProviderError> {
        let url = format!("{}/api/transactions/user/{user_id}", self.base_url);
        debug!("Requesting transactions from {url}");

        let response = self.client()?.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn delete(&self, id: i64) -> Result<(), ProviderError> {
        let url = format!("{}/api/transactions/{id}", self.base_url);
        debug!("Deleting transaction via {url}");

        let response = self.client()?.delete(&url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        Ok(())
    }
}

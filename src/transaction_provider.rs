//! Remote transaction retrieval for the application.

use crate::currency_provider::ProviderError;
use crate::transactions::Transaction;
use async_trait::async_trait;

#[async_trait]
pub trait TransactionProvider: Send + Sync {
    async fn fetch_for_user(&self, user_id: u64) -> Result<Vec<Transaction>, ProviderError>;
    async fn delete(&self, id: i64) -> Result<(), ProviderError>;
}

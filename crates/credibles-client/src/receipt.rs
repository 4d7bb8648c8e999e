//! Transaction receipts and where they come from

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReceiptStatus {
    Success,
    Failed,
}

/// A contract event as reported in a receipt. `topics[0]` is the event name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractEvent {
    pub contract_id: String,
    pub topics: Vec<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl ContractEvent {
    pub fn name(&self) -> Option<&str> {
        self.topics.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub hash: String,
    pub status: ReceiptStatus,
    /// Contract the transaction invoked.
    pub contract_id: String,
    pub ledger: u32,
    #[serde(default)]
    pub events: Vec<ContractEvent>,
}

/// Read-only view of settled transactions.
///
/// `Ok(None)` means the ledger does not know the hash yet.
#[async_trait]
pub trait ReceiptSource: Send + Sync {
    async fn receipt(&self, tx_hash: &str) -> Result<Option<TransactionReceipt>, ClientError>;
}

/// In-process receipt source for tests and local tooling.
#[derive(Debug, Default)]
pub struct MemoryReceipts {
    receipts: RwLock<HashMap<String, TransactionReceipt>>,
}

impl MemoryReceipts {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, receipt: TransactionReceipt) {
        self.receipts
            .write()
            .await
            .insert(receipt.hash.clone(), receipt);
    }
}

#[async_trait]
impl ReceiptSource for MemoryReceipts {
    async fn receipt(&self, tx_hash: &str) -> Result<Option<TransactionReceipt>, ClientError> {
        Ok(self.receipts.read().await.get(tx_hash).cloned())
    }
}

#[async_trait]
impl<S: ReceiptSource + ?Sized> ReceiptSource for std::sync::Arc<S> {
    async fn receipt(&self, tx_hash: &str) -> Result<Option<TransactionReceipt>, ClientError> {
        (**self).receipt(tx_hash).await
    }
}

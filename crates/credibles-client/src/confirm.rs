//! Waiting for submitted transactions to settle

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ClientError;
use crate::receipt::{ReceiptSource, ReceiptStatus, TransactionReceipt};

/// Where a submitted transaction stands.
///
/// `Pending` is recoverable: keep querying the same hash. Resubmitting a
/// pending transaction risks paying twice.
#[derive(Debug, Clone, PartialEq)]
pub enum TxStatus {
    Pending,
    Confirmed(TransactionReceipt),
    Rejected(TransactionReceipt),
}

impl TxStatus {
    pub fn is_settled(&self) -> bool {
        !matches!(self, TxStatus::Pending)
    }
}

/// How long to wait for a transaction to settle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollPolicy {
    /// Receipt queries before giving up
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Pause between queries in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            interval_ms: default_interval_ms(),
        }
    }
}

impl PollPolicy {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn default_attempts() -> u32 { 30 }
fn default_interval_ms() -> u64 { 1_000 }

pub async fn status<S: ReceiptSource + ?Sized>(source: &S, tx_hash: &str) -> Result<TxStatus, ClientError> {
    Ok(match source.receipt(tx_hash).await? {
        None => TxStatus::Pending,
        Some(receipt) if receipt.status == ReceiptStatus::Success => TxStatus::Confirmed(receipt),
        Some(receipt) => TxStatus::Rejected(receipt),
    })
}

/// Polls `tx_hash` until it is confirmed or rejected.
///
/// Never resubmits. On [`ClientError::ConfirmationTimeout`] the caller may
/// call this again with the same hash.
pub async fn wait_for_confirmation<S: ReceiptSource + ?Sized>(
    source: &S,
    tx_hash: &str,
    policy: &PollPolicy,
) -> Result<TxStatus, ClientError> {
    for attempt in 1..=policy.attempts {
        let current = status(source, tx_hash).await?;
        if current.is_settled() {
            info!(tx_hash, attempt, confirmed = matches!(current, TxStatus::Confirmed(_)), "transaction settled");
            return Ok(current);
        }

        debug!(tx_hash, attempt, "transaction pending");
        if attempt < policy.attempts {
            tokio::time::sleep(policy.interval()).await;
        }
    }

    Err(ClientError::ConfirmationTimeout {
        hash: tx_hash.to_string(),
        attempts: policy.attempts,
    })
}

//! Payment proof verification
//!
//! A payment is proven by the receipt of a successful `pay_for_access` call on
//! the expected gateway contract carrying a `payment_accepted` event that
//! names the beneficiary. Anything else is rejected. Checks only read
//! receipts, so they can be repeated for the same hash.

use futures::future::join_all;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::receipt::{ReceiptSource, ReceiptStatus, TransactionReceipt};

/// Topic name of the gateway's payment event.
pub const PAYMENT_ACCEPTED: &str = "payment_accepted";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentInvalid {
    #[error("transaction {0} is not on the ledger yet")]
    Pending(String),
    #[error("transaction {0} failed")]
    Failed(String),
    #[error("transaction went to {actual}, expected {expected}")]
    WrongDestination { expected: String, actual: String },
    #[error("no payment_accepted event for {0}")]
    NoMatchingEvent(String),
    #[error("could not read receipt: {0}")]
    Source(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedPayment {
    pub tx_hash: String,
    pub payer: String,
    pub beneficiary: String,
    pub ledger: u32,
}

fn matching_payer(receipt: &TransactionReceipt, contract: &str, beneficiary: &str) -> Option<String> {
    receipt
        .events
        .iter()
        .filter(|event| event.contract_id == contract && event.name() == Some(PAYMENT_ACCEPTED))
        .find(|event| event.topics.get(2).map(String::as_str) == Some(beneficiary))
        .and_then(|event| event.topics.get(1).cloned())
}

/// Checks `tx_hash` and explains why it does not prove a payment.
pub async fn check_payment<S: ReceiptSource + ?Sized>(
    source: &S,
    tx_hash: &str,
    expected_contract: &str,
    beneficiary: &str,
) -> Result<VerifiedPayment, PaymentInvalid> {
    let receipt = source
        .receipt(tx_hash)
        .await
        .map_err(|e| PaymentInvalid::Source(e.to_string()))?
        .ok_or_else(|| PaymentInvalid::Pending(tx_hash.to_string()))?;

    if receipt.status != ReceiptStatus::Success {
        return Err(PaymentInvalid::Failed(tx_hash.to_string()));
    }

    if receipt.contract_id != expected_contract {
        return Err(PaymentInvalid::WrongDestination {
            expected: expected_contract.to_string(),
            actual: receipt.contract_id,
        });
    }

    let payer = matching_payer(&receipt, expected_contract, beneficiary)
        .ok_or_else(|| PaymentInvalid::NoMatchingEvent(beneficiary.to_string()))?;

    debug!(tx_hash, payer = %payer, beneficiary, "payment verified");
    Ok(VerifiedPayment {
        tx_hash: tx_hash.to_string(),
        payer,
        beneficiary: beneficiary.to_string(),
        ledger: receipt.ledger,
    })
}

/// `true` only when `tx_hash` proves a payment to `beneficiary`.
pub async fn verify_payment<S: ReceiptSource + ?Sized>(
    source: &S,
    tx_hash: &str,
    expected_contract: &str,
    beneficiary: &str,
) -> bool {
    match check_payment(source, tx_hash, expected_contract, beneficiary).await {
        Ok(_) => true,
        Err(reason) => {
            warn!(tx_hash, beneficiary, %reason, "payment proof rejected");
            false
        }
    }
}

/// Verifies many `(tx_hash, beneficiary)` proofs concurrently. Results line up with `proofs`.
pub async fn verify_many<S: ReceiptSource + ?Sized>(
    source: &S,
    expected_contract: &str,
    proofs: &[(String, String)],
) -> Vec<bool> {
    join_all(
        proofs
            .iter()
            .map(|(hash, beneficiary)| verify_payment(source, hash, expected_contract, beneficiary)),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::{ContractEvent, MemoryReceipts};

    const GATEWAY: &str = "CGATEWAY";
    const TALENT: &str = "GTALENT";

    fn receipt(hash: &str, status: ReceiptStatus, contract: &str, beneficiary: &str) -> TransactionReceipt {
        TransactionReceipt {
            hash: hash.to_string(),
            status,
            contract_id: contract.to_string(),
            ledger: 7,
            events: vec![ContractEvent {
                contract_id: contract.to_string(),
                topics: vec![PAYMENT_ACCEPTED.to_string(), "GPAYER".to_string(), beneficiary.to_string()],
                data: serde_json::json!({ "amount": "100" }),
            }],
        }
    }

    async fn source() -> MemoryReceipts {
        let source = MemoryReceipts::new();
        source.insert(receipt("failed", ReceiptStatus::Failed, GATEWAY, TALENT)).await;
        source.insert(receipt("elsewhere", ReceiptStatus::Success, "COTHER", TALENT)).await;
        source.insert(receipt("good", ReceiptStatus::Success, GATEWAY, TALENT)).await;
        source.insert(receipt("other-talent", ReceiptStatus::Success, GATEWAY, "GSOMEONE")).await;
        source
    }

    #[tokio::test]
    async fn test_failed_wrong_contract_and_good() {
        let source = source().await;

        assert!(!verify_payment(&source, "failed", GATEWAY, TALENT).await);
        assert!(!verify_payment(&source, "elsewhere", GATEWAY, TALENT).await);
        assert!(verify_payment(&source, "good", GATEWAY, TALENT).await);
    }

    #[tokio::test]
    async fn test_rejection_reasons() {
        let source = source().await;

        assert_eq!(
            check_payment(&source, "failed", GATEWAY, TALENT).await,
            Err(PaymentInvalid::Failed("failed".to_string()))
        );
        assert_eq!(
            check_payment(&source, "elsewhere", GATEWAY, TALENT).await,
            Err(PaymentInvalid::WrongDestination {
                expected: GATEWAY.to_string(),
                actual: "COTHER".to_string(),
            })
        );
        assert_eq!(
            check_payment(&source, "other-talent", GATEWAY, TALENT).await,
            Err(PaymentInvalid::NoMatchingEvent(TALENT.to_string()))
        );
        assert_eq!(
            check_payment(&source, "unknown", GATEWAY, TALENT).await,
            Err(PaymentInvalid::Pending("unknown".to_string()))
        );
    }

    #[tokio::test]
    async fn test_event_from_another_contract_does_not_count() {
        let source = MemoryReceipts::new();
        let mut spoofed = receipt("spoof", ReceiptStatus::Success, GATEWAY, TALENT);
        spoofed.events[0].contract_id = "CFAKE".to_string();
        source.insert(spoofed).await;

        assert!(!verify_payment(&source, "spoof", GATEWAY, TALENT).await);
    }

    #[tokio::test]
    async fn test_verification_is_repeatable() {
        let source = source().await;

        let first = check_payment(&source, "good", GATEWAY, TALENT).await.unwrap();
        let second = check_payment(&source, "good", GATEWAY, TALENT).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.payer, "GPAYER");
        assert_eq!(first.ledger, 7);
    }

    #[tokio::test]
    async fn test_verify_many_keeps_order() {
        let source = source().await;
        let proofs = vec![
            ("good".to_string(), TALENT.to_string()),
            ("failed".to_string(), TALENT.to_string()),
            ("other-talent".to_string(), "GSOMEONE".to_string()),
        ];

        assert_eq!(verify_many(&source, GATEWAY, &proofs).await, vec![true, false, true]);
    }
}

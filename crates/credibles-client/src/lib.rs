//! Off-chain side of Credibles
//!
//! Verifies `payment_accepted` receipts from the payment gateway, gates
//! contact details behind HTTP 402, tracks submitted transactions until they
//! settle, and keeps the deployment record log.

pub mod config;
pub mod confirm;
pub mod deployments;
pub mod error;
pub mod gate;
pub mod receipt;
pub mod verify;

pub use config::GateConfig;
pub use confirm::{status, wait_for_confirmation, PollPolicy, TxStatus};
pub use deployments::{DeploymentLog, DeploymentRecord};
pub use error::ClientError;
pub use gate::{router, AccessDecision, AccessGate, ContactInfo, PAYMENT_HEADER};
pub use receipt::{ContractEvent, MemoryReceipts, ReceiptSource, ReceiptStatus, TransactionReceipt};
pub use verify::{check_payment, verify_many, verify_payment, PaymentInvalid, VerifiedPayment};

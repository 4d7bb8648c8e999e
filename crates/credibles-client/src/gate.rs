//! HTTP payment gate for talent contact details
//!
//! `GET /contact/{beneficiary}` without a proof answers 402 with the price.
//! With a transaction hash in the `x-payment-tx` header the receipt is
//! verified: 200 with the contact details, or 403.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::GateConfig;
use crate::receipt::ReceiptSource;
use crate::verify::{check_payment, PaymentInvalid, VerifiedPayment};

/// Header carrying the payment transaction hash.
pub const PAYMENT_HEADER: &str = "x-payment-tx";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    #[serde(default)]
    pub telegram: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    PaymentRequired,
    Granted(VerifiedPayment),
    Rejected(PaymentInvalid),
}

impl AccessDecision {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccessDecision::PaymentRequired => StatusCode::PAYMENT_REQUIRED,
            AccessDecision::Granted(_) => StatusCode::OK,
            AccessDecision::Rejected(_) => StatusCode::FORBIDDEN,
        }
    }
}

pub struct AccessGate<S> {
    config: GateConfig,
    source: S,
    contacts: HashMap<String, ContactInfo>,
}

impl<S: ReceiptSource> AccessGate<S> {
    pub fn new(config: GateConfig, source: S, contacts: HashMap<String, ContactInfo>) -> Self {
        Self { config, source, contacts }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Decides whether `proof` unlocks `beneficiary`. Pending transactions are rejected.
    pub async fn decide(&self, beneficiary: &str, proof: Option<&str>) -> AccessDecision {
        let Some(tx_hash) = proof else {
            return AccessDecision::PaymentRequired;
        };

        match check_payment(&self.source, tx_hash, &self.config.payment_contract, beneficiary).await {
            Ok(payment) => AccessDecision::Granted(payment),
            Err(reason) => AccessDecision::Rejected(reason),
        }
    }
}

#[derive(Serialize)]
struct PaymentRequiredBody<'a> {
    error: &'static str,
    payment_contract: &'a str,
    price: u64,
    token: Option<&'a str>,
    header: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

pub fn router<S: ReceiptSource + 'static>(gate: Arc<AccessGate<S>>) -> Router {
    Router::new()
        .route("/contact/{beneficiary}", get(contact::<S>))
        .with_state(gate)
}

/// GET /contact/{beneficiary}
async fn contact<S: ReceiptSource + 'static>(
    State(gate): State<Arc<AccessGate<S>>>,
    Path(beneficiary): Path<String>,
    headers: HeaderMap,
) -> Response {
    let proof = headers
        .get(PAYMENT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let decision = gate.decide(&beneficiary, proof).await;
    let code = decision.status_code();
    info!(beneficiary = %beneficiary, status = code.as_u16(), "contact request");

    match decision {
        AccessDecision::PaymentRequired => {
            let config = gate.config();
            let body = PaymentRequiredBody {
                error: "payment required",
                payment_contract: &config.payment_contract,
                price: config.price,
                token: config.token.as_deref(),
                header: PAYMENT_HEADER,
            };
            (code, Json(body)).into_response()
        }
        AccessDecision::Granted(_) => match gate.contacts.get(&beneficiary) {
            Some(info) => (code, Json(info.clone())).into_response(),
            None => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody { error: format!("no contact details for {}", beneficiary) }),
            )
                .into_response(),
        },
        AccessDecision::Rejected(reason) => {
            (code, Json(ErrorBody { error: reason.to_string() })).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::confirm::PollPolicy;
    use crate::receipt::{ContractEvent, MemoryReceipts, ReceiptStatus, TransactionReceipt};
    use crate::verify::PAYMENT_ACCEPTED;

    fn paid(hash: &str, status: ReceiptStatus, contract: &str) -> TransactionReceipt {
        TransactionReceipt {
            hash: hash.to_string(),
            status,
            contract_id: contract.to_string(),
            ledger: 3,
            events: vec![ContractEvent {
                contract_id: contract.to_string(),
                topics: vec![PAYMENT_ACCEPTED.to_string(), "GPAYER".to_string(), "GTALENT".to_string()],
                data: serde_json::Value::Null,
            }],
        }
    }

    async fn gate() -> Arc<AccessGate<MemoryReceipts>> {
        let source = MemoryReceipts::new();
        source.insert(paid("good", ReceiptStatus::Success, "CGATEWAY")).await;
        source.insert(paid("failed", ReceiptStatus::Failed, "CGATEWAY")).await;

        let config = GateConfig {
            payment_contract: "CGATEWAY".to_string(),
            price: 100,
            token: Some("CUSDC".to_string()),
            poll: PollPolicy::default(),
        };
        let contacts = HashMap::from([(
            "GTALENT".to_string(),
            ContactInfo { email: "talent@example.com".to_string(), telegram: None },
        )]);
        Arc::new(AccessGate::new(config, source, contacts))
    }

    async fn get_contact(proof: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut request = Request::builder().uri("/contact/GTALENT");
        if let Some(proof) = proof {
            request = request.header(PAYMENT_HEADER, proof);
        }

        let response = router(gate().await)
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_decide_states() {
        let gate = gate().await;

        assert_eq!(gate.decide("GTALENT", None).await, AccessDecision::PaymentRequired);
        assert!(matches!(gate.decide("GTALENT", Some("good")).await, AccessDecision::Granted(_)));
        assert!(matches!(
            gate.decide("GTALENT", Some("failed")).await,
            AccessDecision::Rejected(PaymentInvalid::Failed(_))
        ));
        assert!(matches!(
            gate.decide("GTALENT", Some("unknown")).await,
            AccessDecision::Rejected(PaymentInvalid::Pending(_))
        ));
    }

    #[tokio::test]
    async fn test_no_proof_is_402() {
        let (status, body) = get_contact(None).await;

        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body["price"], 100);
        assert_eq!(body["payment_contract"], "CGATEWAY");
        assert_eq!(body["header"], PAYMENT_HEADER);
    }

    #[tokio::test]
    async fn test_valid_proof_is_200() {
        let (status, body) = get_contact(Some("good")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "talent@example.com");
    }

    #[tokio::test]
    async fn test_failed_proof_is_403() {
        let (status, body) = get_contact(Some("failed")).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body["error"].as_str().unwrap().contains("failed"));
    }

    #[tokio::test]
    async fn test_blank_header_is_402() {
        let (status, _) = get_contact(Some("  ")).await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    }
}

//! Contact gate configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::confirm::PollPolicy;
use crate::error::ClientError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Payment gateway contract id payments must be sent to
    pub payment_contract: String,

    /// Price quoted in 402 responses, in the token's smallest unit
    pub price: u64,

    /// Token contract id quoted in 402 responses
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub poll: PollPolicy,
}

impl GateConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ClientError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}

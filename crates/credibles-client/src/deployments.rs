//! Append-only deployment record log
//!
//! One JSON object per line. Tooling appends a record after each deployment
//! and looks up the newest one per network to find contract addresses.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub network: String,
    pub timestamp: DateTime<Utc>,
    /// Contract name to deployed contract id
    pub contracts: BTreeMap<String, String>,
    pub deployer: String,
}

impl DeploymentRecord {
    pub fn new(network: impl Into<String>, deployer: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            timestamp: Utc::now(),
            contracts: BTreeMap::new(),
            deployer: deployer.into(),
        }
    }

    pub fn with_contract(mut self, name: impl Into<String>, address: impl Into<String>) -> Self {
        self.contracts.insert(name.into(), address.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct DeploymentLog {
    path: PathBuf,
}

impl DeploymentLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &DeploymentRecord) -> Result<(), ClientError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;

        info!(network = %record.network, contracts = record.contracts.len(), "deployment recorded");
        Ok(())
    }

    /// All records in file order. A missing log reads as empty.
    pub fn records(&self) -> Result<Vec<DeploymentRecord>, ClientError> {
        let file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line)
                .map_err(|source| ClientError::Record { line: index + 1, source })?;
            records.push(record);
        }
        Ok(records)
    }

    /// The newest record for `network`. Ties on timestamp go to the later line.
    pub fn latest(&self, network: &str) -> Result<Option<DeploymentRecord>, ClientError> {
        Ok(self
            .records()?
            .into_iter()
            .filter(|record| record.network == network)
            .max_by_key(|record| record.timestamp))
    }

    /// Address of `contract` in the newest record for `network`.
    pub fn address_of(&self, network: &str, contract: &str) -> Result<Option<String>, ClientError> {
        Ok(self
            .latest(network)?
            .and_then(|record| record.contracts.get(contract).cloned()))
    }
}

//! Deployment descriptors handed to the binder
//!
//! Fetching deployments is the caller's job; this module only defines the
//! shape they arrive in.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use solbind_core::{Error, Result};
use std::collections::BTreeMap;

use super::parser::{AbiParser, EthereumAbi};

/// One deployed contract: its ABI plus optional on-chain metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    /// Contract address
    #[serde(default)]
    pub address: Option<Address>,
    /// Creation transaction hash
    #[serde(default)]
    pub tx_hash: Option<B256>,
    /// Creation block number
    #[serde(default)]
    pub created_at: Option<U256>,
    /// JSON ABI
    pub abi: Value,
}

/// Deployments keyed by contract name
pub type Deployments = BTreeMap<String, Deployment>;

/// Deployment metadata surfaced to templates, hex encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentInfo {
    pub address: String,
    pub tx_hash: Option<String>,
    pub created_at: Option<String>,
}

impl Deployment {
    /// Deployment with an ABI and no chain metadata
    pub fn new(abi: Value) -> Self {
        Self {
            address: None,
            tx_hash: None,
            created_at: None,
            abi,
        }
    }

    /// Deployment from ABI JSON text
    pub fn from_abi_str(content: &str) -> Result<Self> {
        let abi = serde_json::from_str(content)
            .map_err(|e| Error::invalid_abi(format!("ABI is not valid JSON: {}", e)))?;
        Ok(Self::new(abi))
    }

    /// Compact JSON encoding of the ABI
    pub fn raw_abi(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.abi)?)
    }

    /// Parse the ABI into the typed model
    pub fn parse_abi(&self) -> Result<EthereumAbi> {
        AbiParser::new().parse_abi(&self.abi)
    }

    /// Chain metadata, present only when the address is known
    pub fn info(&self) -> Option<DeploymentInfo> {
        let address = self.address?;
        Some(DeploymentInfo {
            address: address.to_checksum(None),
            tx_hash: self.tx_hash.map(|hash| format!("0x{}", hex::encode(hash))),
            created_at: self
                .created_at
                .map(|block| format!("0x{}", hex::encode(block.to_be_bytes::<32>()))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_from_json() {
        let json = r#"{
            "Accounts": {
                "address": "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
                "tx_hash": "0x0000000000000000000000000000000000000000000000000000000000000abc",
                "created_at": "0x10",
                "abi": []
            }
        }"#;

        let deployments: Deployments = serde_json::from_str(json).unwrap();
        let info = deployments["Accounts"].info().unwrap();
        assert_eq!(info.address, "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
        assert_eq!(
            info.tx_hash.as_deref(),
            Some("0x0000000000000000000000000000000000000000000000000000000000000abc")
        );
        assert_eq!(
            info.created_at.as_deref(),
            Some("0x0000000000000000000000000000000000000000000000000000000000000010")
        );
    }

    #[test]
    fn test_deployment_without_metadata() {
        let deployment = Deployment::from_abi_str("[ ]").unwrap();
        assert!(deployment.info().is_none());
        assert_eq!(deployment.raw_abi().unwrap(), "[]");
    }

    #[test]
    fn test_invalid_abi_text() {
        assert!(matches!(Deployment::from_abi_str("[").unwrap_err(), Error::InvalidAbi(_)));
    }
}

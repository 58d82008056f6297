//! Chain platforms the bindings can target
//!
//! A platform decides which client library the generated code imports and
//! what the native address and hash types are called.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Supported chain platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Ethereum,
    Klaytn,
}

const ETHEREUM_IMPORTS: &[(&str, &str)] = &[
    ("platform", "github.com/ethereum/go-ethereum"),
    ("abi", "github.com/ethereum/go-ethereum/accounts/abi"),
    ("bind", "github.com/ethereum/go-ethereum/accounts/abi/bind"),
    ("common", "github.com/ethereum/go-ethereum/common"),
    ("chainTypes", "github.com/ethereum/go-ethereum/core/types"),
    ("event", "github.com/ethereum/go-ethereum/event"),
];

const KLAYTN_IMPORTS: &[(&str, &str)] = &[
    ("platform", "github.com/klaytn/klaytn"),
    ("abi", "github.com/klaytn/klaytn/accounts/abi"),
    ("bind", "github.com/klaytn/klaytn/accounts/abi/bind"),
    ("common", "github.com/klaytn/klaytn/common"),
    ("chainTypes", "github.com/klaytn/klaytn/blockchain/types"),
    ("event", "github.com/klaytn/klaytn/event"),
    ("types", "github.com/airbloc/airbloc-go/shared/types"),
    ("blockchain", "github.com/airbloc/airbloc-go/shared/blockchain"),
];

impl Platform {
    /// Import table keyed by alias
    pub fn imports(&self) -> BTreeMap<String, String> {
        let table = match self {
            Platform::Ethereum => ETHEREUM_IMPORTS,
            Platform::Klaytn => KLAYTN_IMPORTS,
        };
        table
            .iter()
            .map(|(alias, path)| (alias.to_string(), path.to_string()))
            .collect()
    }

    /// Go-style name of the native address type
    pub fn go_address_type(&self) -> &'static str {
        "common.Address"
    }

    /// Go-style name of the 32-byte hash type
    pub fn go_hash_type(&self) -> &'static str {
        "common.Hash"
    }

    /// Java-style name of the native address type
    pub fn java_address_type(&self) -> &'static str {
        "Address"
    }

    /// Java-style name of the 32-byte hash type
    pub fn java_hash_type(&self) -> &'static str {
        "Hash"
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Ethereum => write!(f, "ethereum"),
            Platform::Klaytn => write!(f, "klaytn"),
        }
    }
}

/// Merge import tables; later tables win on alias conflicts
pub fn merge_imports<'a, I>(tables: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a BTreeMap<String, String>>,
{
    let mut merged = BTreeMap::new();
    for table in tables {
        for (alias, path) in table {
            merged.insert(alias.clone(), path.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_imports() {
        let eth = Platform::Ethereum.imports();
        assert_eq!(eth.len(), 6);
        assert_eq!(eth["common"], "github.com/ethereum/go-ethereum/common");

        let klay = Platform::Klaytn.imports();
        assert_eq!(klay.len(), 8);
        assert_eq!(klay["chainTypes"], "github.com/klaytn/klaytn/blockchain/types");
        assert!(klay.contains_key("blockchain"));
    }

    #[test]
    fn test_merge_imports_later_wins() {
        let base = Platform::Ethereum.imports();
        let mut custom = BTreeMap::new();
        custom.insert("common".to_string(), "example.com/fork/common".to_string());
        custom.insert("errors".to_string(), "github.com/pkg/errors".to_string());

        let merged = merge_imports([&base, &custom]);
        assert_eq!(merged["common"], "example.com/fork/common");
        assert_eq!(merged["errors"], "github.com/pkg/errors");
        assert_eq!(merged["bind"], base["bind"]);
    }

    #[test]
    fn test_platform_serde_names() {
        let platform: Platform = serde_json::from_str("\"klaytn\"").unwrap();
        assert_eq!(platform, Platform::Klaytn);
        assert_eq!(Platform::Ethereum.to_string(), "ethereum");
    }
}

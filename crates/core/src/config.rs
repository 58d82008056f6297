//! Configuration for binding generation

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::platform::Platform;

/// Customs entry shared by every contract
pub const DEFAULT_CUSTOMS: &str = "default";

/// Target language of the generated bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// Go-style bindings: capitalized identifiers, `StructN` records
    #[default]
    #[serde(rename = "golang")]
    Go,
    /// Java-style bindings: decapitalized identifiers, `ClassN` records
    #[serde(rename = "java")]
    Java,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Go => write!(f, "golang"),
            Language::Java => write!(f, "java"),
        }
    }
}

/// Per-contract customizations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customs {
    /// Struct display names keyed by canonical tuple signature
    pub structs: HashMap<String, String>,
    /// Method allow-list; empty means every method is bound
    pub methods: HashMap<String, bool>,
    /// Extra imports merged over the platform imports, keyed by alias
    pub imports: BTreeMap<String, String>,
}

impl Customs {
    /// Whether a method passes the allow-list
    pub fn includes_method(&self, name: &str) -> bool {
        self.methods.is_empty() || self.methods.get(name).copied().unwrap_or(false)
    }

    /// Layer `other` over these customizations, key by key
    pub fn merge(&mut self, other: &Customs) {
        self.structs
            .extend(other.structs.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.methods
            .extend(other.methods.iter().map(|(k, v)| (k.clone(), *v)));
        self.imports
            .extend(other.imports.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Validate the customizations of one contract
    pub fn validate(&self, contract: &str) -> Result<(), ConfigError> {
        for (signature, name) in &self.structs {
            if !(signature.starts_with('(') && signature.ends_with(')')) {
                return Err(ConfigError::InvalidTupleSignature {
                    contract: contract.to_string(),
                    signature: signature.clone(),
                });
            }
            if !is_identifier(name) {
                return Err(ConfigError::InvalidStructName {
                    contract: contract.to_string(),
                    name: name.clone(),
                });
            }
        }

        for (alias, path) in &self.imports {
            if alias.is_empty() || path.is_empty() {
                return Err(ConfigError::InvalidImport {
                    contract: contract.to_string(),
                    alias: alias.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Main configuration for a binding run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    /// Target language
    pub language: Language,
    /// Platform providing imports and native type names
    pub platform: Platform,
    /// Customizations keyed by contract name. The `default` entry applies to
    /// every contract, underneath the contract's own entry.
    pub customs: HashMap<String, Customs>,
}

impl BindConfig {
    /// Create a configuration for the given target
    pub fn new(language: Language, platform: Platform) -> Self {
        Self {
            language,
            platform,
            customs: HashMap::new(),
        }
    }

    /// Load a configuration from JSON and validate it
    pub fn from_json_str(content: &str) -> crate::Result<Self> {
        let config: BindConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (contract, customs) in &self.customs {
            if contract.is_empty() {
                return Err(ConfigError::EmptyContractName);
            }
            customs.validate(contract)?;
        }
        Ok(())
    }

    /// Customizations for one contract: the `default` entry with the
    /// contract's own entry merged over it
    pub fn customs_for(&self, contract: &str) -> Customs {
        let mut customs = self
            .customs
            .get(DEFAULT_CUSTOMS)
            .cloned()
            .unwrap_or_default();
        if let Some(own) = self.customs.get(contract) {
            customs.merge(own);
        }
        customs
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Contract name in customs cannot be empty")]
    EmptyContractName,
    #[error("Invalid tuple signature '{signature}' in customs for contract '{contract}'")]
    InvalidTupleSignature { contract: String, signature: String },
    #[error("Invalid struct name '{name}' in customs for contract '{contract}'")]
    InvalidStructName { contract: String, name: String },
    #[error("Invalid import '{alias}' in customs for contract '{contract}'")]
    InvalidImport { contract: String, alias: String },
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::config(err.to_string())
    }
}

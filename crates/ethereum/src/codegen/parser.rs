//! Ethereum ABI parser
//!
//! Parses Ethereum contract ABI JSON into the typed model the binders consume.

use serde::Serialize;
use serde_json::Value;
use sha3::{Digest, Keccak256};
use solbind_core::types::{AbiType, TupleField};
use solbind_core::{Error, Result};
use std::fmt;

/// Parsed Ethereum contract ABI
#[derive(Debug, Clone, Serialize)]
pub struct EthereumAbi {
    /// Contract constructor
    pub constructor: Option<AbiFunction>,
    /// Contract functions in declaration order
    pub functions: Vec<AbiFunction>,
    /// Contract events in declaration order
    pub events: Vec<AbiEvent>,
    /// Raw ABI for reference
    #[serde(skip)]
    pub raw_abi: Value,
}

/// State mutability of a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    NonPayable,
    Payable,
}

impl StateMutability {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "pure" => Ok(StateMutability::Pure),
            "view" => Ok(StateMutability::View),
            "nonpayable" => Ok(StateMutability::NonPayable),
            "payable" => Ok(StateMutability::Payable),
            other => Err(Error::invalid_abi(format!("unknown state mutability '{}'", other))),
        }
    }
}

impl fmt::Display for StateMutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateMutability::Pure => write!(f, "pure"),
            StateMutability::View => write!(f, "view"),
            StateMutability::NonPayable => write!(f, "nonpayable"),
            StateMutability::Payable => write!(f, "payable"),
        }
    }
}

/// ABI function definition
#[derive(Debug, Clone, Serialize)]
pub struct AbiFunction {
    /// Function name
    pub name: String,
    /// Function inputs
    pub inputs: Vec<AbiParameter>,
    /// Function outputs
    pub outputs: Vec<AbiParameter>,
    /// State mutability (pure, view, nonpayable, payable)
    pub state_mutability: StateMutability,
}

impl AbiFunction {
    /// Whether the function only reads state
    pub fn is_constant(&self) -> bool {
        matches!(self.state_mutability, StateMutability::View | StateMutability::Pure)
    }

    pub fn is_payable(&self) -> bool {
        self.state_mutability == StateMutability::Payable
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub fn signature(&self) -> String {
        canonical_signature(&self.name, &self.inputs)
    }

    /// 4-byte selector as 0x-prefixed hex
    pub fn selector(&self) -> String {
        let hash = keccak256(self.signature().as_bytes());
        format!("0x{}", hex::encode(&hash[..4]))
    }
}

/// ABI event definition
#[derive(Debug, Clone, Serialize)]
pub struct AbiEvent {
    /// Event name
    pub name: String,
    /// Event inputs
    pub inputs: Vec<AbiParameter>,
    /// Whether event is anonymous
    pub anonymous: bool,
}

impl AbiEvent {
    /// Canonical signature, e.g. `Transfer(address,address,uint256)`
    pub fn signature(&self) -> String {
        canonical_signature(&self.name, &self.inputs)
    }

    /// Topic0 hash as 0x-prefixed hex
    pub fn topic(&self) -> String {
        format!("0x{}", hex::encode(keccak256(self.signature().as_bytes())))
    }
}

/// ABI parameter definition
#[derive(Debug, Clone, Serialize)]
pub struct AbiParameter {
    /// Parameter name, empty when anonymous
    pub name: String,
    /// Parameter type
    #[serde(rename = "type")]
    pub ty: AbiType,
    /// Internal type (for structs and custom types)
    pub internal_type: Option<String>,
    /// Whether parameter is indexed (for events)
    pub indexed: bool,
}

fn canonical_signature(name: &str, params: &[AbiParameter]) -> String {
    let types: Vec<String> = params.iter().map(|param| param.ty.signature()).collect();
    format!("{}({})", name, types.join(","))
}

fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

/// Ethereum ABI parser
pub struct AbiParser;

impl AbiParser {
    /// Create a new parser instance
    pub fn new() -> Self {
        Self
    }

    /// Parse Ethereum ABI from JSON content
    pub fn parse_content(&self, content: &str) -> Result<EthereumAbi> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| Error::invalid_abi(format!("ABI is not valid JSON: {}", e)))?;
        self.parse_abi(&value)
    }

    /// Parse ABI from JSON value
    pub fn parse_abi(&self, value: &Value) -> Result<EthereumAbi> {
        let abi_array = value
            .as_array()
            .ok_or_else(|| Error::invalid_abi("ABI must be an array"))?;

        let mut constructor = None;
        let mut functions = Vec::new();
        let mut events = Vec::new();

        for item in abi_array {
            if !item.is_object() {
                return Err(Error::invalid_abi("ABI entries must be objects"));
            }

            let item_type = str_field(item, "type")?.unwrap_or("function");

            match item_type {
                "constructor" => {
                    constructor = Some(self.parse_function(item, "constructor")?);
                }
                "function" => {
                    functions.push(self.parse_function(item, "function")?);
                }
                "event" => {
                    events.push(self.parse_event(item)?);
                }
                // Errors, fallback and receive entries have no binding
                "error" | "fallback" | "receive" => {}
                other => {
                    return Err(Error::invalid_abi(format!(
                        "unknown ABI entry type '{}'",
                        other
                    )));
                }
            }
        }

        Ok(EthereumAbi {
            constructor,
            functions,
            events,
            raw_abi: value.clone(),
        })
    }

    /// Parse a function from ABI
    fn parse_function(&self, value: &Value, function_type: &str) -> Result<AbiFunction> {
        let name = match str_field(value, "name")? {
            Some(name) => name.to_string(),
            None if function_type == "constructor" => String::new(),
            None => return Err(Error::invalid_abi("Function must have a name")),
        };

        let inputs = Self::parse_parameter_list(value, "inputs")?;
        let outputs = Self::parse_parameter_list(value, "outputs")?;

        // Legacy flags are checked even when stateMutability wins
        let constant = bool_field(value, "constant")?.unwrap_or(false);
        let payable = bool_field(value, "payable")?.unwrap_or(false);

        let state_mutability = match str_field(value, "stateMutability")? {
            Some(mutability) => StateMutability::parse(mutability)?,
            None if constant => StateMutability::View,
            None if payable => StateMutability::Payable,
            None => StateMutability::NonPayable,
        };

        Ok(AbiFunction {
            name,
            inputs,
            outputs,
            state_mutability,
        })
    }

    /// Parse an event from ABI
    fn parse_event(&self, value: &Value) -> Result<AbiEvent> {
        let name = str_field(value, "name")?
            .ok_or_else(|| Error::invalid_abi("Event must have a name"))?
            .to_string();

        let inputs = Self::parse_parameter_list(value, "inputs")?;
        let anonymous = bool_field(value, "anonymous")?.unwrap_or(false);

        Ok(AbiEvent {
            name,
            inputs,
            anonymous,
        })
    }

    fn parse_parameter_list(value: &Value, key: &str) -> Result<Vec<AbiParameter>> {
        match array_field(value, key)? {
            Some(array) => Self::parse_parameters(array),
            None => Ok(Vec::new()),
        }
    }

    /// Parse parameters, including tuple components and the indexed flag
    fn parse_parameters(array: &[Value]) -> Result<Vec<AbiParameter>> {
        let mut parameters = Vec::with_capacity(array.len());

        for param in array {
            if !param.is_object() {
                return Err(Error::invalid_abi("Parameters must be objects"));
            }

            let name = str_field(param, "name")?.unwrap_or("").to_string();

            let param_type = str_field(param, "type")?
                .ok_or_else(|| Error::invalid_abi("Parameter must have a type"))?;

            let internal_type = str_field(param, "internalType")?.map(String::from);
            let indexed = bool_field(param, "indexed")?.unwrap_or(false);

            let components = if param_type.starts_with("tuple") {
                array_field(param, "components")?
                    .map(|arr| Self::parse_components(arr))
                    .transpose()?
            } else {
                None
            };

            let ty = AbiType::parse(param_type, components.as_deref())?;

            parameters.push(AbiParameter {
                name,
                ty,
                internal_type,
                indexed,
            });
        }

        Ok(parameters)
    }

    fn parse_components(array: &[Value]) -> Result<Vec<TupleField>> {
        Ok(Self::parse_parameters(array)?
            .into_iter()
            .map(|param| TupleField::new(param.name, param.ty))
            .collect())
    }
}

impl Default for AbiParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper functions for working with parsed ABIs
impl EthereumAbi {
    /// Get view functions (read-only)
    pub fn view_functions(&self) -> Vec<&AbiFunction> {
        self.functions.iter().filter(|f| f.is_constant()).collect()
    }

    /// Get transaction functions (state-changing)
    pub fn transaction_functions(&self) -> Vec<&AbiFunction> {
        self.functions.iter().filter(|f| !f.is_constant()).collect()
    }
}

/// Optional field of one JSON type. `null` counts as absent, any other
/// type mismatch is an invalid ABI.
fn typed_field<'a, T>(
    value: &'a Value,
    key: &str,
    expected: &str,
    cast: impl FnOnce(&'a Value) -> Option<T>,
) -> Result<Option<T>> {
    match value.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(field) => cast(field).map(Some).ok_or_else(|| {
            Error::invalid_abi(format!("'{}' must be {}, got {}", key, expected, field))
        }),
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> Result<Option<&'a str>> {
    typed_field(value, key, "a string", Value::as_str)
}

fn bool_field(value: &Value, key: &str) -> Result<Option<bool>> {
    typed_field(value, key, "a boolean", Value::as_bool)
}

fn array_field<'a>(value: &'a Value, key: &str) -> Result<Option<&'a Vec<Value>>> {
    typed_field(value, key, "an array", Value::as_array)
}

//! ABI type descriptors
//!
//! A recursive model of Solidity ABI types. The canonical signature of a type
//! (its `Display` form, e.g. `(address,uint8,address)[]`) is the structural
//! identity used for struct deduplication.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

use crate::{Error, Result};

/// A single ABI type descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiType {
    /// 20-byte account address
    Address,
    /// Unsigned integer of the given bit width
    Uint(usize),
    /// Signed integer of the given bit width
    Int(usize),
    /// Boolean
    Bool,
    /// Dynamic UTF-8 string
    String,
    /// Dynamic byte sequence
    Bytes,
    /// Fixed-size byte sequence (`bytes1` ..= `bytes32`)
    FixedBytes(usize),
    /// Function selector: 20-byte address followed by a 4-byte selector
    Function,
    /// Fixed-length array
    Array(Box<AbiType>, usize),
    /// Dynamic array
    Slice(Box<AbiType>),
    /// Ordered tuple of named or anonymous fields
    Tuple(Vec<TupleField>),
}

/// One element of a tuple type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleField {
    /// Raw field name as written in the ABI (may be empty)
    pub name: String,
    /// Field type
    pub ty: AbiType,
}

impl TupleField {
    pub fn new<S: Into<String>>(name: S, ty: AbiType) -> Self {
        Self { name: name.into(), ty }
    }
}

/// Default width of the unsized `uint` / `int` aliases
pub const DEFAULT_INTEGER_BITS: usize = 256;

fn integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(u?)int([0-9]*)$")
            .expect("valid integer pattern")
    })
}

fn fixed_bytes_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^bytes([0-9]+)$")
            .expect("valid bytes pattern")
    })
}

/// Check that an integer width is one Solidity can declare
pub fn validate_integer_bits(bits: usize) -> Result<usize> {
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(Error::malformed_type(format!(
            "integer width {} is not a multiple of 8 in 8..=256",
            bits
        )));
    }
    Ok(bits)
}

/// Check that a fixed-bytes size is one Solidity can declare
pub fn validate_fixed_bytes(size: usize) -> Result<usize> {
    if size == 0 || size > 32 {
        return Err(Error::malformed_type(format!(
            "fixed bytes size {} is outside 1..=32",
            size
        )));
    }
    Ok(size)
}

impl AbiType {
    /// Parse an ABI type string such as `uint256`, `bytes32[4]` or `tuple[]`.
    ///
    /// `components` supplies the fields of the innermost tuple when the base
    /// type is `tuple`.
    pub fn parse(type_str: &str, components: Option<&[TupleField]>) -> Result<Self> {
        let type_str = type_str.trim();

        if let Some(stripped) = type_str.strip_suffix(']') {
            let open = stripped.rfind('[').ok_or_else(|| {
                Error::malformed_type(format!("unbalanced array suffix in '{}'", type_str))
            })?;
            let inner = Self::parse(&stripped[..open], components)?;
            let size = &stripped[open + 1..];

            if size.is_empty() {
                return Ok(AbiType::Slice(Box::new(inner)));
            }
            let size = size.parse::<usize>().map_err(|_| {
                Error::malformed_type(format!("invalid array length '{}' in '{}'", size, type_str))
            })?;
            return Ok(AbiType::Array(Box::new(inner), size));
        }

        match type_str {
            "address" => Ok(AbiType::Address),
            "bool" => Ok(AbiType::Bool),
            "string" => Ok(AbiType::String),
            "bytes" => Ok(AbiType::Bytes),
            "function" => Ok(AbiType::Function),
            "tuple" => {
                let fields = components.ok_or_else(|| {
                    Error::invalid_abi("tuple type declared without components")
                })?;
                Ok(AbiType::Tuple(fields.to_vec()))
            }
            _ if type_str.starts_with("int") || type_str.starts_with("uint") => {
                Self::parse_integer(type_str)
            }
            _ if type_str.starts_with("bytes") => {
                let captures = fixed_bytes_pattern().captures(type_str).ok_or_else(|| {
                    Error::malformed_type(format!("'{}' is not a fixed bytes type", type_str))
                })?;
                let size = captures[1].parse::<usize>().map_err(|_| {
                    Error::malformed_type(format!("invalid bytes size in '{}'", type_str))
                })?;
                Ok(AbiType::FixedBytes(validate_fixed_bytes(size)?))
            }
            _ => Err(Error::malformed_type(format!("unknown ABI type '{}'", type_str))),
        }
    }

    fn parse_integer(type_str: &str) -> Result<Self> {
        let captures = integer_pattern().captures(type_str).ok_or_else(|| {
            Error::malformed_type(format!("'{}' has no valid integer width", type_str))
        })?;

        let unsigned = !captures[1].is_empty();
        let bits = match &captures[2] {
            "" => DEFAULT_INTEGER_BITS,
            width => width.parse::<usize>().map_err(|_| {
                Error::malformed_type(format!("invalid integer width in '{}'", type_str))
            })?,
        };
        let bits = validate_integer_bits(bits)?;

        Ok(if unsigned { AbiType::Uint(bits) } else { AbiType::Int(bits) })
    }

    /// Canonical signature of this type, e.g. `(address,uint8,address)`
    pub fn signature(&self) -> String {
        self.to_string()
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, AbiType::Tuple(_))
    }

    /// Dynamic values that are only available as a hash when indexed
    pub fn is_hashed_topic(&self) -> bool {
        matches!(self, AbiType::String | AbiType::Bytes)
    }

    /// Peel array and slice wrappers off a type, returning the innermost
    /// element type
    pub fn innermost(&self) -> &AbiType {
        match self {
            AbiType::Array(inner, _) | AbiType::Slice(inner) => inner.innermost(),
            other => other,
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Address => write!(f, "address"),
            AbiType::Uint(bits) => write!(f, "uint{}", bits),
            AbiType::Int(bits) => write!(f, "int{}", bits),
            AbiType::Bool => write!(f, "bool"),
            AbiType::String => write!(f, "string"),
            AbiType::Bytes => write!(f, "bytes"),
            AbiType::FixedBytes(size) => write!(f, "bytes{}", size),
            AbiType::Function => write!(f, "function"),
            AbiType::Array(inner, size) => write!(f, "{}[{}]", inner, size),
            AbiType::Slice(inner) => write!(f, "{}[]", inner),
            AbiType::Tuple(fields) => {
                write!(f, "(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", field.ty)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl Serialize for AbiType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

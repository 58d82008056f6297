//! Go-style bindings

use solbind_core::config::Language;
use solbind_core::naming::capitalize;
use solbind_core::platform::Platform;
use solbind_core::types::{validate_fixed_bytes, validate_integer_bits, AbiType};
use solbind_core::{Error, Result};

use super::{fixed_width, IdentifierConvention, TypeMapper};
use crate::codegen::registry::StructRegistry;

/// Go-style target: `StructN` records, capitalized identifiers and
/// `*big.Int` for integers without a native width
#[derive(Debug, Clone, Copy)]
pub struct GoBinding {
    platform: Platform,
}

impl GoBinding {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl TypeMapper for GoBinding {
    fn basic_type(&self, ty: &AbiType) -> Result<String> {
        let bound = match ty {
            AbiType::Address => self.platform.go_address_type().to_string(),
            AbiType::Uint(bits) | AbiType::Int(bits) => {
                let bits = validate_integer_bits(*bits)?;
                let sign = if matches!(ty, AbiType::Uint(_)) { "u" } else { "" };
                match fixed_width(bits) {
                    Some(bits) => format!("{}int{}", sign, bits),
                    None => "*big.Int".to_string(),
                }
            }
            AbiType::FixedBytes(size) => format!("[{}]byte", validate_fixed_bytes(*size)?),
            AbiType::Bytes => "[]byte".to_string(),
            AbiType::Function => "[24]byte".to_string(),
            AbiType::String => "string".to_string(),
            AbiType::Bool => "bool".to_string(),
            other => {
                return Err(Error::malformed_type(format!(
                    "'{}' is not an elementary type",
                    other
                )))
            }
        };
        Ok(bound)
    }

    fn array_type(&self, element: String, size: usize) -> String {
        format!("[{}]{}", size, element)
    }

    fn slice_type(&self, element: String) -> String {
        format!("[]{}", element)
    }

    fn hash_type(&self) -> &str {
        self.platform.go_hash_type()
    }

    fn resolve_tuple(&self, ty: &AbiType, registry: &mut StructRegistry) -> Result<String> {
        registry.resolve(ty, self)
    }

    fn named_type(&self, bound: &str, _ty: &AbiType) -> String {
        let mut base = bound;
        let mut plural = false;
        while let Some(rest) = base.strip_prefix('[') {
            match rest.find(']') {
                Some(close) => {
                    base = &rest[close + 1..];
                    plural = true;
                }
                None => break,
            }
        }

        let mut name: String = base
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|part| !part.is_empty())
            .map(capitalize)
            .collect();
        if plural {
            name.push_str(if name.ends_with('s') { "es" } else { "s" });
        }
        name
    }
}

impl IdentifierConvention for GoBinding {
    fn language(&self) -> Language {
        Language::Go
    }

    fn method_name(&self, raw: &str) -> String {
        capitalize(raw)
    }

    fn field_name(&self, raw: &str) -> String {
        capitalize(raw)
    }

    fn struct_prefix(&self) -> &'static str {
        "Struct"
    }
}

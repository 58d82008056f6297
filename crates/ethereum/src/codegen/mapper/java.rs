//! Java-style bindings
//!
//! The Java side talks to the chain through gomobile, which has no unsigned
//! integers and no way to pass arbitrary records. Unsigned integers are bound
//! as `BigInt` and tuples are rejected.

use solbind_core::config::Language;
use solbind_core::naming::{capitalize, decapitalize};
use solbind_core::platform::Platform;
use solbind_core::types::{validate_fixed_bytes, validate_integer_bits, AbiType};
use solbind_core::{Error, Result};

use super::{fixed_width, IdentifierConvention, TypeMapper};
use crate::codegen::registry::StructRegistry;

#[derive(Debug, Clone, Copy)]
pub struct JavaBinding {
    platform: Platform,
}

impl JavaBinding {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    /// Multidimensional types map to predefined collection types on the Go side
    fn pluralize(element: String) -> String {
        match element.as_str() {
            "boolean" => "Bools".to_string(),
            "String" => "Strings".to_string(),
            "Address" => "Addresses".to_string(),
            "byte[]" => "Binaries".to_string(),
            "BigInt" => "BigInts".to_string(),
            _ => format!("{}[]", element),
        }
    }
}

impl TypeMapper for JavaBinding {
    fn basic_type(&self, ty: &AbiType) -> Result<String> {
        let bound = match ty {
            AbiType::Address => self.platform.java_address_type().to_string(),
            AbiType::Uint(bits) => {
                validate_integer_bits(*bits)?;
                "BigInt".to_string()
            }
            AbiType::Int(bits) => match fixed_width(validate_integer_bits(*bits)?) {
                Some(8) => "byte".to_string(),
                Some(16) => "short".to_string(),
                Some(32) => "int".to_string(),
                Some(64) => "long".to_string(),
                _ => "BigInt".to_string(),
            },
            AbiType::FixedBytes(size) => {
                validate_fixed_bytes(*size)?;
                "byte[]".to_string()
            }
            AbiType::Bytes => "byte[]".to_string(),
            AbiType::Bool => "boolean".to_string(),
            AbiType::String => "String".to_string(),
            AbiType::Function => "byte[24]".to_string(),
            other => {
                return Err(Error::malformed_type(format!(
                    "'{}' is not an elementary type",
                    other
                )))
            }
        };
        Ok(bound)
    }

    fn array_type(&self, element: String, _size: usize) -> String {
        Self::pluralize(element)
    }

    fn slice_type(&self, element: String) -> String {
        Self::pluralize(element)
    }

    fn hash_type(&self) -> &str {
        self.platform.java_hash_type()
    }

    fn resolve_tuple(&self, ty: &AbiType, _registry: &mut StructRegistry) -> Result<String> {
        Err(Error::unsupported_tuple(self.language().to_string(), ty.signature()))
    }

    fn named_type(&self, bound: &str, ty: &AbiType) -> String {
        match bound {
            "byte[]" => return "Binary".to_string(),
            "boolean" => return "Bool".to_string(),
            _ => {}
        }

        let plural = !matches!(ty, AbiType::Uint(_) | AbiType::Int(_));
        let (sign, bits) = match ty.innermost() {
            AbiType::Uint(bits) => ("u", *bits),
            AbiType::Int(bits) => ("", *bits),
            _ => return bound.to_string(),
        };

        match fixed_width(bits) {
            Some(bits) if plural => capitalize(&format!("{}int{}s", sign, bits)),
            Some(bits) => capitalize(&format!("{}int{}", sign, bits)),
            None => bound.to_string(),
        }
    }
}

impl IdentifierConvention for JavaBinding {
    fn language(&self) -> Language {
        Language::Java
    }

    fn method_name(&self, raw: &str) -> String {
        decapitalize(raw)
    }

    fn field_name(&self, raw: &str) -> String {
        decapitalize(raw)
    }

    fn struct_prefix(&self) -> &'static str {
        "Class"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solbind_core::types::TupleField;

    fn map(ty: &AbiType) -> String {
        let mut registry = StructRegistry::new();
        JavaBinding::new(Platform::Ethereum).map_type(ty, &mut registry).unwrap()
    }

    #[test]
    fn test_elementary_types() {
        assert_eq!(map(&AbiType::Address), "Address");
        assert_eq!(map(&AbiType::Bool), "boolean");
        assert_eq!(map(&AbiType::String), "String");
        assert_eq!(map(&AbiType::Bytes), "byte[]");
        assert_eq!(map(&AbiType::FixedBytes(8)), "byte[]");
        assert_eq!(map(&AbiType::Function), "byte[24]");
    }

    #[test]
    fn test_integers() {
        assert_eq!(map(&AbiType::Int(8)), "byte");
        assert_eq!(map(&AbiType::Int(16)), "short");
        assert_eq!(map(&AbiType::Int(32)), "int");
        assert_eq!(map(&AbiType::Int(64)), "long");
        assert_eq!(map(&AbiType::Int(256)), "BigInt");
        assert_eq!(map(&AbiType::Uint(8)), "BigInt");
        assert_eq!(map(&AbiType::Uint(256)), "BigInt");
    }

    #[test]
    fn test_pluralized_collections() {
        assert_eq!(map(&AbiType::Slice(Box::new(AbiType::Address))), "Addresses");
        assert_eq!(map(&AbiType::Array(Box::new(AbiType::Bool), 2)), "Bools");
        assert_eq!(map(&AbiType::Slice(Box::new(AbiType::Uint(256)))), "BigInts");
        assert_eq!(map(&AbiType::Slice(Box::new(AbiType::Bytes))), "Binaries");
        assert_eq!(map(&AbiType::Slice(Box::new(AbiType::Int(32)))), "int[]");
    }

    #[test]
    fn test_topic_hash() {
        let mut registry = StructRegistry::new();
        let binding = JavaBinding::new(Platform::Klaytn);
        let mut topic = |ty: AbiType| binding.map_topic_type(&ty, &mut registry).unwrap();
        assert_eq!(topic(AbiType::String), "Hash");
        assert_eq!(topic(AbiType::Int(64)), "long");
    }

    #[test]
    fn test_tuples_are_unsupported() {
        let mut registry = StructRegistry::new();
        let binding = JavaBinding::new(Platform::Ethereum);
        let tuple = AbiType::Tuple(vec![TupleField::new("a", AbiType::Address)]);
        let err = binding
            .map_type(&AbiType::Slice(Box::new(tuple)), &mut registry)
            .unwrap_err();

        assert!(matches!(err, Error::UnsupportedTupleBinding { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_named_type() {
        let binding = JavaBinding::new(Platform::Ethereum);
        assert_eq!(binding.named_type("byte[]", &AbiType::Bytes), "Binary");
        assert_eq!(binding.named_type("boolean", &AbiType::Bool), "Bool");
        assert_eq!(binding.named_type("byte", &AbiType::Int(8)), "Int8");
        assert_eq!(binding.named_type("BigInt", &AbiType::Uint(32)), "Uint32");
        let slice = AbiType::Slice(Box::new(AbiType::Uint(32)));
        assert_eq!(binding.named_type("BigInts", &slice), "Uint32s");
        assert_eq!(binding.named_type("BigInt", &AbiType::Uint(256)), "BigInt");
        assert_eq!(binding.named_type("Address", &AbiType::Address), "Address");
    }
}

//! Type mappers and identifier conventions for the binding targets
//!
//! Each target language implements [`TypeMapper`] and [`IdentifierConvention`].
//! The pair is picked once per run with [`target_for`] and passed explicitly
//! through every resolution pass.

mod golang;
mod java;

pub use golang::GoBinding;
pub use java::JavaBinding;

use solbind_core::config::Language;
use solbind_core::platform::Platform;
use solbind_core::types::AbiType;
use solbind_core::Result;

use super::registry::StructRegistry;

/// Translates ABI type descriptors into target-language type strings
pub trait TypeMapper {
    /// Elementary types: everything except arrays, slices and tuples
    fn basic_type(&self, ty: &AbiType) -> Result<String>;

    /// Fixed-length array of an already mapped element type
    fn array_type(&self, element: String, size: usize) -> String;

    /// Dynamic array of an already mapped element type
    fn slice_type(&self, element: String) -> String;

    /// Fixed-size hash type standing in for hashed topics
    fn hash_type(&self) -> &str;

    /// Look up or register a tuple in the registry and return its struct name
    fn resolve_tuple(&self, ty: &AbiType, registry: &mut StructRegistry) -> Result<String>;

    /// Name of a mapped type usable inside an identifier
    fn named_type(&self, bound: &str, ty: &AbiType) -> String;

    /// Map a type, resolving tuples into the registry depth-first
    fn map_type(&self, ty: &AbiType, registry: &mut StructRegistry) -> Result<String> {
        match ty {
            AbiType::Tuple(_) => self.resolve_tuple(ty, registry),
            AbiType::Array(inner, size) => {
                let element = self.map_type(inner, registry)?;
                Ok(self.array_type(element, *size))
            }
            AbiType::Slice(inner) => {
                let element = self.map_type(inner, registry)?;
                Ok(self.slice_type(element))
            }
            basic => self.basic_type(basic),
        }
    }

    /// Map an indexed event argument; dynamic values only exist as a hash
    fn map_topic_type(&self, ty: &AbiType, registry: &mut StructRegistry) -> Result<String> {
        let bound = self.map_type(ty, registry)?;
        if ty.is_hashed_topic() {
            return Ok(self.hash_type().to_string());
        }
        Ok(bound)
    }
}

/// Naming rules of a binding target
pub trait IdentifierConvention {
    /// Language tag used in logs and errors
    fn language(&self) -> Language;

    /// Method and event names
    fn method_name(&self, raw: &str) -> String;

    /// Struct field names
    fn field_name(&self, raw: &str) -> String;

    /// Prefix of synthesized struct names
    fn struct_prefix(&self) -> &'static str;
}

/// A complete binding target
pub trait Target: TypeMapper + IdentifierConvention + Send + Sync {}

impl<T: TypeMapper + IdentifierConvention + Send + Sync> Target for T {}

/// Select the binding target for a language and platform
pub fn target_for(language: Language, platform: Platform) -> Box<dyn Target> {
    match language {
        Language::Go => Box::new(GoBinding::new(platform)),
        Language::Java => Box::new(JavaBinding::new(platform)),
    }
}

/// Width-checked integer suffix for the fixed-width names both targets share
fn fixed_width(bits: usize) -> Option<usize> {
    match bits {
        8 | 16 | 32 | 64 => Some(bits),
        _ => None,
    }
}

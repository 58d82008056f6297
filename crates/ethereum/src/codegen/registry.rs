//! Per-contract struct registry
//!
//! Tuples are deduplicated by canonical signature. Structs live in an
//! insertion-order arena: the Nth distinct tuple shape becomes `StructN`
//! (`ClassN` for Java-style targets), with nested tuples registered before the
//! tuple that contains them. Custom names replace the synthesized name at
//! registration, so every bound type refers to the name that gets emitted.

use serde::{Serialize, Serializer};
use solbind_core::types::AbiType;
use solbind_core::{Error, Result};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::mapper::Target;

/// One field of a synthesized struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructField {
    /// Normalized field name
    pub name: String,
    /// Target-language type
    #[serde(rename = "type")]
    pub ty: String,
    /// Original ABI type of the field
    pub abi_type: AbiType,
}

/// A struct synthesized for one tuple shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDescriptor {
    /// Display name
    pub name: String,
    /// Canonical tuple signature, the deduplication key
    pub signature: String,
    pub fields: Vec<StructField>,
}

#[derive(Debug, Clone, Default)]
pub struct StructRegistry {
    structs: Vec<StructDescriptor>,
    index: HashMap<String, usize>,
    /// Display names keyed by canonical tuple signature
    overrides: HashMap<String, String>,
}

impl StructRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that names the given tuple shapes instead of numbering them
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self {
            overrides,
            ..Self::default()
        }
    }

    /// Return the struct name for a tuple, registering it on first sight
    pub fn resolve<T: Target + ?Sized>(&mut self, ty: &AbiType, target: &T) -> Result<String> {
        let fields = match ty {
            AbiType::Tuple(fields) => fields,
            other => {
                return Err(Error::malformed_type(format!("'{}' is not a tuple type", other)))
            }
        };

        let signature = ty.signature();
        if let Some(existing) = self.get(&signature) {
            return Ok(existing.name.clone());
        }

        let mut resolved = Vec::with_capacity(fields.len());
        let mut seen = HashSet::new();
        for (i, field) in fields.iter().enumerate() {
            let bound = target.map_type(&field.ty, self)?;
            let mut name = target.field_name(&field.name);
            let mut fallback = i;
            while name.is_empty() || seen.contains(&name) {
                name = target.field_name(&format!("field{}", fallback));
                fallback += 1;
            }
            seen.insert(name.clone());
            resolved.push(StructField {
                name,
                ty: bound,
                abi_type: field.ty.clone(),
            });
        }

        // Numbering counts every struct, renamed or not
        let name = match self.overrides.get(&signature) {
            Some(custom) => custom.clone(),
            None => format!("{}{}", target.struct_prefix(), self.structs.len()),
        };
        debug!(struct_name = %name, signature = %signature, "Synthesized struct");

        self.index.insert(signature.clone(), self.structs.len());
        self.structs.push(StructDescriptor {
            name: name.clone(),
            signature,
            fields: resolved,
        });
        Ok(name)
    }

    /// Look up a struct by canonical tuple signature
    pub fn get(&self, signature: &str) -> Option<&StructDescriptor> {
        self.index.get(signature).map(|&i| &self.structs[i])
    }

    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    /// Structs in creation order
    pub fn iter(&self) -> impl Iterator<Item = &StructDescriptor> {
        self.structs.iter()
    }

    /// Make sure no two tuple shapes share a display name.
    ///
    /// Overrides for signatures this contract never produced are ignored.
    pub fn check_names(&self) -> Result<()> {
        for signature in self.overrides.keys() {
            if !self.index.contains_key(signature) {
                debug!(signature = %signature, "Struct override matches no tuple");
            }
        }

        let mut seen: HashMap<&str, &str> = HashMap::new();
        for descriptor in &self.structs {
            if let Some(first) = seen.insert(&descriptor.name, &descriptor.signature) {
                return Err(Error::duplicate_struct(
                    descriptor.name.clone(),
                    first.to_string(),
                    descriptor.signature.clone(),
                ));
            }
        }
        Ok(())
    }
}

impl Serialize for StructRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.structs)
    }
}

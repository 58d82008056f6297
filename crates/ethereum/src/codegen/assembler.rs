//! Contract assembly
//!
//! Packages a classified ABI and its struct registry into the per-contract
//! model consumed by template renderers.

use serde::Serialize;
use solbind_core::config::{Customs, Language};
use solbind_core::naming::capitalize;
use solbind_core::platform::{merge_imports, Platform};
use solbind_core::Result;
use std::collections::BTreeMap;
use tracing::debug;

use super::classifier::{Classification, NormalizedEvent, NormalizedMethod};
use super::deployment::DeploymentInfo;
use super::format::{format_constructor, format_event, format_method};
use super::registry::{StructDescriptor, StructRegistry};

/// Everything a renderer needs to emit bindings for one contract
#[derive(Debug, Clone, Serialize)]
pub struct ContractModel {
    /// Contract name as deployed
    pub name: String,
    /// Public type name of the binding
    pub type_name: String,
    pub language: Language,
    pub platform: Platform,
    /// ABI JSON without whitespace, quotes escaped for a string literal
    pub input_abi: String,
    /// Canonical constructor parameter list, e.g. `(string,uint8)`
    pub constructor_signature: String,
    pub constructor: Option<NormalizedMethod>,
    /// Read-only methods
    pub calls: BTreeMap<String, NormalizedMethod>,
    /// State-changing methods
    pub transacts: BTreeMap<String, NormalizedMethod>,
    pub events: BTreeMap<String, NormalizedEvent>,
    pub structs: StructRegistry,
    /// Import paths keyed by alias
    pub imports: BTreeMap<String, String>,
    /// On-chain metadata, when the deployment carries an address
    pub deployment: Option<DeploymentInfo>,
    /// Canonical signature to method or event key
    pub signatures: BTreeMap<String, String>,
}

impl ContractModel {
    /// Struct synthesized for a canonical tuple signature
    pub fn struct_for(&self, signature: &str) -> Option<&StructDescriptor> {
        self.structs.get(signature)
    }

    /// Method bound for a canonical signature, in either bucket
    pub fn method_by_signature(&self, signature: &str) -> Option<&NormalizedMethod> {
        let key = self.signatures.get(signature)?;
        self.calls.get(key).or_else(|| self.transacts.get(key))
    }

    /// Event bound for a canonical signature
    pub fn event_by_signature(&self, signature: &str) -> Option<&NormalizedEvent> {
        let key = self.signatures.get(signature)?;
        self.events.get(key).filter(|event| event.signature == signature)
    }
}

/// Remove whitespace from ABI JSON and escape its quotes
pub fn strip_abi(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace('"', "\\\"")
}

/// Builds contract models for one language and platform
#[derive(Debug, Clone, Copy)]
pub struct Assembler {
    language: Language,
    platform: Platform,
}

impl Assembler {
    pub fn new(language: Language, platform: Platform) -> Self {
        Self { language, platform }
    }

    /// Check struct names, render declarations and package the model.
    ///
    /// `structs` must have been built with the contract's struct overrides.
    pub fn assemble(
        &self,
        name: &str,
        raw_abi: &str,
        classification: Classification,
        structs: StructRegistry,
        customs: &Customs,
    ) -> Result<ContractModel> {
        structs.check_names()?;

        let Classification {
            mut calls,
            mut transacts,
            mut events,
            mut constructor,
            signatures,
        } = classification;

        for method in calls.values_mut().chain(transacts.values_mut()) {
            method.declaration = format_method(method, &structs);
        }
        if let Some(constructor) = constructor.as_mut() {
            constructor.declaration = format_constructor(constructor, &structs);
        }
        for event in events.values_mut() {
            event.declaration = format_event(event, &structs);
        }

        let constructor_signature = constructor
            .as_ref()
            .map(|c| c.original_signature.clone())
            .unwrap_or_else(|| "()".to_string());

        let imports = merge_imports([&self.platform.imports(), &customs.imports]);
        debug!(contract = %name, imports = imports.len(), "Assembled contract model");

        Ok(ContractModel {
            name: name.to_string(),
            type_name: capitalize(name),
            language: self.language,
            platform: self.platform,
            input_abi: strip_abi(raw_abi),
            constructor_signature,
            constructor,
            calls,
            transacts,
            events,
            structs,
            imports,
            deployment: None,
            signatures,
        })
    }
}

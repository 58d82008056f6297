//! Method and event classification
//!
//! Splits ABI functions into read-only calls and state-changing transacts,
//! normalizes argument names and resolves every argument type through the
//! binding target, registering tuples as it goes. Entries are processed in ABI
//! declaration order so struct numbering is reproducible.

use serde::Serialize;
use solbind_core::config::Customs;
use solbind_core::naming::capitalize;
use solbind_core::types::AbiType;
use solbind_core::Result;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use super::mapper::Target;
use super::parser::{AbiEvent, AbiFunction, AbiParameter, EthereumAbi};
use super::registry::StructRegistry;

/// A method or event argument with its bound type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedArgument {
    /// Normalized name, `arg{i}` for anonymous inputs, empty for anonymous outputs
    pub name: String,
    /// ABI type
    #[serde(rename = "type")]
    pub ty: AbiType,
    /// Target-language type
    pub bound_type: String,
    pub indexed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizedMethod {
    #[serde(skip)]
    pub original: AbiFunction,
    pub original_name: String,
    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub original_signature: String,
    /// 4-byte selector
    pub selector: String,
    /// Target-language method name, disambiguated for overloads
    pub normalized_name: String,
    pub inputs: Vec<NormalizedArgument>,
    pub outputs: Vec<NormalizedArgument>,
    pub read_only: bool,
    pub payable: bool,
    /// Whether the outputs collapse into one named aggregate
    pub structured_output: bool,
    /// Solidity-style declaration with struct names substituted
    pub declaration: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizedEvent {
    #[serde(skip)]
    pub original: AbiEvent,
    pub original_name: String,
    pub normalized_name: String,
    pub signature: String,
    /// Topic0 hash
    pub topic: String,
    pub inputs: Vec<NormalizedArgument>,
    pub declaration: String,
}

/// Result of classifying one contract ABI
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub calls: BTreeMap<String, NormalizedMethod>,
    pub transacts: BTreeMap<String, NormalizedMethod>,
    pub events: BTreeMap<String, NormalizedEvent>,
    pub constructor: Option<NormalizedMethod>,
    /// Canonical signature to map key, for methods and events
    pub signatures: BTreeMap<String, String>,
}

/// Whether a list of outputs can be returned as one named aggregate.
///
/// Needs at least two outputs, all named, with distinct non-empty capitalized
/// names (`var` and `Var` collide).
pub fn is_structured_output(outputs: &[AbiParameter]) -> bool {
    if outputs.len() < 2 {
        return false;
    }

    let mut seen = HashSet::new();
    for output in outputs {
        if output.name.is_empty() {
            return false;
        }
        let field = capitalize(&output.name);
        if field.is_empty() || !seen.insert(field) {
            return false;
        }
    }
    true
}

/// Classifies the entries of one contract ABI against a binding target
pub struct Classifier<'a> {
    target: &'a dyn Target,
    customs: &'a Customs,
}

impl<'a> Classifier<'a> {
    pub fn new(target: &'a dyn Target, customs: &'a Customs) -> Self {
        Self { target, customs }
    }

    /// Classify methods, then events, then the constructor
    pub fn classify(
        &self,
        abi: &EthereumAbi,
        registry: &mut StructRegistry,
    ) -> Result<Classification> {
        let mut classification = Classification::default();
        let mut method_keys = KeySpace::default();

        for function in &abi.functions {
            if !self.customs.includes_method(&function.name) {
                debug!(method = %function.name, "Method not in allow-list, skipping");
                continue;
            }

            let key = method_keys.claim(&function.name, self.target);
            let method = self.normalize_method(function, &key, registry)?;
            classification
                .signatures
                .insert(method.original_signature.clone(), key.clone());

            if method.read_only {
                classification.calls.insert(key, method);
            } else {
                classification.transacts.insert(key, method);
            }
        }

        let mut event_keys = KeySpace::default();
        for event in &abi.events {
            if event.anonymous {
                debug!(event = %event.name, "Anonymous event, skipping");
                continue;
            }

            let key = event_keys.claim(&event.name, self.target);
            let normalized = self.normalize_event(event, &key, registry)?;
            classification
                .signatures
                .insert(normalized.signature.clone(), key.clone());
            classification.events.insert(key, normalized);
        }

        if let Some(constructor) = &abi.constructor {
            classification.constructor =
                Some(self.normalize_method(constructor, "", registry)?);
        }

        Ok(classification)
    }

    fn normalize_method(
        &self,
        function: &AbiFunction,
        key: &str,
        registry: &mut StructRegistry,
    ) -> Result<NormalizedMethod> {
        let inputs = self.normalize_inputs(&function.inputs, registry)?;

        let mut outputs = Vec::with_capacity(function.outputs.len());
        for output in &function.outputs {
            outputs.push(NormalizedArgument {
                name: capitalize(&output.name),
                ty: output.ty.clone(),
                bound_type: self.target.map_type(&output.ty, registry)?,
                indexed: false,
            });
        }

        Ok(NormalizedMethod {
            original: function.clone(),
            original_name: function.name.clone(),
            original_signature: function.signature(),
            selector: function.selector(),
            normalized_name: self.target.method_name(key),
            inputs,
            outputs,
            read_only: function.is_constant(),
            payable: function.is_payable(),
            structured_output: is_structured_output(&function.outputs),
            declaration: String::new(),
        })
    }

    fn normalize_event(
        &self,
        event: &AbiEvent,
        key: &str,
        registry: &mut StructRegistry,
    ) -> Result<NormalizedEvent> {
        Ok(NormalizedEvent {
            original: event.clone(),
            original_name: event.name.clone(),
            normalized_name: self.target.method_name(key),
            signature: event.signature(),
            topic: event.topic(),
            inputs: self.normalize_inputs(&event.inputs, registry)?,
            declaration: String::new(),
        })
    }

    fn normalize_inputs(
        &self,
        params: &[AbiParameter],
        registry: &mut StructRegistry,
    ) -> Result<Vec<NormalizedArgument>> {
        params
            .iter()
            .enumerate()
            .map(|(i, param)| {
                let bound_type = if param.indexed {
                    self.target.map_topic_type(&param.ty, registry)?
                } else {
                    self.target.map_type(&param.ty, registry)?
                };
                let name = if param.name.is_empty() {
                    format!("arg{}", i)
                } else {
                    param.name.clone()
                };
                Ok(NormalizedArgument {
                    name,
                    ty: param.ty.clone(),
                    bound_type,
                    indexed: param.indexed,
                })
            })
            .collect()
    }
}

/// Keys and target-language names already handed out in one namespace
#[derive(Default)]
struct KeySpace {
    keys: HashSet<String>,
    names: HashSet<String>,
}

impl KeySpace {
    /// Bare name for the first entry, then the first free `name{N}`.
    ///
    /// A key is free only if its normalized name is free too, so `foo` and
    /// `Foo` never both become the Go method `Foo`.
    fn claim(&mut self, name: &str, target: &dyn Target) -> String {
        let mut key = name.to_string();
        let mut n = 0;
        while self.keys.contains(&key) || self.names.contains(&target.method_name(&key)) {
            key = format!("{}{}", name, n);
            n += 1;
        }
        if key != name {
            debug!(name = %name, key = %key, "Disambiguated method or event name");
        }

        self.names.insert(target.method_name(&key));
        self.keys.insert(key.clone());
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::mapper::target_for;
    use crate::codegen::parser::AbiParser;
    use solbind_core::config::Language;
    use solbind_core::platform::Platform;

    fn output(name: &str) -> AbiParameter {
        AbiParameter {
            name: name.to_string(),
            ty: AbiType::Uint(256),
            internal_type: None,
            indexed: false,
        }
    }

    fn classify(abi: &str, customs: &Customs) -> (Classification, StructRegistry) {
        let abi = AbiParser::new().parse_content(abi).unwrap();
        let target = target_for(Language::Go, Platform::Ethereum);
        let mut registry = StructRegistry::new();
        let classification = Classifier::new(target.as_ref(), customs)
            .classify(&abi, &mut registry)
            .unwrap();
        (classification, registry)
    }

    #[test]
    fn test_structured_output_rules() {
        assert!(!is_structured_output(&[]));
        assert!(!is_structured_output(&[output("sum")]));
        assert!(!is_structured_output(&[output("sum"), output("")]));
        assert!(!is_structured_output(&[output("var"), output("Var")]));
        assert!(!is_structured_output(&[output("_var"), output("var")]));
        assert!(!is_structured_output(&[output("_"), output("b")]));
        assert!(is_structured_output(&[output("sum"), output("prod")]));
    }

    #[test]
    fn test_anonymous_inputs_get_positional_names() {
        let (classification, _) = classify(
            r#"[{"type": "function", "name": "set", "stateMutability": "nonpayable",
                 "inputs": [{"name": "", "type": "uint8"}, {"name": "value", "type": "string"}],
                 "outputs": []}]"#,
            &Customs::default(),
        );

        let method = &classification.transacts["set"];
        assert_eq!(method.inputs[0].name, "arg0");
        assert_eq!(method.inputs[1].name, "value");
        assert_eq!(method.normalized_name, "Set");
        assert!(!method.read_only);
    }

    #[test]
    fn test_overloads_get_unique_keys() {
        let (classification, _) = classify(
            r#"[
              {"type": "function", "name": "mint", "stateMutability": "nonpayable",
               "inputs": [{"name": "to", "type": "address"}], "outputs": []},
              {"type": "function", "name": "mint", "stateMutability": "nonpayable",
               "inputs": [{"name": "to", "type": "address"}, {"name": "amount", "type": "uint256"}],
               "outputs": []},
              {"type": "function", "name": "mint0", "stateMutability": "view",
               "inputs": [], "outputs": []},
              {"type": "function", "name": "mint", "stateMutability": "payable",
               "inputs": [], "outputs": []}
            ]"#,
            &Customs::default(),
        );

        let keys: Vec<_> = classification.transacts.keys().cloned().collect();
        assert_eq!(keys, ["mint", "mint0", "mint1"]);
        assert_eq!(classification.calls["mint00"].original_name, "mint0");
        assert_eq!(classification.transacts["mint1"].normalized_name, "Mint1");
        assert!(classification.transacts["mint1"].payable);
        assert_eq!(classification.signatures["mint(address,uint256)"], "mint0");
        assert_eq!(classification.signatures["mint()"], "mint1");
        assert_eq!(classification.signatures["mint0()"], "mint00");
    }

    #[test]
    fn test_case_clashes_get_unique_names() {
        let (classification, _) = classify(
            r#"[
              {"type": "function", "name": "foo", "stateMutability": "view",
               "inputs": [], "outputs": []},
              {"type": "function", "name": "Foo", "stateMutability": "view",
               "inputs": [], "outputs": []},
              {"type": "function", "name": "_foo", "stateMutability": "nonpayable",
               "inputs": [], "outputs": []}
            ]"#,
            &Customs::default(),
        );

        let mut names: Vec<_> = classification
            .calls
            .values()
            .chain(classification.transacts.values())
            .map(|method| method.normalized_name.as_str())
            .collect();
        names.sort();
        assert_eq!(names, ["Foo", "Foo0", "Foo1"]);
        assert_eq!(classification.calls["foo"].normalized_name, "Foo");
        assert_eq!(classification.calls["Foo0"].original_name, "Foo");
        assert_eq!(classification.transacts["_foo1"].normalized_name, "Foo1");
        assert_eq!(classification.signatures["Foo()"], "Foo0");
    }

    #[test]
    fn test_allow_list_filters_methods() {
        let mut customs = Customs::default();
        customs.methods.insert("keep".to_string(), true);
        customs.methods.insert("drop".to_string(), false);

        let (classification, _) = classify(
            r#"[
              {"type": "function", "name": "keep", "stateMutability": "view", "inputs": [], "outputs": []},
              {"type": "function", "name": "drop", "stateMutability": "view", "inputs": [], "outputs": []},
              {"type": "function", "name": "unlisted", "stateMutability": "view", "inputs": [], "outputs": []}
            ]"#,
            &customs,
        );

        let keys: Vec<_> = classification.calls.keys().cloned().collect();
        assert_eq!(keys, ["keep"]);
    }

    #[test]
    fn test_events_resolve_topics_and_skip_anonymous() {
        let (classification, registry) = classify(
            r#"[
              {"type": "event", "name": "Registered", "anonymous": false, "inputs": [
                {"name": "", "type": "string", "indexed": true},
                {"name": "info", "type": "tuple", "indexed": false,
                 "components": [{"name": "id", "type": "bytes8"}, {"name": "owner", "type": "address"}]}
              ]},
              {"type": "event", "name": "Hidden", "anonymous": true, "inputs": [
                {"name": "value", "type": "uint256", "indexed": true}
              ]}
            ]"#,
            &Customs::default(),
        );

        assert_eq!(classification.events.len(), 1);
        let event = &classification.events["Registered"];
        assert_eq!(event.inputs[0].name, "arg0");
        assert_eq!(event.inputs[0].bound_type, "common.Hash");
        assert!(event.inputs[0].indexed);
        assert_eq!(event.inputs[1].bound_type, "Struct0");
        assert_eq!(event.signature, "Registered(string,(bytes8,address))");
        assert!(event.topic.starts_with("0x"));
        assert_eq!(event.topic.len(), 66);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_constructor_is_classified_last() {
        let (classification, registry) = classify(
            r#"[
              {"type": "constructor", "stateMutability": "nonpayable", "inputs": [
                {"name": "config", "type": "tuple", "components": [{"name": "admin", "type": "address"}]}
              ]},
              {"type": "function", "name": "get", "stateMutability": "view", "inputs": [],
               "outputs": [{"name": "", "type": "tuple", "components": [{"name": "ok", "type": "bool"}]}]}
            ]"#,
            &Customs::default(),
        );

        let constructor = classification.constructor.unwrap();
        assert_eq!(constructor.inputs[0].bound_type, "Struct1");
        assert_eq!(classification.calls["get"].outputs[0].bound_type, "Struct0");
        assert_eq!(registry.len(), 2);
    }
}

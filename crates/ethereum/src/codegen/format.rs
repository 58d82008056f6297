//! Human-readable Solidity signatures for generated doc comments

use solbind_core::types::AbiType;

use super::classifier::{NormalizedEvent, NormalizedMethod};
use super::parser::AbiParameter;
use super::registry::StructRegistry;

/// Type of an argument with registered tuples replaced by their struct name
fn resolve_arg_type(ty: &AbiType, structs: &StructRegistry) -> String {
    let mut prefix = String::new();
    let mut inner = ty;
    loop {
        inner = match inner {
            AbiType::Slice(elem) => {
                prefix.push_str("[]");
                elem
            }
            AbiType::Array(elem, size) => {
                prefix.push_str(&format!("[{}]", size));
                elem
            }
            _ => break,
        };
    }

    match structs.get(&inner.signature()) {
        Some(descriptor) => format!("{}{}", prefix, descriptor.name),
        None => ty.signature(),
    }
}

fn format_param(param: &AbiParameter, structs: &StructRegistry, indexed: bool) -> String {
    let mut out = resolve_arg_type(&param.ty, structs);
    if indexed {
        out.push_str(" indexed");
    }
    if !param.name.is_empty() {
        out.push(' ');
        out.push_str(&param.name);
    }
    out
}

fn format_params(params: &[AbiParameter], structs: &StructRegistry) -> String {
    params
        .iter()
        .map(|param| format_param(param, structs, false))
        .collect::<Vec<_>>()
        .join(", ")
}

/// e.g. `function balanceOf(address owner) constant returns(uint256)`
pub fn format_method(method: &NormalizedMethod, structs: &StructRegistry) -> String {
    let constant = if method.read_only { "constant " } else { "" };

    format!(
        "function {}({}) {}returns({})",
        method.original_name,
        format_params(&method.original.inputs, structs),
        constant,
        format_params(&method.original.outputs, structs)
    )
}

/// e.g. `constructor(string name, uint8 decimals)`
pub fn format_constructor(constructor: &NormalizedMethod, structs: &StructRegistry) -> String {
    format!("constructor({})", format_params(&constructor.original.inputs, structs))
}

/// e.g. `event Transfer(address indexed from, address indexed to, uint256 value)`
pub fn format_event(event: &NormalizedEvent, structs: &StructRegistry) -> String {
    let inputs: Vec<String> = event
        .original
        .inputs
        .iter()
        .map(|input| format_param(input, structs, input.indexed))
        .collect();

    format!("event {}({})", event.original_name, inputs.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::classifier::Classifier;
    use crate::codegen::mapper::target_for;
    use crate::codegen::parser::AbiParser;
    use solbind_core::config::{Customs, Language};
    use solbind_core::platform::Platform;

    const ABI: &str = r#"[
      {"type": "function", "name": "balanceOf", "stateMutability": "view",
       "inputs": [{"name": "owner", "type": "address"}],
       "outputs": [{"name": "", "type": "uint256"}]},
      {"type": "function", "name": "register", "stateMutability": "nonpayable",
       "inputs": [{"name": "accounts", "type": "tuple[2][]",
                   "components": [{"name": "owner", "type": "address"},
                                  {"name": "level", "type": "uint8"}]}],
       "outputs": [{"name": "count", "type": "uint8[3]"}]},
      {"type": "event", "name": "Transfer", "anonymous": false, "inputs": [
        {"name": "from", "type": "address", "indexed": true},
        {"name": "to", "type": "address", "indexed": true},
        {"name": "value", "type": "uint256", "indexed": false}]}
    ]"#;

    #[test]
    fn test_format_signatures() {
        let abi = AbiParser::new().parse_content(ABI).unwrap();
        let target = target_for(Language::Go, Platform::Ethereum);
        let customs = Customs::default();
        let mut registry = StructRegistry::new();
        let classification = Classifier::new(target.as_ref(), &customs)
            .classify(&abi, &mut registry)
            .unwrap();

        assert_eq!(
            format_method(&classification.calls["balanceOf"], &registry),
            "function balanceOf(address owner) constant returns(uint256)"
        );
        assert_eq!(
            format_method(&classification.transacts["register"], &registry),
            "function register([][2]Struct0 accounts) returns(uint8[3] count)"
        );
        assert_eq!(
            format_event(&classification.events["Transfer"], &registry),
            "event Transfer(address indexed from, address indexed to, uint256 value)"
        );
    }

    #[test]
    fn test_format_constructor() {
        let abi = AbiParser::new()
            .parse_content(
                r#"[{"type": "constructor", "stateMutability": "nonpayable", "inputs": [
                      {"name": "name", "type": "string"},
                      {"name": "", "type": "tuple", "components": [{"name": "ok", "type": "bool"}]}
                    ]}]"#,
            )
            .unwrap();
        let target = target_for(Language::Go, Platform::Ethereum);
        let customs = Customs::default();
        let mut registry = StructRegistry::new();
        let classification = Classifier::new(target.as_ref(), &customs)
            .classify(&abi, &mut registry)
            .unwrap();

        assert_eq!(
            format_constructor(&classification.constructor.unwrap(), &registry),
            "constructor(string name, Struct0)"
        );
    }
}

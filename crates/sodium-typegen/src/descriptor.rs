//! Corpus descriptor records as they appear in libsodium.js `wrapper/` files.

use serde::{Deserialize, Serialize};

/// One exported function (`wrapper/symbols/<name>.json`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SymbolDescriptor {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<ParameterDescriptor>,
    #[serde(default)]
    pub outputs: Vec<ParameterDescriptor>,
    /// Raw return token or pseudo-expression. `None` means the function returns nothing.
    #[serde(default, rename = "return", skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    #[serde(default, rename = "noOutputFormat")]
    pub no_output_format: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub assert_retval: Vec<RetvalAssertion>,
}

impl SymbolDescriptor {
    /// Build a hand-authored symbol that never offers an output-format selector.
    pub fn helper(name: &str, inputs: &[(&str, &str)], returns: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            inputs: inputs
                .iter()
                .map(|(name, ty)| ParameterDescriptor::new(name, ty))
                .collect(),
            returns: returns.map(String::from),
            no_output_format: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    /// Size expression; informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<serde_json::Value>,
    #[serde(default)]
    pub optional: bool,
}

impl ParameterDescriptor {
    pub fn new(name: &str, ty: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetvalAssertion {
    pub condition: String,
    pub or_else_throw: String,
}

/// One entry of `wrapper/constants.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl ConstantDescriptor {
    pub fn new(name: &str, ty: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.to_string(),
        }
    }
}

/// Loaded corpus: both collections sorted by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    pub functions: Vec<SymbolDescriptor>,
    pub constants: Vec<ConstantDescriptor>,
}

//! Template context shared by the property file renderers.

use std::collections::BTreeMap;

use serde::Serialize;

use super::Descriptor;

/// Top-level map handed to a property file template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    /// Id of the compiler selected by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_compiler: Option<String>,

    /// Path to `llvm-cxxfilt`.
    pub demangler: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub objdumper: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub llvm_disassembler: Option<String>,

    /// Descriptors keyed by compiler id.
    pub compiler: BTreeMap<String, Descriptor>,
}

impl Context {
    /// A context sharing this one's tool paths but no compilers.
    pub fn with_shared_tools(&self) -> Self {
        Self {
            default_compiler: None,
            demangler: self.demangler.clone(),
            objdumper: self.objdumper.clone(),
            llvm_disassembler: self.llvm_disassembler.clone(),
            compiler: BTreeMap::new(),
        }
    }
}

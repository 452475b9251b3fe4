//! Compiler descriptors.
//!
//! A descriptor is the attribute map the service reads for one compiler:
//! `compiler.<id>.<field>=<value>`. Fields are only present when they apply
//! to the toolchain and platform.

use std::collections::BTreeMap;

use serde::Serialize;

/// Attributes the service understands for a compiler entry.
///
/// Serialized in camelCase; descriptors list their fields in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Exe,
    Options,
    IntelAsm,
    NeedsMulti,
    SupportsBinary,
    SupportsBinaryObject,
    SupportsExecute,
    VersionFlag,
    VersionRe,
    CompilerType,
    Interpreted,
    Emulated,
    ExecutionWrapper,
    ExecutionWrapperArgs,
    Demangler,
    DemanglerArgs,
    DemanglerType,
    Objdumper,
    ObjdumperArgs,
    ObjdumperType,
    InstructionSet,
    IncludeFlag,
    IncludePath,
    LibPath,
    UnwiseOptions,
}

/// Attribute map for one detected compiler or JIT.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Descriptor {
    fields: BTreeMap<Field, String>,
}

impl Descriptor {
    /// A descriptor with the two mandatory fields.
    pub fn new(name: impl Into<String>, exe: impl Into<String>) -> Self {
        let mut descriptor = Self::default();
        descriptor.set(Field::Name, name).set(Field::Exe, exe);
        descriptor
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> &mut Self {
        self.fields.insert(field, value.into());
        self
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Retract a field set by an earlier stage.
    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.fields.remove(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    /// Display name, empty if not set yet.
    pub fn name(&self) -> &str {
        self.get(Field::Name).unwrap_or_default()
    }

    /// Executable path, empty if not set yet.
    pub fn exe(&self) -> &str {
        self.get(Field::Exe).unwrap_or_default()
    }
}

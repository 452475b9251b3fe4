//! Environment variable maps reported by toolchain environments.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{PlaygroundError, Result};

/// Variables exported by one activated toolchain environment.
///
/// Read-only from the builders' point of view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct EnvVars {
    vars: BTreeMap<String, String>,
}

impl EnvVars {
    /// Snapshot of the current process environment.
    ///
    /// Variables that are not valid Unicode are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// Look up a variable that must be present.
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| PlaygroundError::MissingVariable {
            name: name.to_string(),
        })
    }

    /// Look up an optional variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_flat_json_object() {
        let vars: EnvVars =
            serde_json::from_str(r#"{"CC": "gcc", "PATH": "/opt/gcc/bin"}"#).unwrap();
        assert_eq!(vars.get("CC"), Some("gcc"));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn require_reports_missing_variable() {
        let vars: EnvVars = [("CC", "gcc")].into_iter().collect();
        assert_eq!(vars.require("CC").unwrap(), "gcc");
        let err = vars.require("CFLAGS").unwrap_err();
        assert!(matches!(err, PlaygroundError::MissingVariable { ref name } if name == "CFLAGS"));
    }

    #[test]
    fn from_process_sees_current_environment() {
        let vars = EnvVars::from_process();
        assert!(!vars.is_empty());
    }
}

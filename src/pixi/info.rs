//! JSON shapes returned by the environment manager.

use std::path::PathBuf;

use serde::Deserialize;

/// Output of `info --json`; only the environment list is used.
#[derive(Debug, Clone, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub environments_info: Vec<EnvironmentInfo>,
}

impl Info {
    /// Environments whose name starts with `prefix`.
    pub fn environments_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a EnvironmentInfo> + 'a {
        self.environments_info
            .iter()
            .filter(move |env| env.name.starts_with(prefix))
    }
}

/// One named environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnvironmentInfo {
    pub name: String,
    pub prefix: PathBuf,
}

/// One entry of `ls --json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_info_and_ignores_other_keys() {
        let info: Info = serde_json::from_str(
            r#"{
                "platform": "linux-64",
                "environments_info": [
                    {"name": "nb-cuda", "prefix": "/opt/nb", "features": ["cuda"]},
                    {"name": "gpu", "prefix": "/opt/gpu"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(info.environments_info.len(), 2);
        assert_eq!(info.environments_info[0].prefix, PathBuf::from("/opt/nb"));
    }

    #[test]
    fn filters_environments_by_prefix() {
        let info: Info = serde_json::from_str(
            r#"{"environments_info":[{"name":"nb-cuda","prefix":"/opt/nb"},{"name":"gpu","prefix":"/opt/gpu"},{"name":"nb","prefix":"/opt/nb0"}]}"#,
        )
        .unwrap();
        let names: Vec<_> = info
            .environments_with_prefix("nb")
            .map(|env| env.name.as_str())
            .collect();
        assert_eq!(names, vec!["nb-cuda", "nb"]);
    }

    #[test]
    fn parses_package_list() {
        let packages: Vec<Package> = serde_json::from_str(
            r#"[{"name":"numba","version":"0.61.2","build":"py313h","is_explicit":true}]"#,
        )
        .unwrap();
        assert_eq!(packages[0].version, "0.61.2");
    }
}

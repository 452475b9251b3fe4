//! Start-up query group.
//!
//! `info --json` and one inspection per toolchain environment are launched
//! together and joined as a unit: the first failure aborts the group.

use std::collections::BTreeMap;

use futures::future::try_join_all;

use super::{EnvManager, EnvVars, Info};
use crate::config::Platform;
use crate::error::{PlaygroundError, Result};
use crate::toolchain::Toolchain;

/// Result of probing the environment manager.
#[derive(Debug, Clone)]
pub struct Probe {
    /// Every environment the manager knows about.
    pub info: Info,

    /// Activated variable maps, one per inspected toolchain.
    pub environments: BTreeMap<Toolchain, EnvVars>,
}

/// Toolchain environments inspected on `platform`.
pub fn inspected_toolchains(platform: Platform) -> &'static [Toolchain] {
    match platform {
        Platform::Linux => &[Toolchain::Clang, Toolchain::Intel, Toolchain::Gcc],
        Platform::Darwin => &[Toolchain::Clang],
        Platform::Windows => &[
            Toolchain::Clang,
            Toolchain::Intel,
            Toolchain::Gcc,
            Toolchain::Msvc,
        ],
    }
}

/// Task that prints the activated environment as JSON.
///
/// The MinGW environment on Windows runs an activation script that writes
/// to stdout first, so it uses a variant task whose output is trimmed.
fn inspect_task(platform: Platform, toolchain: Toolchain) -> &'static str {
    match (platform, toolchain) {
        (Platform::Windows, Toolchain::Gcc) => "_inspect2",
        _ => "_inspect",
    }
}

/// Query `info --json` and every toolchain environment concurrently.
pub async fn probe(manager: &dyn EnvManager, platform: Platform) -> Result<Probe> {
    let info = async {
        let stdout = manager.run(&["info", "--json"]).await?;
        Ok::<Info, PlaygroundError>(serde_json::from_slice(&stdout)?)
    };
    let inspections = try_join_all(
        inspected_toolchains(platform)
            .iter()
            .map(|&toolchain| inspect(manager, platform, toolchain)),
    );

    let (info, environments) = tokio::try_join!(info, inspections)?;
    tracing::debug!(
        "Probed {} environments and {} toolchains",
        info.environments_info.len(),
        environments.len()
    );

    Ok(Probe {
        info,
        environments: environments.into_iter().collect(),
    })
}

async fn inspect(
    manager: &dyn EnvManager,
    platform: Platform,
    toolchain: Toolchain,
) -> Result<(Toolchain, EnvVars)> {
    let task = inspect_task(platform, toolchain);
    let stdout = manager.run(&["r", "-e", toolchain.key(), task]).await?;
    let json = if task == "_inspect2" {
        trim_to_json(&stdout).ok_or_else(|| {
            anyhow::anyhow!("No JSON object in output of task {task} for {toolchain}")
        })?
    } else {
        &stdout[..]
    };
    Ok((toolchain, serde_json::from_slice(json)?))
}

/// Drop everything before the first `{"`.
fn trim_to_json(stdout: &[u8]) -> Option<&[u8]> {
    stdout
        .windows(2)
        .position(|w| w == b"{\"")
        .map(|start| &stdout[start..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixi::testing::FakeManager;

    const INFO: &str = r#"{"environments_info":[{"name":"clang","prefix":"/opt/clang"}]}"#;

    #[tokio::test]
    async fn probes_linux_toolchains() {
        let manager = FakeManager::new()
            .respond("info --json", INFO)
            .respond("r -e clang _inspect", r#"{"CC":"clang"}"#)
            .respond("r -e intel _inspect", r#"{"CC":"icx"}"#)
            .respond("r -e gcc _inspect", r#"{"CC":"gcc"}"#);

        let probe = probe(&manager, Platform::Linux).await.unwrap();

        assert_eq!(probe.info.environments_info[0].name, "clang");
        assert_eq!(probe.environments.len(), 3);
        assert_eq!(probe.environments[&Toolchain::Intel].get("CC"), Some("icx"));
        assert_eq!(manager.calls().len(), 4);
    }

    #[tokio::test]
    async fn darwin_only_inspects_clang() {
        let manager = FakeManager::new()
            .respond("info --json", INFO)
            .respond("r -e clang _inspect", r#"{"CC":"clang"}"#);

        let probe = probe(&manager, Platform::Darwin).await.unwrap();

        assert_eq!(
            probe.environments.keys().copied().collect::<Vec<_>>(),
            vec![Toolchain::Clang]
        );
    }

    #[tokio::test]
    async fn windows_gcc_output_is_trimmed() {
        let manager = FakeManager::new()
            .respond("info --json", INFO)
            .respond("r -e clang _inspect", r#"{"CC":"clang-cl"}"#)
            .respond("r -e intel _inspect", r#"{"CC":"icx"}"#)
            .respond(
                "r -e gcc _inspect2",
                "activating msys2\r\n{\"CC\":\"gcc\",\"OBJDUMP\":\"objdump\"}",
            )
            .respond("r -e msvc _inspect", r#"{"CC":"cl"}"#);

        let probe = probe(&manager, Platform::Windows).await.unwrap();

        assert_eq!(
            probe.environments[&Toolchain::Gcc].get("OBJDUMP"),
            Some("objdump")
        );
        assert_eq!(probe.environments.len(), 4);
    }

    #[tokio::test]
    async fn failing_member_fails_the_group() {
        let manager = FakeManager::new()
            .respond("info --json", INFO)
            .respond("r -e clang _inspect", r#"{"CC":"clang"}"#)
            .fail("r -e intel _inspect", 7)
            .respond("r -e gcc _inspect", r#"{"CC":"gcc"}"#);

        let err = probe(&manager, Platform::Linux).await.unwrap_err();

        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn trim_to_json_finds_object_start() {
        assert_eq!(trim_to_json(b"noise {\"A\":1}"), Some(&b"{\"A\":1}"[..]));
        assert_eq!(trim_to_json(b"no json here"), None);
    }
}

//! Configure command implementation.
//!
//! The `ce-playground configure` command runs the whole setup: unpack the
//! bundle, probe pixi, then write the C, C++ and Numba property files.

use async_trait::async_trait;

use crate::config::Settings;
use crate::error::Result;
use crate::numba;
use crate::pixi::{probe, EnvManager, EnvVars, Pixi};
use crate::render::Renderer;
use crate::toolchain::{c, cpp, CommandProbe, Toolchains, VersionProbe};
use crate::unpack::unpack;

use super::dispatcher::Command;

/// The configure command implementation.
pub struct ConfigureCommand<'a> {
    settings: &'a Settings,
}

impl<'a> ConfigureCommand<'a> {
    /// Create a new configure command.
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }
}

#[async_trait(?Send)]
impl Command for ConfigureCommand<'_> {
    async fn execute(&self) -> Result<()> {
        if !self.settings.skip_unpack {
            unpack(&self.settings.archive, &self.settings.layout)?;
        }
        let manager = Pixi::new(self.settings.pixi.clone());
        let host = EnvVars::from_process();
        configure(self.settings, &manager, &CommandProbe, &host).await?;
        Ok(())
    }
}

/// Renderer for `settings`: a template directory if given, else the
/// embedded templates.
pub fn renderer(settings: &Settings) -> Result<Renderer> {
    match &settings.templates {
        Some(dir) => Ok(Renderer::from_dir(dir)),
        None => Renderer::embedded(),
    }
}

/// Probe the environments and write every property file.
pub async fn configure(
    settings: &Settings,
    manager: &dyn EnvManager,
    version_probe: &dyn VersionProbe,
    host: &EnvVars,
) -> Result<()> {
    let renderer = renderer(settings)?;
    let layout = &settings.layout;
    let probed = probe(manager, settings.platform).await?;

    let toolchains = Toolchains {
        platform: settings.platform,
        environments: &probed.environments,
        host,
        probe: version_probe,
    };
    let c_context = c::local_properties(layout, &renderer, &toolchains)?;
    cpp::local_properties(&c_context, layout, &renderer, &toolchains)?;

    numba::local_properties(
        layout,
        &renderer,
        manager,
        settings.platform,
        &probed.info,
        &c_context.demangler,
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Layout, Platform};
    use crate::pixi::testing::FakeManager;
    use crate::toolchain::VersionQuery;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    struct Banner;

    impl VersionProbe for Banner {
        fn banner(&self, _exe: &str, _query: VersionQuery) -> Result<String> {
            Ok("version 15.1.0".to_string())
        }
    }

    fn tools(dir: &Path, names: &[&str]) {
        fs::create_dir_all(dir).unwrap();
        for name in names {
            let path = dir.join(name);
            fs::write(&path, "#!/bin/sh\n").unwrap();
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            }
        }
    }

    fn inspect(bin: &Path, vars: &[(&str, &str)]) -> String {
        let mut map = serde_json::Map::new();
        map.insert("PATH".into(), bin.to_string_lossy().into_owned().into());
        map.insert(
            "CONDA_PREFIX".into(),
            bin.parent().unwrap().to_string_lossy().into_owned().into(),
        );
        for (k, v) in vars {
            map.insert(k.to_string(), v.to_string().into());
        }
        serde_json::Value::Object(map).to_string()
    }

    #[tokio::test]
    async fn writes_every_property_file_on_linux() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let clang = root.join("envs/clang/bin");
        let gcc = root.join("envs/gcc/bin");
        let intel = root.join("envs/intel/bin");
        let nb = root.join("envs/nb");
        tools(&clang, &["clang", "clang++", "llvm-cxxfilt", "llvm-dis"]);
        tools(&gcc, &["gcc", "g++", "objdump"]);
        tools(&intel, &["icx", "icpx"]);
        tools(&nb.join("bin"), &["python"]);

        let info = serde_json::json!({
            "environments_info": [
                {"name": "nb", "prefix": nb},
                {"name": "gcc", "prefix": root.join("envs/gcc")},
            ]
        })
        .to_string();
        let manager = FakeManager::new()
            .respond("info --json", &info)
            .respond(
                "r -e clang _inspect",
                &inspect(&clang, &[("CC", "clang"), ("CXX", "clang++")]),
            )
            .respond(
                "r -e gcc _inspect",
                &inspect(&gcc, &[("CC", "gcc"), ("CXX", "g++"), ("OBJDUMP", "objdump")]),
            )
            .respond(
                "r -e intel _inspect",
                &inspect(
                    &intel,
                    &[("CC", "icx"), ("CXX", "icpx"), ("CONDA_BUILD_SYSROOT", "/sysroot")],
                ),
            )
            .respond(
                "ls -e nb --json ^numba$",
                r#"[{"name":"numba","version":"0.61.2"}]"#,
            );

        let mut settings = Settings::new(Platform::Linux);
        settings.layout = Layout::new(root.join("ce"));
        let wrapper = settings.layout.numba_wrapper();
        fs::create_dir_all(wrapper.parent().unwrap()).unwrap();
        fs::write(&wrapper, "import sys\n").unwrap();

        configure(&settings, &manager, &Banner, &EnvVars::default())
            .await
            .unwrap();

        let c = fs::read_to_string(settings.layout.c_properties()).unwrap();
        assert!(c.starts_with("compilers=cclang:cgcc:cintel\ndefaultCompiler=gcc\n"));
        assert!(c.contains("compiler.cintel.compilerType=clang-intel\n"));

        let cpp = fs::read_to_string(settings.layout.cpp_properties()).unwrap();
        assert!(cpp.starts_with("compilers=clang:gcc:intel\ndefaultCompiler=gcc\n"));
        assert!(cpp.contains("compiler.gcc.options=-std=c++2c\n"));

        let numba = fs::read_to_string(settings.layout.numba_properties()).unwrap();
        assert!(numba.starts_with("compilers=nb\ndefaultCompiler=nb\n"));
        assert!(settings.layout.version_flag_py().exists());
        assert!(!settings.layout.version_flag_txt().exists());
    }

    #[tokio::test]
    async fn probe_failure_stops_before_writing() {
        let temp = TempDir::new().unwrap();
        let manager = FakeManager::new().fail("info --json", 3);
        let mut settings = Settings::new(Platform::Darwin);
        settings.layout = Layout::new(temp.path().join("ce"));

        let err = configure(&settings, &manager, &Banner, &EnvVars::default())
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), 3);
        assert!(!settings.layout.c_properties().exists());
    }

    #[test]
    fn renderer_prefers_template_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("c.local.properties.jinja"), "custom").unwrap();
        let mut settings = Settings::new(Platform::Linux);
        settings.templates = Some(temp.path().to_path_buf());

        let out = renderer(&settings)
            .unwrap()
            .render("c.local.properties.jinja", &serde_json::json!({}))
            .unwrap();

        assert_eq!(out, "custom");
    }
}

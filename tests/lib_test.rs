//! Library integration tests.

use ce_playground::config::{Layout, Platform, Settings};
use ce_playground::PlaygroundError;

#[test]
fn error_types_are_public() {
    let err = PlaygroundError::ToolNotFound {
        tool: "llvm-cxxfilt".into(),
    };
    assert!(err.to_string().contains("llvm-cxxfilt"));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn command_failures_keep_their_exit_code() {
    let err = PlaygroundError::CommandFailed {
        command: "pixi -q info --json".into(),
        code: Some(4),
    };
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> ce_playground::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use ce_playground::cli::{Cli, Commands};
    use clap::Parser;

    let cli = Cli::parse_from(["ce-playground", "unpack", "--target", "/srv/ce"]);
    assert!(matches!(cli.command, Some(Commands::Unpack)));

    let settings = cli.settings(Platform::Darwin);
    assert_eq!(settings.layout, Layout::new("/srv/ce"));
    assert_eq!(settings.platform, Platform::Darwin);
}

#[test]
fn layout_places_generated_files() {
    let settings = Settings::new(Platform::Windows);
    let layout = settings.layout;
    assert!(layout.c_properties().ends_with("etc/config/c.local.properties"));
    assert!(layout.cpp_properties().ends_with("etc/config/c++.local.properties"));
    assert!(layout
        .numba_properties()
        .ends_with("etc/config/numba.local.properties"));
    assert!(layout.numba_wrapper().ends_with("etc/scripts/numba_wrapper.py"));
}

#[test]
fn embedded_templates_render() {
    use ce_playground::render::{Renderer, COMPILER_TEMPLATE};
    use ce_playground::toolchain::{Context, Descriptor};

    let mut ctx = Context {
        demangler: "llvm-cxxfilt".into(),
        ..Default::default()
    };
    ctx.compiler
        .insert("gcc".into(), Descriptor::new("g++ 15.1.0", "/opt/gcc/bin/g++"));

    let out = Renderer::embedded()
        .unwrap()
        .render(COMPILER_TEMPLATE, &ctx)
        .unwrap();

    assert!(out.starts_with("compilers=gcc\ndemangler=llvm-cxxfilt\n"));
    assert!(out.ends_with("compiler.gcc.exe=/opt/gcc/bin/g++\n"));
}

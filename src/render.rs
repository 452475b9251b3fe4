//! Property file rendering.
//!
//! Templates are embedded at compile time and loaded into a minijinja
//! environment built once per run. A template directory on disk can be used
//! instead when iterating on the output format.

use std::fs;
use std::path::Path;

use include_dir::{include_dir, Dir};
use minijinja::Environment;
use serde::Serialize;

use crate::error::Result;

/// Embedded templates directory.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Template shared by the C and C++ property files.
pub const COMPILER_TEMPLATE: &str = "c.local.properties.jinja";

/// Template for the Numba property file.
pub const NUMBA_TEMPLATE: &str = "numba.local.properties.jinja";

/// Renders contexts into property files.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Renderer over the templates compiled into the binary.
    pub fn embedded() -> Result<Self> {
        let mut env = Self::environment();
        for file in TEMPLATES_DIR.files() {
            let name = file.path().to_str().ok_or_else(|| {
                anyhow::anyhow!("Template name is not UTF-8: {}", file.path().display())
            })?;
            let source = file.contents_utf8().ok_or_else(|| {
                anyhow::anyhow!("Template {} is not valid UTF-8", name)
            })?;
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Renderer loading templates from `dir` on first use.
    pub fn from_dir(dir: &Path) -> Self {
        let mut env = Self::environment();
        env.set_loader(minijinja::path_loader(dir));
        Self { env }
    }

    fn environment() -> Environment<'static> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env
    }

    /// Render template `name` with `context`.
    pub fn render<S: Serialize>(&self, name: &str, context: &S) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(context)?)
    }

    /// Render template `name` and write the result to `path`.
    pub fn write<S: Serialize>(&self, name: &str, context: &S, path: &Path) -> Result<()> {
        let text = self.render(name, context)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, text)?;
        tracing::info!("Wrote {}", path.display());
        Ok(())
    }
}

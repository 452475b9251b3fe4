//! ce-playground - Compiler Explorer setup for pixi-managed toolchains.
//!
//! Discovers the C and C++ compilers and Numba interpreters installed in a
//! pixi workspace and writes them into the property files a local Compiler
//! Explorer tree reads at startup. The distribution bundle the tree ships in
//! can be unpacked first.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Host platform, output layout and run settings
//! - [`error`] - Error types and result aliases
//! - [`numba`] - Numba environments and the wrapper patch
//! - [`pixi`] - Environment manager client and prober
//! - [`render`] - Property file templates
//! - [`toolchain`] - Compiler descriptors for C and C++
//! - [`unpack`] - Distribution bundle unpacker
//!
//! # Example
//!
//! ```
//! use ce_playground::config::Platform;
//! use ce_playground::toolchain::{Language, Toolchain};
//!
//! assert_eq!(Toolchain::default_for(Platform::Linux), Toolchain::Gcc);
//! assert_eq!(Language::C.compiler_id(Toolchain::Clang), "cclang");
//! assert_eq!(Language::Cxx.compiler_id(Toolchain::Clang), "clang");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod numba;
pub mod pixi;
pub mod render;
pub mod toolchain;
pub mod unpack;

pub use error::{PlaygroundError, Result};

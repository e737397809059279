mod ast_scanner;
mod bundler;
mod module_finalizers;
mod module_loader;
mod runtime;
mod stages;
mod types;
mod utils;

pub use crate::{bundler::Bundler, types::bundle_output::BundleOutput};
pub use libpack_common::*;
pub use libpack_error::{BuildDiagnostic, BuildError, BuildResult, Stage};
pub use libpack_plugin::{
  Plugin, PluginError, PluginFilter, SfcScriptPlugin, SharedPlugin, TransformArgs,
  TransformOutput, TransformResult,
};

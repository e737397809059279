use std::sync::Arc;

use libpack_common::ModuleType;

use crate::PluginFilter;

pub type SharedPlugin = Arc<dyn Plugin>;

pub struct TransformArgs<'a> {
  /// Absolute path of the module.
  pub id: &'a str,
  /// Path relative to the project root, used in diagnostics.
  pub stable_id: &'a str,
  pub code: &'a str,
  /// `None` when the file extension is not one the core understands.
  pub module_type: Option<ModuleType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
  pub code: String,
  /// `Js` or `Ts`. Type annotations in `Ts` output are stripped by the core.
  pub module_type: ModuleType,
}

#[derive(Debug, thiserror::Error)]
pub enum PluginError {
  /// Positions are 1-based and refer to the source handed to the plugin.
  #[error("{message}")]
  Syntax { message: String, line: usize, column: usize },
  #[error("{0}")]
  Failed(String),
}

/// `Ok(None)` leaves the module untouched.
pub type TransformResult = Result<Option<TransformOutput>, PluginError>;

pub trait Plugin: Send + Sync {
  fn name(&self) -> &str;

  /// Modules whose id does not match are never handed to `transform`.
  fn filter(&self) -> PluginFilter;

  /// Extra extensions the resolver should probe, e.g. `.vue`.
  fn resolve_extensions(&self) -> &[&str] {
    &[]
  }

  fn transform(&self, args: &TransformArgs) -> TransformResult;
}

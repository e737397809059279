use std::sync::Arc;

use libpack_common::ModuleType;
use libpack_error::BuildDiagnostic;

use crate::{PluginError, PluginFilter, SharedPlugin, TransformArgs, TransformOutput};

pub type SharedPluginDriver = Arc<PluginDriver>;

/// Runs plugins in registration order, feeding the output of one into the next.
pub struct PluginDriver {
  plugins: Vec<(SharedPlugin, PluginFilter)>,
}

impl PluginDriver {
  pub fn new_shared(plugins: Vec<SharedPlugin>) -> SharedPluginDriver {
    let plugins = plugins
      .into_iter()
      .map(|plugin| {
        let filter = plugin.filter();
        (plugin, filter)
      })
      .collect();
    Arc::new(Self { plugins })
  }

  pub fn resolve_extensions(&self) -> Vec<&str> {
    self.plugins.iter().flat_map(|(plugin, _)| plugin.resolve_extensions()).copied().collect()
  }

  /// `Ok(None)` if no plugin touched the module.
  pub fn transform(
    &self,
    id: &str,
    stable_id: &str,
    code: &str,
    module_type: Option<ModuleType>,
  ) -> Result<Option<TransformOutput>, BuildDiagnostic> {
    let mut current: Option<TransformOutput> = None;
    for (plugin, filter) in &self.plugins {
      if !filter.matches(stable_id) {
        continue;
      }
      let args = TransformArgs {
        id,
        stable_id,
        code: current.as_ref().map_or(code, |output| output.code.as_str()),
        module_type: current.as_ref().map_or(module_type, |output| Some(output.module_type)),
      };
      match plugin.transform(&args) {
        Ok(Some(output)) => {
          tracing::debug!(plugin = plugin.name(), module = stable_id, "transformed");
          current = Some(output);
        }
        Ok(None) => {}
        Err(PluginError::Syntax { message, line, column }) => {
          return Err(BuildDiagnostic::syntax(stable_id, line, column, message));
        }
        Err(PluginError::Failed(message)) => {
          return Err(BuildDiagnostic::plugin(plugin.name(), stable_id, message));
        }
      }
    }
    Ok(current)
  }
}

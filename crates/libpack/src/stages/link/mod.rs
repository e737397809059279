mod sort_modules;

use libpack_common::{EntryPoint, IndexModules, ModuleIdx};
use libpack_utils::indexmap::FxIndexSet;
use rustc_hash::FxHashSet;

use super::scan::ScanStageOutput;

#[derive(Debug)]
pub struct LinkStageOutput {
  pub modules: IndexModules,
  pub entry_points: Vec<EntryPoint>,
  /// Normal modules in execution order.
  pub sorted_modules: Vec<ModuleIdx>,
  /// External modules in execution order.
  pub externals: Vec<ModuleIdx>,
  /// Names exported by the entry, sorted. `export *` from externals is not included.
  pub entry_exports: Vec<String>,
  /// Externals the entry re-exports through `export *`, directly or through other modules.
  pub entry_external_star_exports: Vec<ModuleIdx>,
  pub warnings: Vec<anyhow::Error>,
}

impl LinkStageOutput {
  pub fn entry(&self) -> ModuleIdx {
    self.entry_points[0].idx
  }
}

#[derive(Debug)]
pub struct LinkStage {
  pub modules: IndexModules,
  pub entry_points: Vec<EntryPoint>,
  pub sorted_modules: Vec<ModuleIdx>,
  pub externals: Vec<ModuleIdx>,
  pub warnings: Vec<anyhow::Error>,
}

impl LinkStage {
  pub fn new(scan_stage_output: ScanStageOutput) -> Self {
    let ScanStageOutput { modules, entry_points, warnings } = scan_stage_output;
    Self { modules, entry_points, sorted_modules: vec![], externals: vec![], warnings }
  }

  pub fn link(mut self) -> LinkStageOutput {
    self.sort_modules();

    let entry = &self.modules[self.entry_points[0].idx];
    let (entry_exports, entry_external_star_exports) = match entry.as_normal() {
      Some(entry) => {
        let mut names = FxHashSet::default();
        entry.get_exported_names(&mut FxHashSet::default(), &self.modules, true, &mut names);
        let mut names = names.into_iter().map(ToString::to_string).collect::<Vec<_>>();
        names.sort_unstable();
        (names, self.collect_external_star_exports(entry.idx))
      }
      None => (vec![], vec![]),
    };

    tracing::debug!(
      modules = self.sorted_modules.len(),
      externals = self.externals.len(),
      "link stage"
    );

    LinkStageOutput {
      modules: self.modules,
      entry_points: self.entry_points,
      sorted_modules: self.sorted_modules,
      externals: self.externals,
      entry_exports,
      entry_external_star_exports,
      warnings: self.warnings,
    }
  }

  fn collect_external_star_exports(&self, entry: ModuleIdx) -> Vec<ModuleIdx> {
    let mut visited = FxHashSet::default();
    let mut externals = FxIndexSet::default();
    let mut stack = vec![entry];
    while let Some(idx) = stack.pop() {
      if !visited.insert(idx) {
        continue;
      }
      let Some(module) = self.modules[idx].as_normal() else {
        continue;
      };
      externals.extend(
        module
          .star_exports_from_external_modules(&self.modules)
          .map(|rec_idx| module.import_records[rec_idx].resolved_module()),
      );
      stack.extend(module.star_export_module_ids().collect::<Vec<_>>().into_iter().rev());
    }
    externals.into_iter().collect()
  }
}

use std::iter;

use libpack_common::{Module, ModuleIdx};
use rustc_hash::{FxHashMap, FxHashSet};

use super::LinkStage;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
enum Status {
  ToBeExecuted(ModuleIdx),
  WaitForExit(ModuleIdx),
}

impl LinkStage {
  /// Orders modules the way a depth-first ES module evaluation would, and reports every cycle
  /// met on the way.
  pub(crate) fn sort_modules(&mut self) {
    // The user defined entry is executed first, lazily loaded modules follow.
    let mut execution_stack =
      self.entry_points.iter().rev().map(|entry| Status::ToBeExecuted(entry.idx)).collect::<Vec<_>>();

    let mut executed_ids = FxHashSet::default();
    let mut stack_indexes_of_executing_id = FxHashMap::default();

    let mut circular_dependencies = FxHashSet::default();
    let mut sorted_modules = Vec::with_capacity(self.modules.len());
    let mut externals = vec![];

    while let Some(status) = execution_stack.pop() {
      match status {
        Status::ToBeExecuted(id) => {
          if executed_ids.contains(&id) {
            // Try to check if there is a circular dependency
            if let Some(index) = stack_indexes_of_executing_id.get(&id).copied() {
              // Executing
              let cycles = execution_stack[index..]
                .iter()
                .filter_map(|action| match action {
                  // Only modules with `Status::WaitForExit` are on the execution chain
                  Status::ToBeExecuted(_) => None,
                  Status::WaitForExit(id) => Some(*id),
                })
                .chain(iter::once(id))
                .collect::<Box<[_]>>();
              circular_dependencies.insert(cycles);
            }
          } else {
            executed_ids.insert(id);
            execution_stack.push(Status::WaitForExit(id));
            stack_indexes_of_executing_id.insert(id, execution_stack.len() - 1);

            execution_stack.extend(
              self.modules[id]
                .import_records()
                .iter()
                .filter(|rec| rec.kind.is_static())
                .map(|rec| rec.resolved_module())
                .rev()
                .map(Status::ToBeExecuted),
            );
          }
        }
        Status::WaitForExit(id) => {
          match &self.modules[id] {
            Module::Normal(_) => sorted_modules.push(id),
            Module::External(_) => externals.push(id),
          }
          stack_indexes_of_executing_id.remove(&id);
        }
      }
    }

    let mut cycle_warnings = circular_dependencies
      .into_iter()
      .map(|cycle| {
        cycle.iter().map(|id| self.modules[*id].stable_id()).collect::<Vec<_>>().join(" -> ")
      })
      .collect::<Vec<_>>();
    cycle_warnings.sort_unstable();
    for cycle in cycle_warnings {
      tracing::warn!("Circular dependency: {cycle}.");
      self.warnings.push(anyhow::anyhow!("Circular dependency: {cycle}."));
    }

    self.sorted_modules = sorted_modules;
    self.externals = externals;
  }
}

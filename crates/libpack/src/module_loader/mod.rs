mod module_task;
mod task_context;

use std::{collections::hash_map::Entry, sync::Arc};

use arcstr::ArcStr;
use libpack_common::{
  EntryPoint, ExternalModule, ImportKind, ImportRecordIdx, IndexModules, Module, ModuleIdx,
  ModuleLoaderMsg, NormalModuleTaskResult, ResolvedId,
};
use libpack_error::{BuildError, BuildResult};
use libpack_fs::OsFileSystem;
use libpack_plugin::SharedPluginDriver;
use oxc_index::IndexVec;
use rustc_hash::{FxHashMap, FxHashSet};
use tokio::sync::mpsc::Receiver;

use self::{module_task::ModuleTask, task_context::TaskContext};
use crate::types::{SharedOptions, SharedResolver};

pub struct ModuleLoader {
  rx: Receiver<ModuleLoaderMsg>,
  remaining: u32,
  shared_context: Arc<TaskContext>,
  modules: IndexVec<ModuleIdx, Option<Module>>,
  /// Module id to its index. Owned by the loader loop only, so an id is claimed exactly once.
  visited: FxHashMap<ArcStr, ModuleIdx>,
}

#[derive(Debug)]
pub struct ModuleLoaderOutput {
  pub modules: IndexModules,
  /// The user defined entry first, then dynamic import targets sorted by stable id.
  pub entry_points: Vec<EntryPoint>,
  pub warnings: Vec<anyhow::Error>,
}

impl ModuleLoader {
  pub fn new(
    fs: OsFileSystem,
    options: SharedOptions,
    resolver: SharedResolver,
    plugin_driver: SharedPluginDriver,
  ) -> Self {
    // 1024 should be enough for most cases
    // over 1024 pending tasks are insane
    let (tx, rx) = tokio::sync::mpsc::channel(1024);

    let shared_context = Arc::new(TaskContext { fs, options, resolver, plugin_driver, tx });

    Self {
      rx,
      remaining: 0,
      shared_context,
      modules: IndexVec::new(),
      visited: FxHashMap::default(),
    }
  }

  pub async fn fetch_all_modules(mut self, entry: ResolvedId) -> BuildResult<ModuleLoaderOutput> {
    let entry_idx = self.try_spawn_new_task(entry, None);

    let mut errors = vec![];
    let mut warnings: Vec<anyhow::Error> = vec![];
    let mut dynamic_import_entry_ids: FxHashSet<ModuleIdx> = FxHashSet::default();

    while self.remaining > 0 {
      let Some(msg) = self.rx.recv().await else {
        break;
      };

      match msg {
        ModuleLoaderMsg::NormalModuleDone(task_result) => {
          let NormalModuleTaskResult {
            mut module,
            resolved_deps,
            raw_import_records,
            warnings: task_result_warnings,
          } = *task_result;

          warnings.extend(task_result_warnings);

          let owner = ArcStr::from(module.stable_id());
          let import_records = raw_import_records
            .into_iter()
            .zip(resolved_deps)
            .map(|(raw_rec, info)| {
              let id = self.try_spawn_new_task(info, Some(owner.clone()));
              // Dynamic imported module will be considered as an entry
              if matches!(raw_rec.kind, ImportKind::DynamicImport) && id != entry_idx {
                dynamic_import_entry_ids.insert(id);
              }
              raw_rec.into_resolved(id)
            })
            .collect::<IndexVec<ImportRecordIdx, _>>();

          module.set_import_records(import_records);

          let module_idx = module.idx();
          self.modules[module_idx] = Some(module);
          self.remaining -= 1;
        }
        ModuleLoaderMsg::BuildErrors(e) => {
          errors.extend(e);
          self.remaining -= 1;
        }
      }
    }

    if !errors.is_empty() {
      // Tasks finish in any order.
      errors.sort_by_cached_key(ToString::to_string);
      return Err(BuildError::from(errors));
    }

    let modules = self
      .modules
      .into_iter()
      .collect::<Option<IndexModules>>()
      .ok_or_else(|| anyhow::anyhow!("Module tasks didn't complete as expected"))?;

    let mut entry_points = vec![EntryPoint { idx: entry_idx }];
    let mut dynamic_import_entry_ids = dynamic_import_entry_ids.into_iter().collect::<Vec<_>>();
    dynamic_import_entry_ids.sort_unstable_by_key(|idx| modules[*idx].stable_id());
    entry_points.extend(dynamic_import_entry_ids.into_iter().map(|idx| EntryPoint { idx }));

    tracing::debug!(modules = modules.len(), "module graph loaded");

    Ok(ModuleLoaderOutput { modules, entry_points, warnings })
  }

  fn try_spawn_new_task(&mut self, resolved_id: ResolvedId, owner: Option<ArcStr>) -> ModuleIdx {
    match self.visited.entry(resolved_id.id.clone()) {
      Entry::Occupied(visited) => *visited.get(),
      Entry::Vacant(not_visited) => {
        let idx = self.modules.push(None);

        if resolved_id.is_external {
          self.modules[idx] = Some(ExternalModule::new(idx, resolved_id.id).into());
        } else {
          self.remaining += 1;

          let task = ModuleTask::new(Arc::clone(&self.shared_context), idx, owner, resolved_id);

          tokio::spawn(task.run());
        }

        *not_visited.insert(idx)
      }
    }
  }
}

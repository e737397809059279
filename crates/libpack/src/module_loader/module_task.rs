use std::sync::Arc;

use arcstr::ArcStr;
use libpack_common::{
  EcmaView, ImportRecordIdx, Module, ModuleIdx, ModuleLoaderMsg, ModuleType, NormalModule,
  NormalModuleTaskResult, ResolvedId,
};
use libpack_error::{BuildError, BuildResult};
use oxc_index::IndexVec;

use super::task_context::TaskContext;
use crate::{
  ast_scanner::{AstScanner, ScanResult},
  utils::{load_source::load_source, parse_to_ecma_ast::parse_to_ecma_ast, resolve_id::resolve_id},
};

pub struct ModuleTask {
  ctx: Arc<TaskContext>,
  idx: ModuleIdx,
  /// Stable id of the module that first requested this one.
  owner: Option<ArcStr>,
  resolved_id: ResolvedId,
}

impl ModuleTask {
  pub fn new(
    ctx: Arc<TaskContext>,
    idx: ModuleIdx,
    owner: Option<ArcStr>,
    resolved_id: ResolvedId,
  ) -> Self {
    Self { ctx, idx, owner, resolved_id }
  }

  pub async fn run(self) {
    let msg = match self.run_inner() {
      Ok(result) => ModuleLoaderMsg::NormalModuleDone(Box::new(result)),
      Err(errs) => ModuleLoaderMsg::BuildErrors(errs.into_vec()),
    };
    // The loader only drops its receiver after every task reported back.
    let _ = self.ctx.tx.send(msg).await;
  }

  fn run_inner(&self) -> BuildResult<NormalModuleTaskResult> {
    let id = self.resolved_id.module_id();
    let stable_id = id.stabilize(&self.ctx.options.cwd);
    tracing::debug!(module = %stable_id, importer = self.owner.as_deref(), "loading module");

    let (source, detected_type) = load_source(&self.ctx.fs, &self.resolved_id, &stable_id)?;

    let (code, module_type) =
      match self.ctx.plugin_driver.transform(&id, &stable_id, &source, detected_type)? {
        Some(output) => (output.code, output.module_type),
        None => (source, detected_type.unwrap_or(ModuleType::Js)),
      };

    let (ast, warnings) = parse_to_ecma_ast(&stable_id, code, module_type)?;
    let ScanResult { raw_import_records, named_exports, mutations, meta } =
      AstScanner::new(ast.program()).scan(ast.program());
    tracing::trace!(
      module = %stable_id,
      imports = raw_import_records.len(),
      dynamic_import = meta.has_dynamic_import(),
      "scanned module"
    );

    // Every specifier is resolved even after a failure, so one run reports all of them.
    let mut resolve_errors = vec![];
    let resolved_deps = raw_import_records
      .iter()
      .filter_map(|record| {
        resolve_id(
          &self.ctx.options,
          &self.ctx.resolver,
          &record.specifier,
          Some(&self.resolved_id.id),
          &stable_id,
          false,
        )
        .map_err(|err| resolve_errors.push(err))
        .ok()
      })
      .collect::<IndexVec<ImportRecordIdx, ResolvedId>>();
    if !resolve_errors.is_empty() {
      return Err(BuildError::from(resolve_errors));
    }

    let module = NormalModule {
      idx: self.idx,
      stable_id,
      ecma_view: EcmaView {
        source: ast.source().clone(),
        import_records: IndexVec::default(),
        named_exports,
        mutations,
        meta,
      },
    };

    Ok(NormalModuleTaskResult {
      module: Module::from(module),
      resolved_deps,
      raw_import_records,
      warnings,
    })
  }
}

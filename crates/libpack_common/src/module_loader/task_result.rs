use oxc_index::IndexVec;

use crate::{ImportRecordIdx, Module, RawImportRecord, ResolvedId};

pub struct NormalModuleTaskResult {
  pub module: Module,
  pub resolved_deps: IndexVec<ImportRecordIdx, ResolvedId>,
  pub raw_import_records: IndexVec<ImportRecordIdx, RawImportRecord>,
  pub warnings: Vec<anyhow::Error>,
}

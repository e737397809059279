use arcstr::ArcStr;
use oxc_index::IndexVec;

use crate::{ImportRecordIdx, ModuleIdx, ResolvedImportRecord};

/// A dependency supplied by the consumer. Only its specifier is known.
#[derive(Debug)]
pub struct ExternalModule {
  pub idx: ModuleIdx,
  /// The import specifier exactly as written, e.g. `vue`.
  pub name: ArcStr,
  /// Always empty. Kept so that every module exposes its records the same way.
  pub import_records: IndexVec<ImportRecordIdx, ResolvedImportRecord>,
}

impl ExternalModule {
  pub fn new(idx: ModuleIdx, name: ArcStr) -> Self {
    Self { idx, name, import_records: IndexVec::default() }
  }
}

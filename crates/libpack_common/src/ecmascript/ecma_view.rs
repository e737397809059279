use arcstr::ArcStr;
use libpack_utils::indexmap::FxIndexMap;
use oxc_index::IndexVec;

use crate::{ImportRecordIdx, Mutation, ResolvedImportRecord};

bitflags::bitflags! {
  #[derive(Debug, Default, Clone, Copy)]
  pub struct EcmaViewMeta: u8 {
    /// The module contains at least one `export * from '...'`.
    const HAS_STAR_EXPORT = 1;
    /// The module contains at least one `import('...')` with a literal specifier.
    const HAS_DYNAMIC_IMPORT = 1 << 1;
  }
}

impl EcmaViewMeta {
  #[inline]
  pub fn has_star_export(&self) -> bool {
    self.contains(Self::HAS_STAR_EXPORT)
  }

  #[inline]
  pub fn has_dynamic_import(&self) -> bool {
    self.contains(Self::HAS_DYNAMIC_IMPORT)
  }
}

#[derive(Debug)]
pub struct EcmaView {
  /// Plain JavaScript, after plugins and type stripping.
  pub source: ArcStr,
  pub import_records: IndexVec<ImportRecordIdx, ResolvedImportRecord>,
  /// Exported name to the expression that reads its current value, in declaration order.
  pub named_exports: FxIndexMap<String, String>,
  /// Edits turning `source` into the body of the module factory. Spans never overlap.
  pub mutations: Vec<Mutation>,
  pub meta: EcmaViewMeta,
}

use std::fmt::Debug;

use arcstr::ArcStr;
use oxc::span::Span;

use crate::{ImportKind, ModuleIdx};

pub type RawImportRecord = ImportRecord<Span>;
pub type ResolvedImportRecord = ImportRecord<ModuleIdx>;

bitflags::bitflags! {
  #[derive(Debug, Clone, Copy)]
  pub struct ImportRecordMeta: u8 {
    /// `export * from 'mod'` only
    const IS_EXPORT_STAR = 1;
  }
}

/// One import request of a module. `state` is the span of the request while scanning and the
/// resolved module once the graph is built.
#[derive(Debug)]
pub struct ImportRecord<State: Debug> {
  pub state: State,
  /// `./lib.js` in `import { foo } from './lib.js';`
  pub specifier: ArcStr,
  pub kind: ImportKind,
  pub meta: ImportRecordMeta,
}

impl RawImportRecord {
  pub fn new(specifier: ArcStr, kind: ImportKind, span: Span) -> Self {
    Self { specifier, kind, meta: ImportRecordMeta::empty(), state: span }
  }

  pub fn into_resolved(self, resolved_module: ModuleIdx) -> ResolvedImportRecord {
    ResolvedImportRecord {
      state: resolved_module,
      specifier: self.specifier,
      kind: self.kind,
      meta: self.meta,
    }
  }
}

impl ResolvedImportRecord {
  #[inline]
  pub fn resolved_module(&self) -> ModuleIdx {
    self.state
  }
}

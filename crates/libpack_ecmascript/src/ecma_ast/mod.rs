pub mod program_cell;

use std::fmt::Debug;

use arcstr::ArcStr;
use oxc::{ast::ast::Program, span::SourceType};

use self::program_cell::ProgramCell;

/// A parsed module that owns its source text and arena.
pub struct EcmaAst {
  pub program: ProgramCell,
  pub source_type: SourceType,
}

impl EcmaAst {
  pub fn source(&self) -> &ArcStr {
    self.program.source()
  }

  pub fn program(&self) -> &Program<'_> {
    self.program.program()
  }
}

impl Debug for EcmaAst {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("EcmaAst")
      .field("source", self.source())
      .field("source_type", &self.source_type)
      .finish_non_exhaustive()
  }
}

unsafe impl Send for EcmaAst {}
unsafe impl Sync for EcmaAst {}

use arcstr::ArcStr;
use oxc::{allocator::Allocator, ast::ast::Program};
use self_cell::self_cell;

/// Source text and arena a parsed [`Program`] points into.
pub struct ProgramOwner {
  pub source: ArcStr,
  pub allocator: Allocator,
}

pub struct ParsedProgram<'ast>(pub Program<'ast>);

self_cell!(
  /// Keeps a `Program<'ast>` next to the arena it borrows from, so a module can own its AST across tasks.
  pub struct ProgramCell {
    owner: ProgramOwner,

    #[covariant]
    dependent: ParsedProgram,
  }
);

impl ProgramCell {
  pub fn source(&self) -> &ArcStr {
    &self.borrow_owner().source
  }

  pub fn program(&self) -> &Program<'_> {
    &self.borrow_dependent().0
  }

  /// Hands the arena and a mutable program to `func`, for passes that rewrite the AST in place.
  pub fn with_program_mut<Ret>(
    &mut self,
    func: impl for<'ast> FnOnce(&'ast Allocator, &mut Program<'ast>) -> Ret,
  ) -> Ret {
    self.with_dependent_mut(|owner, dependent| func(&owner.allocator, &mut dependent.0))
  }
}

use libpack_error::BuildDiagnostic;
use libpack_utils::line_index::line_column;
use oxc::{
  ast::ast::{self, Expression, Program},
  ast_visit::{Visit, walk},
  semantic::ScopeFlags,
  span::Span,
};

pub struct SyntaxCheckResult {
  pub errors: Vec<BuildDiagnostic>,
  pub warnings: Vec<anyhow::Error>,
}

/// Rejects constructs the packaged output cannot express. Runs on the module as it was
/// authored, before any TypeScript or JSX lowering, so reported positions match the file.
pub struct SyntaxChecker<'me> {
  stable_id: &'me str,
  source: &'me str,
  function_depth: u32,
  errors: Vec<BuildDiagnostic>,
  warnings: Vec<anyhow::Error>,
}

impl<'me> SyntaxChecker<'me> {
  pub fn new(stable_id: &'me str, source: &'me str) -> Self {
    Self { stable_id, source, function_depth: 0, errors: vec![], warnings: vec![] }
  }

  pub fn check(mut self, program: &Program<'_>) -> SyntaxCheckResult {
    self.visit_program(program);
    SyntaxCheckResult { errors: self.errors, warnings: self.warnings }
  }

  fn push_error(&mut self, span: Span, message: &str) {
    let (line, column) = line_column(self.source, span.start as usize);
    self.errors.push(BuildDiagnostic::syntax(self.stable_id, line, column, message));
  }
}

impl<'a> Visit<'a> for SyntaxChecker<'_> {
  fn visit_function(&mut self, func: &ast::Function<'a>, flags: ScopeFlags) {
    self.function_depth += 1;
    walk::walk_function(self, func, flags);
    self.function_depth -= 1;
  }

  fn visit_arrow_function_expression(&mut self, func: &ast::ArrowFunctionExpression<'a>) {
    self.function_depth += 1;
    walk::walk_arrow_function_expression(self, func);
    self.function_depth -= 1;
  }

  fn visit_await_expression(&mut self, expr: &ast::AwaitExpression<'a>) {
    if self.function_depth == 0 {
      self.push_error(expr.span, "Top-level await is not supported in library output");
    }
    walk::walk_await_expression(self, expr);
  }

  fn visit_for_of_statement(&mut self, stmt: &ast::ForOfStatement<'a>) {
    if stmt.r#await && self.function_depth == 0 {
      self.push_error(stmt.span, "Top-level for await is not supported in library output");
    }
    walk::walk_for_of_statement(self, stmt);
  }

  fn visit_import_expression(&mut self, expr: &ast::ImportExpression<'a>) {
    if !matches!(expr.source, Expression::StringLiteral(_)) {
      let (line, column) = line_column(self.source, expr.span.start as usize);
      self.warnings.push(anyhow::anyhow!(
        "{}:{line}:{column}: `import()` with a non-literal specifier is left as is and resolved at runtime.",
        self.stable_id
      ));
    }
    walk::walk_import_expression(self, expr);
  }
}

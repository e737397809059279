use libpack_common::{EcmaViewMeta, ImportKind, Mutation};
use libpack_utils::concat_string;
use oxc::{
  ast::ast::{self, Expression, IdentifierReference, PropertyKind},
  ast_visit::{Visit, walk},
  semantic::ScopeFlags,
};

use super::AstScanner;

impl<'a> Visit<'a> for AstScanner {
  fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'a>) {
    if let Some(expr) = self.resolve_import_binding(ident.reference_id.get()) {
      let content = expr.to_string();
      self.mutations.push(Mutation::Overwrite { span: ident.span, content });
    }
  }

  fn visit_object_property(&mut self, prop: &ast::ObjectProperty<'a>) {
    if prop.shorthand && prop.kind == PropertyKind::Init {
      if let Expression::Identifier(ident) = &prop.value {
        // `{ foo }` has to keep its key when `foo` is rewritten.
        if let Some(expr) = self.resolve_import_binding(ident.reference_id.get()) {
          let content = concat_string!(ident.name.as_str(), ": ", expr);
          self.mutations.push(Mutation::Overwrite { span: ident.span, content });
          return;
        }
      }
    }
    walk::walk_object_property(self, prop);
  }

  fn visit_import_expression(&mut self, expr: &ast::ImportExpression<'a>) {
    if let Expression::StringLiteral(request) = &expr.source {
      let record = self.add_import_record(&request.value, ImportKind::DynamicImport, request.span);
      self.meta.insert(EcmaViewMeta::HAS_DYNAMIC_IMPORT);
      self.mutations.push(Mutation::DynamicImport { span: expr.span, record });
      return;
    }
    // Computed specifiers stay runtime `import()` calls, `SyntaxChecker` warns about them.
    walk::walk_import_expression(self, expr);
  }
}

impl AstScanner {
  pub(super) fn visit_top_level_statement(&mut self, stmt: &ast::Statement<'_>) {
    self.visit_statement(stmt);
  }

  pub(super) fn visit_top_level_declaration(&mut self, decl: &ast::Declaration<'_>) {
    self.visit_declaration(decl);
  }

  pub(super) fn visit_default_function(&mut self, func: &ast::Function<'_>) {
    self.visit_function(func, ScopeFlags::Function);
  }

  pub(super) fn visit_default_class(&mut self, class: &ast::Class<'_>) {
    self.visit_class(class);
  }

  pub(super) fn visit_default_expression(&mut self, expr: &Expression<'_>) {
    self.visit_expression(expr);
  }
}

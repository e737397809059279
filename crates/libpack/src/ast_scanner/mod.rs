mod impl_visit;
mod syntax_checker;

use arcstr::ArcStr;
use libpack_common::{
  EcmaViewMeta, ImportKind, ImportRecordIdx, ImportRecordMeta, Mutation, RawImportRecord,
};
use libpack_utils::{concat_string, ecmascript::property_access_str, indexmap::FxIndexMap};
use oxc::{
  ast::ast::{
    BindingPattern, BindingPatternKind, Declaration, ExportAllDeclaration,
    ExportDefaultDeclaration, ExportDefaultDeclarationKind, ExportNamedDeclaration,
    ImportDeclaration, ImportDeclarationSpecifier, Program, Statement,
  },
  semantic::{Scoping, SemanticBuilder, SymbolId},
  span::{GetSpan, Span},
};
use oxc_index::IndexVec;
use rustc_hash::FxHashMap;

pub use self::syntax_checker::{SyntaxCheckResult, SyntaxChecker};

/// Local name holding the value of `export default <expression>`.
pub const DEFAULT_EXPORT_BINDING: &str = "__default";

pub struct ScanResult {
  pub raw_import_records: IndexVec<ImportRecordIdx, RawImportRecord>,
  pub named_exports: FxIndexMap<String, String>,
  pub mutations: Vec<Mutation>,
  pub meta: EcmaViewMeta,
}

/// Name of the variable a module factory binds the exports of an import record to.
pub fn import_record_binding(idx: ImportRecordIdx) -> String {
  let idx = idx.index().to_string();
  concat_string!("__import_", idx)
}

/// Walks a module once and records everything needed to turn it into a registry factory:
/// import records, exported names, and the edits on its source.
pub struct AstScanner {
  scoping: Scoping,
  raw_import_records: IndexVec<ImportRecordIdx, RawImportRecord>,
  records_by_request: FxHashMap<(ArcStr, ImportKind), ImportRecordIdx>,
  /// Symbol of a local import binding to the expression reading it.
  import_bindings: FxHashMap<SymbolId, String>,
  import_binding_names: FxHashMap<String, String>,
  named_exports: FxIndexMap<String, String>,
  mutations: Vec<Mutation>,
  meta: EcmaViewMeta,
}

impl AstScanner {
  pub fn new(program: &Program) -> Self {
    let scoping = SemanticBuilder::new().build(program).semantic.into_scoping();
    Self {
      scoping,
      raw_import_records: IndexVec::default(),
      records_by_request: FxHashMap::default(),
      import_bindings: FxHashMap::default(),
      import_binding_names: FxHashMap::default(),
      named_exports: FxIndexMap::default(),
      mutations: vec![],
      meta: EcmaViewMeta::default(),
    }
  }

  pub fn scan(mut self, program: &Program<'_>) -> ScanResult {
    // Module requests get their records in source order, which is also the order they are evaluated in.
    for stmt in &program.body {
      match stmt {
        Statement::ImportDeclaration(decl) => self.scan_import_decl(decl),
        Statement::ExportAllDeclaration(decl) => self.scan_export_all_decl(decl),
        Statement::ExportNamedDeclaration(decl) if decl.source.is_some() => {
          self.scan_export_from_decl(decl);
        }
        _ => {}
      }
    }

    for stmt in &program.body {
      match stmt {
        Statement::ImportDeclaration(_) | Statement::ExportAllDeclaration(_) => {}
        Statement::ExportNamedDeclaration(decl) => {
          if decl.source.is_none() {
            self.scan_export_named_decl(decl);
          }
        }
        Statement::ExportDefaultDeclaration(decl) => self.scan_export_default_decl(decl),
        _ => self.visit_top_level_statement(stmt),
      }
    }

    self.mutations.sort_by_key(|mutation| mutation.span().start);

    ScanResult {
      raw_import_records: self.raw_import_records,
      named_exports: self.named_exports,
      mutations: self.mutations,
      meta: self.meta,
    }
  }

  fn add_import_record(&mut self, specifier: &str, kind: ImportKind, span: Span) -> ImportRecordIdx {
    let key = (ArcStr::from(specifier), kind);
    if let Some(idx) = self.records_by_request.get(&key) {
      return *idx;
    }
    let idx = self.raw_import_records.push(RawImportRecord::new(key.0.clone(), kind, span));
    self.records_by_request.insert(key, idx);
    idx
  }

  fn scan_import_decl(&mut self, decl: &ImportDeclaration<'_>) {
    let rec_idx = self.add_import_record(&decl.source.value, ImportKind::Import, decl.source.span);
    let namespace = import_record_binding(rec_idx);
    for spec in decl.specifiers.iter().flatten() {
      let (local, expr) = match spec {
        ImportDeclarationSpecifier::ImportSpecifier(spec) => {
          (&spec.local, property_access_str(&namespace, spec.imported.name().as_str()))
        }
        ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
          (&spec.local, property_access_str(&namespace, "default"))
        }
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => {
          (&spec.local, namespace.clone())
        }
      };
      if let Some(symbol_id) = local.symbol_id.get() {
        self.import_bindings.insert(symbol_id, expr.clone());
      }
      self.import_binding_names.insert(local.name.to_string(), expr);
    }
    self.mutations.push(Mutation::Remove(decl.span));
  }

  fn scan_export_all_decl(&mut self, decl: &ExportAllDeclaration<'_>) {
    let rec_idx = self.add_import_record(&decl.source.value, ImportKind::Import, decl.source.span);
    if let Some(exported) = &decl.exported {
      // `export * as ns from '...'`
      self.named_exports.insert(exported.name().to_string(), import_record_binding(rec_idx));
    } else {
      self.raw_import_records[rec_idx].meta.insert(ImportRecordMeta::IS_EXPORT_STAR);
      self.meta.insert(EcmaViewMeta::HAS_STAR_EXPORT);
    }
    self.mutations.push(Mutation::Remove(decl.span));
  }

  fn scan_export_from_decl(&mut self, decl: &ExportNamedDeclaration<'_>) {
    let Some(source) = &decl.source else { return };
    let rec_idx = self.add_import_record(&source.value, ImportKind::Import, source.span);
    let namespace = import_record_binding(rec_idx);
    for spec in &decl.specifiers {
      self.named_exports.insert(
        spec.exported.name().to_string(),
        property_access_str(&namespace, spec.local.name().as_str()),
      );
    }
    self.mutations.push(Mutation::Remove(decl.span));
  }

  fn scan_export_named_decl(&mut self, decl: &ExportNamedDeclaration<'_>) {
    let Some(declaration) = &decl.declaration else {
      // `export { a, b as c }`
      for spec in &decl.specifiers {
        let local = spec.local.name();
        let expr = self
          .import_binding_names
          .get(local.as_str())
          .cloned()
          .unwrap_or_else(|| local.to_string());
        self.named_exports.insert(spec.exported.name().to_string(), expr);
      }
      self.mutations.push(Mutation::Remove(decl.span));
      return;
    };

    // `export const a = 1` -> `const a = 1`
    self.mutations.push(Mutation::Remove(Span::new(decl.span.start, declaration.span().start)));
    let mut names = vec![];
    match declaration {
      Declaration::VariableDeclaration(var_decl) => {
        for declarator in &var_decl.declarations {
          collect_binding_names(&declarator.id, &mut names);
        }
      }
      Declaration::FunctionDeclaration(func) => {
        names.extend(func.id.as_ref().map(|id| id.name.as_str()));
      }
      Declaration::ClassDeclaration(class) => {
        names.extend(class.id.as_ref().map(|id| id.name.as_str()));
      }
      _ => {}
    }
    for name in names {
      self.named_exports.insert(name.to_string(), name.to_string());
    }
    self.visit_top_level_declaration(declaration);
  }

  fn scan_export_default_decl(&mut self, decl: &ExportDefaultDeclaration<'_>) {
    let prefix = Span::new(decl.span.start, decl.declaration.span().start);
    let named = match &decl.declaration {
      ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
        func.id.as_ref().map(|id| id.name.to_string())
      }
      ExportDefaultDeclarationKind::ClassDeclaration(class) => {
        class.id.as_ref().map(|id| id.name.to_string())
      }
      ExportDefaultDeclarationKind::TSInterfaceDeclaration(_) => {
        self.mutations.push(Mutation::Remove(decl.span));
        return;
      }
      _ => None,
    };

    if let Some(name) = named {
      // `export default function foo() {}` keeps `foo` hoisted.
      self.mutations.push(Mutation::Remove(prefix));
      self.named_exports.insert("default".to_string(), name);
    } else {
      self.mutations.push(Mutation::Overwrite {
        span: prefix,
        content: concat_string!("var ", DEFAULT_EXPORT_BINDING, " = "),
      });
      let end = decl.declaration.span().end;
      let is_anonymous_declaration = matches!(
        decl.declaration,
        ExportDefaultDeclarationKind::FunctionDeclaration(_)
          | ExportDefaultDeclarationKind::ClassDeclaration(_)
      );
      if is_anonymous_declaration && end > decl.declaration.span().start {
        // Declarations end with `}` and carry no `;`, the expression form needs one.
        self.mutations.push(Mutation::Overwrite {
          span: Span::new(end - 1, end),
          content: "};".to_string(),
        });
      }
      self.named_exports.insert("default".to_string(), DEFAULT_EXPORT_BINDING.to_string());
    }

    match &decl.declaration {
      ExportDefaultDeclarationKind::FunctionDeclaration(func) => self.visit_default_function(func),
      ExportDefaultDeclarationKind::ClassDeclaration(class) => self.visit_default_class(class),
      ExportDefaultDeclarationKind::TSInterfaceDeclaration(_) => {}
      kind => {
        if let Some(expr) = kind.as_expression() {
          self.visit_default_expression(expr);
        }
      }
    }
  }

  fn resolve_import_binding(&self, reference: Option<oxc::semantic::ReferenceId>) -> Option<&str> {
    let symbol_id = self.scoping.get_reference(reference?).symbol_id()?;
    self.import_bindings.get(&symbol_id).map(String::as_str)
  }
}

fn collect_binding_names<'a>(pattern: &'a BindingPattern<'_>, names: &mut Vec<&'a str>) {
  match &pattern.kind {
    BindingPatternKind::BindingIdentifier(id) => names.push(id.name.as_str()),
    BindingPatternKind::ObjectPattern(object) => {
      for property in &object.properties {
        collect_binding_names(&property.value, names);
      }
      if let Some(rest) = &object.rest {
        collect_binding_names(&rest.argument, names);
      }
    }
    BindingPatternKind::ArrayPattern(array) => {
      for element in array.elements.iter().flatten() {
        collect_binding_names(element, names);
      }
      if let Some(rest) = &array.rest {
        collect_binding_names(&rest.argument, names);
      }
    }
    BindingPatternKind::AssignmentPattern(assignment) => {
      collect_binding_names(&assignment.left, names);
    }
  }
}

#[cfg(test)]
mod tests {
  use libpack_ecmascript::EcmaCompiler;
  use oxc::span::SourceType;

  use super::*;

  fn scan(code: &str) -> ScanResult {
    let ast = EcmaCompiler::parse("src/a.js", code, SourceType::mjs()).unwrap();
    AstScanner::new(ast.program()).scan(ast.program())
  }

  fn contents(result: &ScanResult, code: &str) -> Vec<(String, String)> {
    result
      .mutations
      .iter()
      .map(|mutation| {
        let span = mutation.span();
        let original = code[span.start as usize..span.end as usize].to_string();
        let replacement = match mutation {
          Mutation::Remove(_) => String::new(),
          Mutation::Overwrite { content, .. } => content.clone(),
          Mutation::DynamicImport { record, .. } => format!("<dynamic {}>", record.index()),
        };
        (original, replacement)
      })
      .collect()
  }

  #[test]
  fn import_bindings_become_member_accesses() {
    let code = "import Vue, { ref as r } from 'vue';\nimport * as shapes from './shapes';\nconst app = { r, shapes };\nfunction f(r) { return r; }\nexport default Vue.extend(app);\n";
    let result = scan(code);
    assert_eq!(result.raw_import_records.len(), 2);
    assert_eq!(
      contents(&result, code),
      vec![
        ("import Vue, { ref as r } from 'vue';".to_string(), String::new()),
        ("import * as shapes from './shapes';".to_string(), String::new()),
        ("r".to_string(), "r: __import_0.ref".to_string()),
        ("shapes".to_string(), "shapes: __import_1".to_string()),
        ("export default ".to_string(), "var __default = ".to_string()),
        ("Vue".to_string(), "__import_0.default".to_string()),
      ]
    );
    assert_eq!(result.named_exports.get("default").map(String::as_str), Some("__default"));
  }

  #[test]
  fn exports_are_collected_in_order() {
    let code = "export const { a, b: [c] } = obj;\nexport function f() {}\nexport * from './all';\nexport * as ns from './ns';\nexport { x as y } from './x';\nlet z = 1;\nexport { z as default };\n";
    let result = scan(code);
    let exports = result
      .named_exports
      .iter()
      .map(|(name, expr)| (name.as_str(), expr.as_str()))
      .collect::<Vec<_>>();
    assert_eq!(
      exports,
      vec![
        ("ns", "__import_1"),
        ("y", "__import_2.x"),
        ("a", "a"),
        ("c", "c"),
        ("f", "f"),
        ("default", "z"),
      ]
    );
    assert!(result.meta.has_star_export());
    assert!(result.raw_import_records[ImportRecordIdx::from_usize(0)]
      .meta
      .contains(ImportRecordMeta::IS_EXPORT_STAR));
  }

  #[test]
  fn dynamic_imports_are_recorded() {
    let code = "export const load = () => import('./lazy');\n";
    let result = scan(code);
    assert_eq!(result.raw_import_records.len(), 1);
    assert_eq!(result.raw_import_records[ImportRecordIdx::from_usize(0)].kind, ImportKind::DynamicImport);
    assert!(result.meta.has_dynamic_import());
    assert!(contents(&result, code).contains(&("import('./lazy')".to_string(), "<dynamic 0>".to_string())));
  }

  #[test]
  fn anonymous_default_function_gets_a_binding() {
    let code = "export default function () {}\n";
    let result = scan(code);
    assert_eq!(
      contents(&result, code),
      vec![
        ("export default ".to_string(), "var __default = ".to_string()),
        ("}".to_string(), "};".to_string()),
      ]
    );
  }
}

use libpack_common::{
  ImportRecordMeta, IndexModules, Mutation, NormalModule, ResolvedImportRecord,
};
use libpack_utils::{concat_string, ecmascript::{quote_str, to_property_key}};
use string_wizard::MagicString;

use crate::ast_scanner::import_record_binding;

/// Turns a module into an entry of the `__modules` registry:
///
/// ```js
/// __modules["src/a.js"] = function (__exports) {
///   __export(__exports, { foo: () => foo });
///   var __import_0 = __require("src/b.js");
///   ...body...
/// };
/// ```
///
/// Exports are installed as getters before anything runs, so a module that is re-entered
/// through a cycle already exposes live bindings.
pub fn render_module_factory(module: &NormalModule, modules: &IndexModules) -> String {
  let mut factory = String::with_capacity(module.source.len() + 256);
  let key = quote_str(&module.stable_id);
  factory.push_str(&concat_string!("__modules[", key, "] = function (__exports) {\n"));
  render_module_code(module, modules, &mut factory);
  factory.push_str("};");
  factory
}

/// Renders the entry at the top level of an artifact instead of wrapping it in a factory, so
/// the artifact can export its bindings directly. It is still registered before any import
/// runs, which keeps cycles back into the entry working.
pub fn render_inlined_entry(module: &NormalModule, modules: &IndexModules) -> String {
  let mut code = String::with_capacity(module.source.len() + 256);
  let key = quote_str(&module.stable_id);
  code.push_str(&concat_string!("var __exports = __register(", key, ");\n"));
  render_module_code(module, modules, &mut code);
  code.truncate(code.trim_end().len());
  code
}

fn render_module_code(module: &NormalModule, modules: &IndexModules, code: &mut String) {
  if !module.named_exports.is_empty() {
    code.push_str("__export(__exports, {\n");
    for (name, expr) in &module.named_exports {
      let name = to_property_key(name);
      code.push_str(&concat_string!("  ", name, ": () => ", expr, ",\n"));
    }
    code.push_str("});\n");
  }

  for (rec_idx, rec) in module.import_records.iter_enumerated() {
    if !rec.kind.is_static() {
      continue;
    }
    let binding = import_record_binding(rec_idx);
    let require = render_require(rec, modules);
    code.push_str(&concat_string!("var ", binding, " = ", require, ";\n"));
    if rec.meta.contains(ImportRecordMeta::IS_EXPORT_STAR) {
      code.push_str(&concat_string!("__exportStar(__exports, ", binding, ");\n"));
    }
  }

  let body = render_body(module, modules);
  let body = body.trim();
  if !body.is_empty() {
    code.push_str(body);
    code.push('\n');
  }
}

fn render_require(rec: &ResolvedImportRecord, modules: &IndexModules) -> String {
  let key = quote_str(modules[rec.resolved_module()].stable_id());
  concat_string!("__require(", key, ")")
}

fn render_body(module: &NormalModule, modules: &IndexModules) -> String {
  if module.mutations.is_empty() {
    return module.source.to_string();
  }
  let mut magic_string = MagicString::new(module.source.as_str());
  for mutation in &module.mutations {
    let span = mutation.span();
    let (start, end) = (span.start as usize, span.end as usize);
    match mutation {
      Mutation::Remove(_) => {
        magic_string.remove(start, end);
      }
      Mutation::Overwrite { content, .. } => {
        magic_string.update(start, end, content.clone());
      }
      Mutation::DynamicImport { record, .. } => {
        let require = render_require(&module.import_records[*record], modules);
        let content = concat_string!("Promise.resolve().then(() => ", require, ")");
        magic_string.update(start, end, content);
      }
    }
  }
  magic_string.to_string()
}

use libpack_common::{NormalModule, SourceJoiner};
use libpack_error::BuildResult;
use libpack_utils::{
  concat_string,
  ecmascript::{
    is_validate_identifier_name, property_access_str, quote_str, to_module_import_export_name,
  },
};

use super::{RenderContext, append_registry, external_binding};
use crate::module_finalizers::render_inlined_entry;

pub fn render_esm<'a>(ctx: &RenderContext<'a>) -> BuildResult<SourceJoiner<'a>> {
  let link_output = ctx.link_output;
  let Some(entry) = link_output.modules[link_output.entry()].as_normal() else {
    return Err(anyhow::anyhow!("The entry of the es format must be a bundled module").into());
  };

  let mut source_joiner = SourceJoiner::default();

  let mut external_exprs = vec![];
  for (index, name) in ctx.external_names().enumerate() {
    let binding = external_binding(index);
    let specifier = quote_str(name);
    source_joiner.append_source(concat_string!("import * as ", binding, " from ", specifier, ";"));
    external_exprs.push(binding);
  }

  append_registry(&mut source_joiner, ctx, None, &external_exprs);
  source_joiner.append_source(render_inlined_entry(entry, &link_output.modules));
  render_exports(&mut source_joiner, ctx, entry);

  Ok(source_joiner)
}

// Exports bound to a top-level name of the entry are exported as that name and stay live.
// Re-exports and names reached through `export *` are read once the entry has run.
fn render_exports(
  source_joiner: &mut SourceJoiner<'_>,
  ctx: &RenderContext<'_>,
  entry: &NormalModule,
) {
  let exports = &ctx.link_output.entry_exports;
  if !exports.is_empty() {
    let mut specifiers = Vec::with_capacity(exports.len());
    for (index, name) in exports.iter().enumerate() {
      let exported = to_module_import_export_name(name);
      match entry.named_exports.get(name) {
        Some(local) if is_validate_identifier_name(local) => {
          if *local == exported {
            specifiers.push(exported);
          } else {
            specifiers.push(concat_string!(local, " as ", exported));
          }
        }
        _ => {
          let local = format!("__export_{index}");
          let value = property_access_str("__exports", name);
          source_joiner.append_source(concat_string!("var ", local, " = ", value, ";"));
          specifiers.push(concat_string!(local, " as ", exported));
        }
      }
    }
    let specifiers = specifiers.join(", ");
    source_joiner.append_source(concat_string!("export { ", specifiers, " };"));
  }

  let modules = &ctx.link_output.modules;
  for idx in &ctx.link_output.entry_external_star_exports {
    let specifier = quote_str(modules[*idx].stable_id());
    source_joiner.append_source(concat_string!("export * from ", specifier, ";"));
  }
}

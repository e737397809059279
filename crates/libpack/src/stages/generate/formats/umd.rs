use libpack_common::SourceJoiner;
use libpack_error::BuildResult;
use libpack_utils::{
  concat_string,
  ecmascript::{dotted_property_access_str, quote_str},
};

use super::{RenderContext, append_registry, external_binding, render_library_global_path};
use crate::runtime::INTEROP;

pub fn render_umd<'a>(ctx: &RenderContext<'a>) -> BuildResult<SourceJoiner<'a>> {
  let globals = ctx.external_globals()?;
  let specifiers = ctx.external_names().map(quote_str).collect::<Vec<_>>();
  let bindings = (0..specifiers.len()).map(external_binding).collect::<Vec<_>>();

  let cjs_args = std::iter::once("exports".to_string())
    .chain(specifiers.iter().map(|specifier| concat_string!("require(", specifier, ")")))
    .collect::<Vec<_>>()
    .join(", ");
  let amd_deps = std::iter::once("\"exports\"".to_string())
    .chain(specifiers.iter().cloned())
    .collect::<Vec<_>>()
    .join(", ");

  let (parents, library_path) =
    render_library_global_path("global", &ctx.library_name_segments());
  let library_target = if parents.is_empty() {
    concat_string!(library_path, " = {}")
  } else {
    let parents = parents.join(", ");
    concat_string!("(", parents, ", ", library_path, " = {})")
  };
  let global_args = std::iter::once(library_target)
    .chain(globals.iter().map(|global| dotted_property_access_str("global", global)))
    .collect::<Vec<_>>()
    .join(", ");
  let factory_params =
    std::iter::once("exports").chain(bindings.iter().map(String::as_str)).collect::<Vec<_>>().join(", ");

  let mut source_joiner = SourceJoiner::default();
  source_joiner.append_source(concat_string!(
    "(function (global, factory) {\n",
    "  typeof exports === \"object\" && typeof module !== \"undefined\" ? factory(",
    cjs_args,
    ") :\n",
    "  typeof define === \"function\" && define.amd ? define([",
    amd_deps,
    "], factory) :\n",
    "  (global = typeof globalThis !== \"undefined\" ? globalThis : global || self, factory(",
    global_args,
    "));\n",
    "})(this, function (",
    factory_params,
    ") {"
  ));
  source_joiner.append_source("\"use strict\";");

  let external_exprs = bindings
    .iter()
    .map(|binding| concat_string!("__toESM(", binding, ")"))
    .collect::<Vec<_>>();
  append_registry(&mut source_joiner, ctx, Some(INTEROP), &external_exprs);

  let entry_key = ctx.entry_key();
  source_joiner.append_source(concat_string!("__reexport(exports, __require(", entry_key, "));"));
  source_joiner.append_source("});");

  Ok(source_joiner)
}

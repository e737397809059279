use libpack_common::SourceJoiner;
use libpack_error::BuildResult;
use libpack_utils::{concat_string, ecmascript::is_validate_identifier_name};

use super::{RenderContext, append_registry, external_binding, render_library_global_path};
use crate::runtime::INTEROP;

pub fn render_iife<'a>(ctx: &RenderContext<'a>) -> BuildResult<SourceJoiner<'a>> {
  let globals = ctx.external_globals()?;
  let bindings = (0..globals.len()).map(external_binding).collect::<Vec<_>>();

  let segments = ctx.library_name_segments();
  let mut source_joiner = SourceJoiner::default();

  let assignee = match segments.as_slice() {
    [name] if is_validate_identifier_name(name) => concat_string!("var ", *name),
    _ => {
      let (parents, path) = render_library_global_path("globalThis", &segments);
      for parent in parents {
        source_joiner.append_source(concat_string!(parent, ";"));
      }
      path
    }
  };
  let factory_params =
    std::iter::once("exports").chain(bindings.iter().map(String::as_str)).collect::<Vec<_>>().join(", ");
  source_joiner.append_source(concat_string!(assignee, " = (function (", factory_params, ") {"));
  source_joiner.append_source("\"use strict\";");

  let external_exprs = bindings
    .iter()
    .map(|binding| concat_string!("__toESM(", binding, ")"))
    .collect::<Vec<_>>();
  append_registry(&mut source_joiner, ctx, Some(INTEROP), &external_exprs);

  let entry_key = ctx.entry_key();
  source_joiner.append_source(concat_string!("__reexport(exports, __require(", entry_key, "));"));
  source_joiner.append_source("return exports;");

  let args = std::iter::once("{}").chain(globals.iter().copied()).collect::<Vec<_>>().join(", ");
  source_joiner.append_source(concat_string!("})(", args, ");"));

  Ok(source_joiner)
}

use libpack_common::SourceJoiner;
use libpack_utils::{concat_string, ecmascript::quote_str};

use super::{RenderContext, append_registry};
use crate::runtime::INTEROP;

pub fn render_cjs<'a>(ctx: &RenderContext<'a>) -> SourceJoiner<'a> {
  let mut source_joiner = SourceJoiner::default();
  source_joiner.append_source("\"use strict\";");

  let external_exprs = ctx
    .external_names()
    .map(|name| {
      let specifier = quote_str(name);
      concat_string!("__toESM(require(", specifier, "))")
    })
    .collect::<Vec<_>>();
  append_registry(&mut source_joiner, ctx, Some(INTEROP), &external_exprs);

  let entry_key = ctx.entry_key();
  source_joiner.append_source(concat_string!("module.exports = __require(", entry_key, ");"));

  source_joiner
}

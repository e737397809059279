mod cjs;
mod esm;
mod iife;
mod umd;

use libpack_common::{ModuleIdx, NormalizedBundlerOptions, OutputFormat, SourceJoiner};
use libpack_error::{BuildDiagnostic, BuildResult};
use libpack_utils::{
  concat_string,
  ecmascript::{is_validate_global_name, property_access_str, quote_str},
};

use crate::{runtime::RUNTIME, stages::link::LinkStageOutput};

pub struct RenderContext<'a> {
  pub link_output: &'a LinkStageOutput,
  pub options: &'a NormalizedBundlerOptions,
  pub format: OutputFormat,
  /// Registry entries of every normal module, in execution order.
  pub module_factories: &'a [(ModuleIdx, String)],
}

impl<'a> RenderContext<'a> {
  pub fn entry_key(&self) -> String {
    quote_str(self.link_output.modules[self.link_output.entry()].stable_id())
  }

  /// Specifiers of the externals, in execution order.
  pub fn external_names(&self) -> impl Iterator<Item = &'a str> + 'a {
    let link_output = self.link_output;
    link_output.externals.iter().map(move |idx| link_output.modules[*idx].stable_id())
  }

  /// Global variable of each external. Every missing one is reported.
  pub fn external_globals(&self) -> BuildResult<Vec<&'a str>> {
    let options = self.options;
    let mut globals = vec![];
    let mut errors = vec![];
    for name in self.external_names() {
      match options.global_name_of(name) {
        Some(global) => globals.push(global),
        None => errors.push(BuildDiagnostic::packaging(format!(
          "Missing global variable name for external \"{name}\", required by the {} format; add it to `globals`",
          self.format
        ))),
      }
    }
    if errors.is_empty() { Ok(globals) } else { Err(errors.into()) }
  }

  /// Formats that keep `export` syntax run the entry at the top level instead of registering
  /// a factory for it, so the entry's own bindings are exported live.
  pub fn inlines_entry(&self) -> bool {
    self.format.keep_esm_import_export_syntax()
  }

  /// Segments of the global the library is assigned to. `Acme.Widgets` nests, `widget-lib` does not.
  pub fn library_name_segments(&self) -> Vec<&'a str> {
    let options = self.options;
    let name = options.library_name.as_deref().unwrap_or(&options.name);
    if is_validate_global_name(name) { name.split('.').collect() } else { vec![name] }
  }
}

pub fn external_binding(index: usize) -> String {
  let index = index.to_string();
  concat_string!("__external_", index)
}

/// `global.Acme = global.Acme || {}` for every parent of the library global, then the
/// access path of the library global itself.
pub fn render_library_global_path(object: &str, segments: &[&str]) -> (Vec<String>, String) {
  let mut parents = vec![];
  let mut path = object.to_string();
  for (i, segment) in segments.iter().enumerate() {
    path = property_access_str(&path, segment);
    if i + 1 < segments.len() {
      parents.push(concat_string!(path, " = ", path, " || {}"));
    }
  }
  (parents, path)
}

/// The runtime, every external registered under its specifier, then every module factory.
/// The entry's factory is left out when the format inlines the entry.
pub fn append_registry<'a>(
  source_joiner: &mut SourceJoiner<'a>,
  ctx: &RenderContext<'a>,
  extra_runtime: Option<&'static str>,
  external_exprs: &[String],
) {
  source_joiner.append_source(RUNTIME.trim_end());
  if let Some(extra_runtime) = extra_runtime {
    source_joiner.append_source(extra_runtime.trim_end());
  }
  for (name, expr) in ctx.external_names().zip(external_exprs) {
    let key = quote_str(name);
    source_joiner.append_source(concat_string!("__cache[", key, "] = { exports: ", expr, " };"));
  }
  let skipped = ctx.inlines_entry().then(|| ctx.link_output.entry());
  for (idx, factory) in ctx.module_factories {
    if Some(*idx) != skipped {
      source_joiner.append_source(factory.as_str());
    }
  }
}

pub fn render_format<'a>(ctx: &RenderContext<'a>) -> BuildResult<SourceJoiner<'a>> {
  match ctx.format {
    OutputFormat::Es => esm::render_esm(ctx),
    OutputFormat::Cjs => Ok(cjs::render_cjs(ctx)),
    OutputFormat::Umd => umd::render_umd(ctx),
    OutputFormat::Iife => iife::render_iife(ctx),
  }
}

#[test]
fn test_render_library_global_path() {
  let (parents, path) = render_library_global_path("global", &["widget-lib"]);
  assert!(parents.is_empty());
  assert_eq!(path, "global[\"widget-lib\"]");

  let (parents, path) = render_library_global_path("global", &["Acme", "Widgets"]);
  assert_eq!(parents, vec!["global.Acme = global.Acme || {}".to_string()]);
  assert_eq!(path, "global.Acme.Widgets");
}

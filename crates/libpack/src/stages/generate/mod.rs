mod formats;
mod public_dir;

use libpack_common::{ModuleIdx, OutputAsset, OutputAssetKind, OutputFormat, StrOrBytes};
use libpack_ecmascript::EcmaCompiler;
use libpack_error::{BuildError, BuildResult};
use libpack_fs::FileSystem;
use libpack_utils::{
  concat_string,
  rayon::{IntoParallelRefIterator, ParallelIterator},
};

use self::formats::{RenderContext, render_format};
use super::link::LinkStageOutput;
use crate::{module_finalizers::render_module_factory, types::SharedOptions};

pub struct GenerateStage<'a> {
  link_output: &'a LinkStageOutput,
  options: &'a SharedOptions,
}

impl<'a> GenerateStage<'a> {
  pub fn new(link_output: &'a LinkStageOutput, options: &'a SharedOptions) -> Self {
    Self { link_output, options }
  }

  /// Renders one artifact per format, then appends the public directory. Nothing touches the
  /// output directory here.
  pub fn generate(&self, fs: &dyn FileSystem) -> BuildResult<Vec<OutputAsset>> {
    let modules = &self.link_output.modules;
    let module_factories = self
      .link_output
      .sorted_modules
      .par_iter()
      .filter_map(|idx| modules[*idx].as_normal())
      .map(|module| (module.idx, render_module_factory(module, modules)))
      .collect::<Vec<_>>();

    let rendered = self
      .options
      .formats
      .par_iter()
      .map(|format| self.render_artifact(*format, &module_factories))
      .collect::<Vec<_>>();

    let mut assets = Vec::with_capacity(rendered.len());
    let mut errors = vec![];
    for result in rendered {
      match result {
        Ok(asset) => assets.push(asset),
        Err(err) => errors.extend(err.into_vec()),
      }
    }
    if !errors.is_empty() {
      return Err(BuildError::from(errors));
    }

    if let Some(public_dir) = &self.options.public_dir {
      let public_assets = public_dir::collect_public_assets(fs, public_dir, &assets)?;
      tracing::debug!(files = public_assets.len(), "public directory collected");
      assets.extend(public_assets);
    }

    Ok(assets)
  }

  fn render_artifact(
    &self,
    format: OutputFormat,
    module_factories: &[(ModuleIdx, String)],
  ) -> BuildResult<OutputAsset> {
    let filename = self.options.artifact_file_name(format);
    let ctx = RenderContext {
      link_output: self.link_output,
      options: self.options,
      format,
      module_factories,
    };
    let mut code = render_format(&ctx)?.join();

    if self.options.minify {
      code = EcmaCompiler::minify(&filename, &code, format.keep_esm_import_export_syntax())?;
    }

    let code = match (&self.options.banner, &self.options.footer) {
      (None, None) => code,
      (banner, footer) => {
        let banner = banner.as_deref().map(|banner| concat_string!(banner, "\n")).unwrap_or_default();
        let footer = footer.as_deref().map(|footer| concat_string!("\n", footer)).unwrap_or_default();
        let code = code.trim_end();
        concat_string!(banner, code, footer)
      }
    };
    let code = if code.ends_with('\n') { code } else { concat_string!(code, "\n") };

    tracing::debug!(format = %format, file = %filename, bytes = code.len(), "rendered");

    Ok(OutputAsset {
      filename,
      content: StrOrBytes::Str(code),
      kind: OutputAssetKind::Chunk(format),
    })
  }
}

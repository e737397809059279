use std::path::{Component, Path, PathBuf};

use libpack_common::{
  BundlerOptions, FilenameTemplate, NormalizedBundlerOptions, OutputFormat, PublicDirOption,
};
use libpack_error::{BuildDiagnostic, BuildResult};
use libpack_utils::{
  ecmascript::is_validate_global_name,
  indexmap::{FxIndexMap, FxIndexSet},
  path_ext::PathExt,
};
use sugar_path::SugarPath;

const DEFAULT_FILE_NAME: &str = "[name].[format].js";
const DEFAULT_OUT_DIR: &str = "dist";
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_FORMATS: [OutputFormat; 2] = [OutputFormat::Es, OutputFormat::Umd];

/// Validates the raw options and fills in defaults. Every problem found is reported, not just the first.
pub fn normalize_options(raw_options: BundlerOptions) -> BuildResult<NormalizedBundlerOptions> {
  let mut errors = vec![];

  let cwd = normalize_cwd(raw_options.cwd, &mut errors);

  let entry = raw_options.entry.map(|entry| entry.trim().to_string()).unwrap_or_default();
  if entry.is_empty() {
    errors.push(BuildDiagnostic::configuration("`entry` is required"));
  }

  let external = raw_options.external.unwrap_or_default().into_iter().collect::<FxIndexSet<_>>();
  if external.contains(&entry) {
    errors.push(BuildDiagnostic::configuration(format!(
      "The entry \"{entry}\" can't be listed in `external`"
    )));
  }

  let formats = raw_options
    .formats
    .unwrap_or_else(|| DEFAULT_FORMATS.to_vec())
    .into_iter()
    .collect::<FxIndexSet<_>>()
    .into_iter()
    .collect::<Vec<_>>();
  if formats.is_empty() {
    errors.push(BuildDiagnostic::configuration("`formats` must list at least one format"));
  }

  let library_name = raw_options.library_name;
  match library_name.as_deref() {
    Some(name) if name.trim().is_empty() => {
      errors.push(BuildDiagnostic::configuration("`libraryName` must not be empty"));
    }
    Some(_) => {}
    None => {
      for format in formats.iter().filter(|format| format.is_global_variable()) {
        errors.push(BuildDiagnostic::configuration(format!(
          "`libraryName` is required for the {format} format"
        )));
      }
    }
  }

  let name = library_name.clone().unwrap_or_else(|| {
    let entry_name = Path::new(&entry).representative_file_name().into_owned();
    if entry_name.is_empty() { "index".to_string() } else { entry_name }
  });

  let file_name =
    FilenameTemplate::new(raw_options.file_name.unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()));
  for placeholder in file_name.unknown_placeholders() {
    errors.push(BuildDiagnostic::configuration(format!(
      "Unknown placeholder {placeholder} in `fileName` \"{}\", only [name] and [format] are supported",
      file_name.template()
    )));
  }
  check_file_names(&file_name, &name, &formats, &mut errors);

  let globals = raw_options.globals.unwrap_or_default();
  check_globals(&globals, &external, &formats, &mut errors);

  let out_dir = cwd.join(raw_options.out_dir.as_deref().unwrap_or(DEFAULT_OUT_DIR)).normalize();

  let public_dir = match raw_options.public_dir {
    None | Some(PublicDirOption::Enabled(false)) => None,
    Some(PublicDirOption::Enabled(true)) => Some(cwd.join(DEFAULT_PUBLIC_DIR)),
    Some(PublicDirOption::Dir(dir)) => Some(cwd.join(dir).normalize()),
  };
  if public_dir.as_ref().is_some_and(|public_dir| *public_dir == out_dir) {
    errors.push(BuildDiagnostic::configuration("`publicDir` and `outDir` must be different directories"));
  }

  if !errors.is_empty() {
    return Err(errors.into());
  }

  Ok(NormalizedBundlerOptions {
    entry,
    cwd,
    platform: raw_options.platform.unwrap_or_default(),
    external,
    name,
    library_name,
    file_name,
    formats,
    globals,
    out_dir,
    public_dir,
    minify: raw_options.minify.unwrap_or(false),
    banner: raw_options.banner,
    footer: raw_options.footer,
  })
}

/// Falls back to the path as given when it can't be canonicalized, so the remaining options are
/// still checked against something.
fn normalize_cwd(cwd: Option<PathBuf>, errors: &mut Vec<BuildDiagnostic>) -> PathBuf {
  let cwd = match std::env::current_dir() {
    Ok(current_dir) => cwd.map_or_else(|| current_dir.clone(), |cwd| current_dir.join(cwd)),
    Err(err) => {
      errors.push(BuildDiagnostic::io(Path::new("."), err));
      cwd.unwrap_or_else(|| PathBuf::from("."))
    }
  };
  // Resolved module paths are canonical, so the root has to be as well for relative ids to line up.
  dunce::canonicalize(&cwd).unwrap_or_else(|err| {
    errors.push(BuildDiagnostic::configuration(format!(
      "`cwd` \"{}\" is not accessible: {err}",
      cwd.display()
    )));
    cwd
  })
}

fn check_file_names(
  file_name: &FilenameTemplate,
  name: &str,
  formats: &[OutputFormat],
  errors: &mut Vec<BuildDiagnostic>,
) {
  let mut seen: FxIndexMap<String, OutputFormat> = FxIndexMap::default();
  for &format in formats {
    let rendered = file_name.render(name, format);
    let path = Path::new(&rendered);
    if rendered.is_empty()
      || path.is_absolute()
      || path.components().any(|component| !matches!(component, Component::Normal(_)))
    {
      errors.push(BuildDiagnostic::configuration(format!(
        "The {format} output file name \"{rendered}\" must be a relative path inside `outDir`"
      )));
      continue;
    }
    if let Some(previous) = seen.get(&rendered) {
      errors.push(BuildDiagnostic::configuration(format!(
        "The {previous} and {format} formats would both be written to \"{rendered}\", add [format] to `fileName`"
      )));
    } else {
      seen.insert(rendered, format);
    }
  }
}

fn check_globals(
  globals: &FxIndexMap<String, String>,
  external: &FxIndexSet<String>,
  formats: &[OutputFormat],
  errors: &mut Vec<BuildDiagnostic>,
) {
  for (module, global) in globals {
    if !external.contains(module) {
      errors.push(BuildDiagnostic::configuration(format!(
        "`globals` maps \"{module}\" but it is not listed in `external`"
      )));
    }
    if !is_validate_global_name(global) {
      errors.push(BuildDiagnostic::configuration(format!(
        "Invalid global variable name \"{global}\" for \"{module}\""
      )));
    }
  }

  let Some(global_format) = formats.iter().find(|format| format.is_global_variable()) else {
    return;
  };
  for module in external.iter().filter(|module| !globals.contains_key(*module)) {
    errors.push(BuildDiagnostic::configuration(format!(
      "Missing global variable name for external \"{module}\", required by the {global_format} format; add it to `globals`"
    )));
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn widget_lib() -> BundlerOptions {
    BundlerOptions {
      entry: Some("src/index.ts".to_string()),
      library_name: Some("widget-lib".to_string()),
      external: Some(vec!["vue".to_string()]),
      globals: Some(FxIndexMap::from_iter([("vue".to_string(), "Vue".to_string())])),
      out_dir: Some("./dist".to_string()),
      ..BundlerOptions::default()
    }
  }

  fn messages(options: BundlerOptions) -> Vec<String> {
    normalize_options(options).unwrap_err().iter().map(ToString::to_string).collect()
  }

  #[test]
  fn defaults() {
    let options = normalize_options(widget_lib()).unwrap();
    assert_eq!(options.formats, vec![OutputFormat::Es, OutputFormat::Umd]);
    assert_eq!(options.artifact_file_name(OutputFormat::Es), "widget-lib.es.js");
    assert_eq!(options.artifact_file_name(OutputFormat::Umd), "widget-lib.umd.js");
    assert_eq!(options.out_dir, options.cwd.join("dist"));
    assert!(options.public_dir.is_none());
  }

  #[test]
  fn formats_are_deduplicated_in_order() {
    let options = normalize_options(BundlerOptions {
      formats: Some(vec![OutputFormat::Cjs, OutputFormat::Es, OutputFormat::Cjs]),
      ..widget_lib()
    })
    .unwrap();
    assert_eq!(options.formats, vec![OutputFormat::Cjs, OutputFormat::Es]);
  }

  #[test]
  fn name_falls_back_to_entry_file_name() {
    let options = normalize_options(BundlerOptions {
      library_name: None,
      formats: Some(vec![OutputFormat::Es]),
      ..widget_lib()
    })
    .unwrap();
    assert_eq!(options.artifact_file_name(OutputFormat::Es), "src.es.js");
  }

  #[test]
  fn missing_global_names_the_external() {
    let errors = messages(BundlerOptions { globals: None, ..widget_lib() });
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("\"vue\""));
    assert!(errors[0].contains("umd"));
  }

  #[test]
  fn missing_global_is_fine_for_import_formats() {
    let options = normalize_options(BundlerOptions {
      globals: None,
      formats: Some(vec![OutputFormat::Es, OutputFormat::Cjs]),
      ..widget_lib()
    });
    assert!(options.is_ok());
  }

  #[test]
  fn colliding_file_names() {
    let errors = messages(BundlerOptions {
      file_name: Some("index.js".to_string()),
      ..widget_lib()
    });
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("\"index.js\""));
  }

  #[test]
  fn collects_every_problem() {
    let errors = messages(BundlerOptions {
      entry: None,
      library_name: None,
      file_name: Some("[name].[hash].js".to_string()),
      globals: Some(FxIndexMap::from_iter([
        ("vue".to_string(), "Vue".to_string()),
        ("react".to_string(), "not a name".to_string()),
      ])),
      ..BundlerOptions::default()
    });
    let joined = errors.join("\n");
    assert!(joined.contains("`entry` is required"));
    assert!(joined.contains("`libraryName` is required for the umd format"));
    assert!(joined.contains("Unknown placeholder [hash]"));
    assert!(joined.contains("\"react\" but it is not listed"));
    assert!(joined.contains("Invalid global variable name \"not a name\""));
  }

  #[test]
  fn inaccessible_cwd_is_reported_with_other_problems() {
    let errors = messages(BundlerOptions {
      cwd: Some(std::env::temp_dir().join("libpack-missing-project").join("nested")),
      entry: None,
      ..widget_lib()
    });
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("`cwd` \""));
    assert!(errors[0].contains("is not accessible"));
    assert!(errors[1].contains("`entry` is required"));
  }

  #[test]
  fn public_dir_option() {
    let options = normalize_options(BundlerOptions {
      public_dir: Some(PublicDirOption::Enabled(true)),
      ..widget_lib()
    })
    .unwrap();
    assert_eq!(options.public_dir, Some(options.cwd.join("public")));
  }
}

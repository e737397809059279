use std::path::{Path, PathBuf};

use arcstr::ArcStr;
use dashmap::DashMap;
use itertools::Itertools;
use sugar_path::SugarPath;

use oxc_resolver::{ResolveError, ResolveOptions as OxcResolverOptions, Resolver as OxcResolver};

use libpack_common::Platform;

/// Probed in this order for extensionless specifiers and directory `index` files.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".mjs", ".js", ".jsx", ".json"];

#[derive(Debug)]
pub struct Resolver {
  cwd: PathBuf,
  inner: OxcResolver,
  cache: DashMap<(PathBuf, ArcStr), ArcStr>,
}

impl Resolver {
  /// `extra_extensions` come from plugins, e.g. `.vue`.
  pub fn new(platform: Platform, cwd: PathBuf, extra_extensions: &[&str]) -> Self {
    let mut condition_names = vec!["import".to_string(), "default".to_string()];

    match platform {
      Platform::Node => {
        condition_names.push("node".to_string());
      }
      Platform::Browser => {
        condition_names.push("browser".to_string());
      }
      Platform::Neutral => {}
    }

    let main_fields = match platform {
      Platform::Node => {
        vec!["main".to_string(), "module".to_string()]
      }
      Platform::Browser => vec!["browser".to_string(), "module".to_string(), "main".to_string()],
      Platform::Neutral => vec!["module".to_string(), "main".to_string()],
    };

    let alias_fields = match platform {
      Platform::Browser => vec![vec!["browser".to_string()]],
      _ => vec![],
    };

    let extensions = DEFAULT_EXTENSIONS
      .iter()
      .chain(extra_extensions)
      .map(|ext| (*ext).to_string())
      .unique()
      .collect();

    let inner = OxcResolver::new(OxcResolverOptions {
      main_fields,
      alias_fields,
      condition_names,
      extensions,
      ..Default::default()
    });

    Self { cwd, inner, cache: DashMap::default() }
  }
}

#[derive(Debug, Clone)]
pub struct ResolveReturn {
  /// Absolute path of the resolved file.
  pub path: ArcStr,
}

impl Resolver {
  pub fn resolve(
    &self,
    importer: Option<&Path>,
    specifier: &str,
    is_user_defined_entry: bool,
  ) -> Result<ResolveReturn, ResolveError> {
    let dir = importer
      .and_then(|importer| importer.parent())
      .filter(|inner| inner.components().next().is_some())
      .unwrap_or(self.cwd.as_path());

    let cache_key = (dir.to_path_buf(), ArcStr::from(specifier));
    if let Some(path) = self.cache.get(&cache_key) {
      return Ok(ResolveReturn { path: path.value().clone() });
    }

    let mut resolution = self.inner.resolve(dir, specifier);

    // Handle `{ entry: 'main' }` -> `<CWD>/main.{ts,js,...}`
    if resolution.is_err() && is_user_defined_entry {
      let is_specifier_path_like = specifier.starts_with('.') || specifier.starts_with('/');
      let need_rollup_resolve_compat = !is_specifier_path_like;

      if need_rollup_resolve_compat {
        let normalized_specifier = self.cwd.join(specifier).normalize();
        let result = self.inner.resolve(dir, &normalized_specifier.to_string_lossy());
        if result.is_ok() {
          resolution = result;
        }
      }
    }

    let path: ArcStr = resolution?.full_path().to_string_lossy().as_ref().into();
    tracing::trace!(specifier, path = %path, "resolved");
    self.cache.insert(cache_key, path.clone());
    Ok(ResolveReturn { path })
  }
}

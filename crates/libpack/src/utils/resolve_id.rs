use std::path::Path;

use libpack_common::{NormalizedBundlerOptions, ResolvedId};
use libpack_error::BuildDiagnostic;
use libpack_resolver::Resolver;

#[inline]
fn is_http_url(s: &str) -> bool {
  s.starts_with("http://") || s.starts_with("https://") || s.starts_with("//")
}

#[inline]
fn is_data_url(s: &str) -> bool {
  s.trim_start().starts_with("data:")
}

/// `importer` is the absolute id of the importing module, `None` for the entry.
/// `importer_stable_id` is only used to name the importer in diagnostics.
pub fn resolve_id(
  options: &NormalizedBundlerOptions,
  resolver: &Resolver,
  request: &str,
  importer: Option<&str>,
  importer_stable_id: &str,
  is_user_defined_entry: bool,
) -> Result<ResolvedId, BuildDiagnostic> {
  // Declared externals never touch the filesystem.
  if options.is_external(request) {
    return Ok(ResolvedId { id: request.into(), is_external: true });
  }

  // Auto external http url or data url
  if is_http_url(request) || is_data_url(request) {
    return Ok(ResolvedId { id: request.into(), is_external: true });
  }

  match resolver.resolve(importer.map(Path::new), request, is_user_defined_entry) {
    Ok(resolved) => Ok(ResolvedId { id: resolved.path, is_external: false }),
    Err(err) => Err(BuildDiagnostic::resolution(importer_stable_id, request, err.to_string())),
  }
}

use std::path::Path;

use libpack_common::{ModuleType, ResolvedId};
use libpack_error::BuildDiagnostic;
use libpack_fs::FileSystem;

/// Reads the module from disk. Unknown extensions are read as JavaScript unless a plugin claims them.
pub fn load_source(
  fs: &dyn FileSystem,
  resolved_id: &ResolvedId,
  stable_id: &str,
) -> Result<(String, Option<ModuleType>), BuildDiagnostic> {
  let path = Path::new(resolved_id.id.as_str());
  let source = fs.read_to_string(path).map_err(|err| BuildDiagnostic::io(Path::new(stable_id), err))?;
  let module_type =
    path.extension().and_then(|ext| ext.to_str()).and_then(ModuleType::from_extension);
  Ok((source, module_type))
}

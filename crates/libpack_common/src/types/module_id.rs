use std::path::Path;

use arcstr::ArcStr;
use sugar_path::SugarPath;

/// `ModuleId` is the unique string identifier for each module.
/// - It will be used to identify the module in the whole bundle.
/// - For modules on disk it is the absolute path.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct ModuleId(ArcStr);

impl ModuleId {
  pub fn new(value: impl Into<ArcStr>) -> Self {
    Self(value.into())
  }

  /// Relative to `cwd` with `/` separators, so output does not depend on the machine.
  pub fn stabilize(&self, cwd: &Path) -> String {
    if self.as_path().is_absolute() {
      self.relative(cwd).as_path().to_slash_lossy().into_owned()
    } else {
      self.to_string()
    }
  }
}

impl std::ops::Deref for ModuleId {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    self
  }
}

impl From<ArcStr> for ModuleId {
  fn from(value: ArcStr) -> Self {
    Self::new(value)
  }
}

#[test]
fn test_stabilize() {
  let cwd = std::env::temp_dir().join("project");
  let id = ModuleId::new(cwd.join("src").join("index.ts").to_string_lossy().into_owned());
  assert_eq!(id.stabilize(&cwd), "src/index.ts");
  assert_eq!(ModuleId::new("virtual:entry").stabilize(&cwd), "virtual:entry");
}

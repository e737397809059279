mod build_diagnostic;
mod stage;

use std::{
  fmt,
  ops::{Deref, DerefMut},
};

pub use crate::{build_diagnostic::BuildDiagnostic, stage::Stage};

/// Every diagnostic collected by a failed build. A build never fails with an empty list.
#[derive(Debug)]
pub struct BuildError(pub Vec<BuildDiagnostic>);

impl BuildError {
  pub fn into_vec(self) -> Vec<BuildDiagnostic> {
    self.0
  }
}

impl Deref for BuildError {
  type Target = Vec<BuildDiagnostic>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, diagnostic) in self.0.iter().enumerate() {
      if i > 0 {
        writeln!(f)?;
      }
      write!(f, "[{}] {diagnostic}", diagnostic.stage())?;
    }
    Ok(())
  }
}

impl std::error::Error for BuildError {}

impl From<BuildDiagnostic> for BuildError {
  fn from(diagnostic: BuildDiagnostic) -> Self {
    Self(vec![diagnostic])
  }
}

impl From<Vec<BuildDiagnostic>> for BuildError {
  fn from(diagnostics: Vec<BuildDiagnostic>) -> Self {
    Self(diagnostics)
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![BuildDiagnostic::Unexpected(error)])
  }
}

pub type BuildResult<T> = Result<T, BuildError>;

#[test]
fn test_display_lists_every_diagnostic() {
  let error = BuildError(vec![
    BuildDiagnostic::configuration("`entry` is required"),
    BuildDiagnostic::resolution("src/index.ts", "./missing", "file not found"),
  ]);
  assert_eq!(
    error.to_string(),
    "[configuration] ConfigurationError: `entry` is required\n[resolution] ResolutionError: Could not resolve \"./missing\" from \"src/index.ts\": file not found"
  );
}

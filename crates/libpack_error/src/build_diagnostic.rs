use std::path::Path;

use crate::Stage;

#[derive(Debug, thiserror::Error)]
pub enum BuildDiagnostic {
  #[error("SyntaxError: {file}:{line}:{column}: {message}")]
  Syntax { file: String, line: usize, column: usize, message: String },

  #[error("PluginError: [plugin {plugin}] {file}: {message}")]
  Plugin { plugin: String, file: String, message: String },

  #[error("ResolutionError: Could not resolve \"{specifier}\" from \"{importer}\": {reason}")]
  Resolution { importer: String, specifier: String, reason: String },

  #[error("ConfigurationError: {message}")]
  Configuration { stage: Stage, message: String },

  #[error("IoError: {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("UnexpectedError: {0}")]
  Unexpected(#[from] anyhow::Error),
}

impl BuildDiagnostic {
  pub fn stage(&self) -> Stage {
    match self {
      Self::Syntax { .. } | Self::Plugin { .. } => Stage::Transformation,
      Self::Resolution { .. } => Stage::Resolution,
      Self::Configuration { stage, .. } => *stage,
      Self::Io { .. } => Stage::Io,
      Self::Unexpected(_) => Stage::Packaging,
    }
  }

  pub fn syntax(
    file: impl Into<String>,
    line: usize,
    column: usize,
    message: impl Into<String>,
  ) -> Self {
    Self::Syntax { file: file.into(), line, column, message: message.into() }
  }

  pub fn plugin(
    plugin: impl Into<String>,
    file: impl Into<String>,
    message: impl Into<String>,
  ) -> Self {
    Self::Plugin { plugin: plugin.into(), file: file.into(), message: message.into() }
  }

  pub fn resolution(
    importer: impl Into<String>,
    specifier: impl Into<String>,
    reason: impl Into<String>,
  ) -> Self {
    Self::Resolution { importer: importer.into(), specifier: specifier.into(), reason: reason.into() }
  }

  /// A configuration problem detected while normalizing options.
  pub fn configuration(message: impl Into<String>) -> Self {
    Self::Configuration { stage: Stage::Configuration, message: message.into() }
  }

  /// A configuration problem that only surfaces while rendering a format.
  pub fn packaging(message: impl Into<String>) -> Self {
    Self::Configuration { stage: Stage::Packaging, message: message.into() }
  }

  pub fn io(path: &Path, source: std::io::Error) -> Self {
    Self::Io { path: path.display().to_string(), source }
  }

  pub fn is_configuration(&self) -> bool {
    matches!(self, Self::Configuration { .. })
  }
}

#[test]
fn test_stage_of_diagnostics() {
  assert_eq!(BuildDiagnostic::syntax("a.ts", 1, 2, "Unexpected token").stage(), Stage::Transformation);
  assert_eq!(BuildDiagnostic::packaging("missing global").stage(), Stage::Packaging);
  assert_eq!(
    BuildDiagnostic::io(Path::new("dist/a.js"), std::io::ErrorKind::NotFound.into()).stage(),
    Stage::Io
  );
}

use std::fmt;

/// The pipeline stage a diagnostic was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Configuration,
  Transformation,
  Resolution,
  Packaging,
  Io,
}

impl Stage {
  pub fn as_str(self) -> &'static str {
    match self {
      Stage::Configuration => "configuration",
      Stage::Transformation => "transformation",
      Stage::Resolution => "resolution",
      Stage::Packaging => "packaging",
      Stage::Io => "io",
    }
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

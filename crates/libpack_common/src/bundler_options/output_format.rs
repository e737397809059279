use std::{fmt::Display, str::FromStr};

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum OutputFormat {
  /// `import` / `export` syntax.
  Es,
  /// `require` / `module.exports`.
  Cjs,
  /// Works under CommonJS, AMD, or as a plain `<script>` assigning a global.
  Umd,
  /// A self-executing function assigning a global.
  Iife,
}

impl OutputFormat {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Es => "es",
      Self::Cjs => "cjs",
      Self::Umd => "umd",
      Self::Iife => "iife",
    }
  }

  /// Formats that read externals from global variables and therefore need `globals`.
  #[inline]
  pub fn is_global_variable(self) -> bool {
    matches!(self, Self::Umd | Self::Iife)
  }

  #[inline]
  pub fn keep_esm_import_export_syntax(self) -> bool {
    matches!(self, Self::Es)
  }
}

impl Display for OutputFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for OutputFormat {
  type Err = String;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "es" | "esm" | "module" => Ok(Self::Es),
      "cjs" | "commonjs" => Ok(Self::Cjs),
      "umd" => Ok(Self::Umd),
      "iife" => Ok(Self::Iife),
      _ => Err(format!("Invalid format \"{value}\", expected one of es, cjs, umd, iife")),
    }
  }
}

impl TryFrom<String> for OutputFormat {
  type Error = String;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

#[test]
fn test_output_format_parse() {
  assert_eq!("es".parse(), Ok(OutputFormat::Es));
  assert_eq!("esm".parse(), Ok(OutputFormat::Es));
  assert_eq!("commonjs".parse(), Ok(OutputFormat::Cjs));
  assert!("amd".parse::<OutputFormat>().is_err());
  assert_eq!(OutputFormat::Iife.to_string(), "iife");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleType {
  Js,
  Jsx,
  Ts,
  Tsx,
  Json,
}

impl ModuleType {
  pub fn from_extension(ext: &str) -> Option<Self> {
    match ext {
      "js" | "mjs" | "cjs" => Some(Self::Js),
      "jsx" => Some(Self::Jsx),
      "ts" | "mts" | "cts" => Some(Self::Ts),
      "tsx" => Some(Self::Tsx),
      "json" => Some(Self::Json),
      _ => None,
    }
  }
}

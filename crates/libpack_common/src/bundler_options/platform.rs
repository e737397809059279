use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Platform {
  /// Represents the Node.js environment.
  Node,
  /// Represents the Browser environment.
  #[default]
  Browser,
  /// Represents a platform-agnostic environment.
  Neutral,
}

impl FromStr for Platform {
  type Err = String;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "node" => Ok(Self::Node),
      "browser" => Ok(Self::Browser),
      "neutral" => Ok(Self::Neutral),
      _ => Err(format!("Invalid platform \"{value}\", expected one of browser, node, neutral")),
    }
  }
}

impl TryFrom<String> for Platform {
  type Error = String;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

use crate::OutputFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrOrBytes {
  Str(String),
  Bytes(Vec<u8>),
}

impl StrOrBytes {
  pub fn as_bytes(&self) -> &[u8] {
    match self {
      Self::Str(s) => s.as_bytes(),
      Self::Bytes(b) => b,
    }
  }

  pub fn try_as_str(&self) -> Option<&str> {
    match self {
      Self::Str(s) => Some(s),
      Self::Bytes(b) => std::str::from_utf8(b).ok(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputAssetKind {
  /// The bundle rendered for one output format.
  Chunk(OutputFormat),
  /// A file copied verbatim from the public directory.
  Public,
}

#[derive(Debug, Clone)]
pub struct OutputAsset {
  /// Relative to the output directory, with `/` separators.
  pub filename: String,
  pub content: StrOrBytes,
  pub kind: OutputAssetKind,
}

impl OutputAsset {
  pub fn filename(&self) -> &str {
    &self.filename
  }

  pub fn content_as_bytes(&self) -> &[u8] {
    self.content.as_bytes()
  }
}

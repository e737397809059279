use oxc::span::Span;

use crate::ImportRecordIdx;

/// A planned edit on the source of a module, recorded while scanning and applied when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
  Remove(Span),
  Overwrite { span: Span, content: String },
  /// `import('./x')` becomes a promise of the registry entry of the record.
  DynamicImport { span: Span, record: ImportRecordIdx },
}

impl Mutation {
  pub fn span(&self) -> Span {
    match self {
      Self::Remove(span) | Self::Overwrite { span, .. } | Self::DynamicImport { span, .. } => *span,
    }
  }
}

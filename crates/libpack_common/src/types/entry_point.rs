use crate::ModuleIdx;

/// The user defined entry comes first, targets of `import('...')` follow. Those are bundled
/// into the same output and evaluated on demand.
#[derive(Debug)]
pub struct EntryPoint {
  pub idx: ModuleIdx,
}

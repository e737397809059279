use arcstr::ArcStr;

use crate::ModuleId;

#[derive(Debug, Clone)]
pub struct ResolvedId {
  pub id: ArcStr,
  pub is_external: bool,
}

impl ResolvedId {
  pub fn module_id(&self) -> ModuleId {
    ModuleId::new(self.id.clone())
  }
}

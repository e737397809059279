use libpack_error::BuildDiagnostic;
use task_result::NormalModuleTaskResult;

pub mod task_result;

pub enum ModuleLoaderMsg {
  NormalModuleDone(Box<NormalModuleTaskResult>),
  BuildErrors(Vec<BuildDiagnostic>),
}

mod bundler_options;
mod ecmascript;
mod module;
mod module_loader;
mod types;

pub use bundler_options::{
  BundlerOptions, PublicDirOption, filename_template::FilenameTemplate,
  module_type::ModuleType, normalized_bundler_options::NormalizedBundlerOptions,
  output_format::OutputFormat, platform::Platform,
};

pub use crate::{
  ecmascript::{
    ecma_view::{EcmaView, EcmaViewMeta},
    mutation::Mutation,
  },
  module::{Module, external_module::ExternalModule, normal_module::NormalModule},
  module_loader::{ModuleLoaderMsg, task_result::NormalModuleTaskResult},
  types::{
    entry_point::EntryPoint,
    import_kind::ImportKind,
    import_record::{ImportRecordMeta, RawImportRecord, ResolvedImportRecord},
    module_id::ModuleId,
    module_table::IndexModules,
    output_asset::{OutputAsset, OutputAssetKind, StrOrBytes},
    raw_idx::{ImportRecordIdx, ModuleIdx},
    resolved_id::ResolvedId,
    source::Source,
    source_joiner::SourceJoiner,
  },
};

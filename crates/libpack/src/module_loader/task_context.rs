use libpack_common::ModuleLoaderMsg;
use libpack_fs::OsFileSystem;
use libpack_plugin::SharedPluginDriver;

use crate::types::{SharedOptions, SharedResolver};

/// Used to store common data shared between all tasks.
pub struct TaskContext {
  pub fs: OsFileSystem,
  pub options: SharedOptions,
  pub resolver: SharedResolver,
  pub plugin_driver: SharedPluginDriver,
  pub tx: tokio::sync::mpsc::Sender<ModuleLoaderMsg>,
}

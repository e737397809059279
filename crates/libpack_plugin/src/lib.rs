mod builtin;
mod plugin;
mod plugin_driver;
mod plugin_filter;

pub use crate::{
  builtin::sfc_script::SfcScriptPlugin,
  plugin::{Plugin, PluginError, SharedPlugin, TransformArgs, TransformOutput, TransformResult},
  plugin_driver::{PluginDriver, SharedPluginDriver},
  plugin_filter::PluginFilter,
};
